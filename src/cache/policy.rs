use chrono::{DateTime, Days, Utc};

/// How long a cached feed stays valid, in calendar days.
const MAX_CACHE_AGE_DAYS: u64 = 7;

/// True if a cache stamped at `timestamp` is still valid at `now`.
///
/// The bound is strict: the cache expires the instant `timestamp + 7 days`
/// is reached. Failed calendar arithmetic counts as expired.
pub(crate) fn is_valid(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match timestamp.checked_add_days(Days::new(MAX_CACHE_AGE_DAYS)) {
        Some(expiry) => now < expiry,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_valid_within_window() {
        let t = timestamp();
        assert!(is_valid(t, t));
        assert!(is_valid(t, t + Duration::days(3)));
    }

    #[test]
    fn test_valid_one_second_before_expiry() {
        let t = timestamp();
        assert!(is_valid(t, t + Duration::days(7) - Duration::seconds(1)));
    }

    #[test]
    fn test_expired_exactly_at_boundary() {
        let t = timestamp();
        assert!(!is_valid(t, t + Duration::days(7)));
    }

    #[test]
    fn test_expired_after_boundary() {
        let t = timestamp();
        assert!(!is_valid(t, t + Duration::days(30)));
    }

    #[test]
    fn test_unrepresentable_expiry_fails_closed() {
        assert!(!is_valid(DateTime::<Utc>::MAX_UTC, timestamp()));
    }
}
