//! Composable load strategies. The combinators here wire remote and local
//! loaders into the cache-then-network behavior the app presents, without
//! either loader knowing about the other.

pub mod feed;
pub mod image;
pub mod task;

use std::future::Future;

use crate::app::Result;

pub use feed::FeedPipeline;
pub use image::ImagePipeline;
pub use task::LoadTask;

/// Runs `op` and, on success, offers the value to `save` before handing it
/// back. A failing sink is logged and swallowed: the caller already has the
/// value, and a cache write is best effort.
pub async fn caching<T, Op, Save, SaveFut>(op: Op, save: Save) -> Result<T>
where
    T: Clone,
    Op: Future<Output = Result<T>>,
    Save: FnOnce(T) -> SaveFut,
    SaveFut: Future<Output = Result<()>>,
{
    let value = op.await?;

    if let Err(err) = save(value.clone()).await {
        tracing::warn!("failed to cache loaded value: {err}");
    }

    Ok(value)
}

/// Runs `primary` and, only if it fails, builds and runs the fallback. The
/// factory is `FnOnce`: the fallback runs at most once, and not at all on a
/// primary success.
pub async fn fallback<T, Primary, MakeFallback, Fallback>(
    primary: Primary,
    make_fallback: MakeFallback,
) -> Result<T>
where
    Primary: Future<Output = Result<T>>,
    MakeFallback: FnOnce() -> Fallback,
    Fallback: Future<Output = Result<T>>,
{
    match primary.await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::debug!("primary loader failed, falling back: {err}");
            make_fallback().await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::app::DarkroomError;

    #[tokio::test]
    async fn test_caching_saves_the_loaded_value() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = saved.clone();

        let value = caching(async { Ok(7) }, move |v: i32| async move {
            sink.lock().unwrap().push(v);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(*saved.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_caching_swallows_sink_failure() {
        let value = caching(async { Ok(7) }, |_: i32| async {
            Err(DarkroomError::Other("disk full".into()))
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_caching_skips_sink_when_load_fails() {
        let saves = Arc::new(AtomicUsize::new(0));
        let counter = saves.clone();

        let result = caching(async { Err(DarkroomError::Connectivity) }, move |_: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

        assert!(matches!(result, Err(DarkroomError::Connectivity)));
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_skips_fallback_on_primary_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let value = fallback(async { Ok(1) }, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(2) }
        })
        .await
        .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_runs_exactly_once_on_primary_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let value = fallback(async { Err(DarkroomError::Connectivity) }, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(2) }
        })
        .await
        .unwrap();

        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_propagates_fallback_error() {
        let result: Result<i32> = fallback(async { Err(DarkroomError::Connectivity) }, || async {
            Err(DarkroomError::InvalidData)
        })
        .await;

        assert!(matches!(result, Err(DarkroomError::InvalidData)));
    }
}
