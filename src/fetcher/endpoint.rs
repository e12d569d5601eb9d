use url::Url;
use uuid::Uuid;

use crate::app::{DarkroomError, Result};

/// URL of the feed endpoint, optionally resuming after a known image id.
pub fn feed(base: &Url, after: Option<Uuid>) -> Result<Url> {
    let mut url = api_path(base, &["v1", "feed"])?;

    if let Some(id) = after {
        url.query_pairs_mut()
            .append_pair("after_id", &id.to_string());
    }

    Ok(url)
}

/// URL of the comments endpoint for one image.
pub fn image_comments(base: &Url, image_id: Uuid) -> Result<Url> {
    api_path(base, &["v1", "image", &image_id.to_string(), "comments"])
}

fn api_path(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DarkroomError::Config(format!("invalid API base URL: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
