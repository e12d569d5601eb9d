//! Decoders for the feed API's wire format. Each mapper checks the status
//! code it accepts and turns the body into domain values; transport-level
//! concerns stay in the fetcher.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::domain::{FeedImage, ImageComment};

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("empty image data")]
    EmptyImage,
}

const OK: u16 = 200;

#[derive(Deserialize)]
struct FeedRoot {
    items: Vec<RemoteFeedImage>,
}

#[derive(Deserialize)]
struct RemoteFeedImage {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

/// Decodes one feed page. The feed endpoint only ever answers 200; anything
/// else is unexpected.
pub fn feed_page(body: &[u8], status: u16) -> Result<Vec<FeedImage>, MapperError> {
    if status != OK {
        return Err(MapperError::UnexpectedStatus(status));
    }

    let root: FeedRoot = serde_json::from_slice(body)?;
    Ok(root
        .items
        .into_iter()
        .map(|item| FeedImage::new(item.id, item.description, item.location, item.image))
        .collect())
}

#[derive(Deserialize)]
struct CommentsRoot {
    items: Vec<RemoteComment>,
}

#[derive(Deserialize)]
struct RemoteComment {
    id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
    author: RemoteCommentAuthor,
}

#[derive(Deserialize)]
struct RemoteCommentAuthor {
    username: String,
}

/// Decodes the comments for an image. The comments endpoint may answer with
/// any 2xx status.
pub fn comments(body: &[u8], status: u16) -> Result<Vec<ImageComment>, MapperError> {
    if !(200..=299).contains(&status) {
        return Err(MapperError::UnexpectedStatus(status));
    }

    let root: CommentsRoot = serde_json::from_slice(body)?;
    Ok(root
        .items
        .into_iter()
        .map(|item| {
            ImageComment::new(
                item.id,
                item.message,
                item.created_at,
                item.author.username,
            )
        })
        .collect())
}

/// Passes through raw image bytes. A 200 with an empty body counts as
/// invalid; servers signal a missing image that way.
pub fn image_data(body: &[u8], status: u16) -> Result<Vec<u8>, MapperError> {
    if status != OK {
        return Err(MapperError::UnexpectedStatus(status));
    }
    if body.is_empty() {
        return Err(MapperError::EmptyImage);
    }
    Ok(body.to_vec())
}
