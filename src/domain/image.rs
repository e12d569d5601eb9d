use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A single image in the feed. Immutable once created; identity is `id`,
/// equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl FeedImage {
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("(no description)")
    }
}
