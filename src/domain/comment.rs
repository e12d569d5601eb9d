use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment left on a feed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageComment {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

impl ImageComment {
    pub fn new(id: Uuid, message: String, created_at: DateTime<Utc>, username: String) -> Self {
        Self {
            id,
            message,
            created_at,
            username,
        }
    }
}
