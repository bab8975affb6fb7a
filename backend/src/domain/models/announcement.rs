use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A school notice for one child. Important ones are highlighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub content: Option<String>,
    pub important: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
