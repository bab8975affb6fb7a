use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A school subject of one child, used to label homework and exams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub child_id: String,
    pub name: String,
    /// Display color as `#RRGGBB`
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
