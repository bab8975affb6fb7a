use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a child profile.
/// A profile is not necessarily tied to any login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub school_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Child {
    /// Generate a unique ID for a child profile
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Pairs a parent account with a child profile it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentChildRelation {
    pub id: String,
    pub parent_id: String,
    pub child_id: String,
    pub created_at: DateTime<Utc>,
}

impl ParentChildRelation {
    pub fn new(parent_id: &str, child_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id: parent_id.to_string(),
            child_id: child_id.to_string(),
            created_at,
        }
    }
}
