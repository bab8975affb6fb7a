use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Associates a child's own login account with a child profile.
///
/// At most one link exists per child profile and per account; both are
/// enforced by unique constraints in the store. Links are never updated,
/// only created by redemption and deleted to unlink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildUserLink {
    pub id: String,
    pub child_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl ChildUserLink {
    pub fn new(child_id: &str, user_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            user_id: user_id.to_string(),
            created_at,
        }
    }
}
