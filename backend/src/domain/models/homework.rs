use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Subject;

/// A homework assignment of one child.
///
/// `completed_at` is set exactly while `completed` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    pub id: String,
    pub child_id: String,
    pub subject_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined from `subject_id` when read from storage
    pub subject: Option<Subject>,
}

impl Homework {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Mark done or reopen, keeping `completed_at` in step
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = completed.then_some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_completed_tracks_timestamp() {
        let now = Utc::now();
        let mut homework = Homework {
            id: Homework::generate_id(),
            child_id: "child-1".to_string(),
            subject_id: None,
            title: "Fractions worksheet".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            completed: false,
            completed_at: None,
            created_by: None,
            created_at: now,
            updated_at: now,
            subject: None,
        };

        homework.set_completed(true, now);
        assert!(homework.completed);
        assert_eq!(homework.completed_at, Some(now));

        homework.set_completed(false, now);
        assert!(!homework.completed);
        assert!(homework.completed_at.is_none());
    }
}
