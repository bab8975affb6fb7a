use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Subject;

/// Kind of graded work. Stored under the school's own names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    /// Written test taken in class (`prova`)
    Test,
    /// Take-home or group assignment (`trabalho`)
    Assignment,
}

impl ExamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::Test => "prova",
            ExamType::Assignment => "trabalho",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "prova" => Some(ExamType::Test),
            "trabalho" => Some(ExamType::Assignment),
            _ => None,
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exam or graded assignment of one child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub child_id: String,
    pub subject_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub exam_type: ExamType,
    pub exam_date: NaiveDate,
    /// Grade on a 0 to 10 scale, once known
    pub grade: Option<f64>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subject: Option<Subject>,
}

impl Exam {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
