use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role of an authenticated account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Parent,
    Child,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Parent => "parent",
            UserRole::Child => "child",
        }
    }

    /// Parse a role as sent in the `X-Account-Role` header (case-insensitive)
    pub fn parse(value: &str) -> Result<Self, UserRoleError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(UserRole::Parent),
            "child" => Ok(UserRole::Child),
            _ => Err(UserRoleError::Unknown(value.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserRoleError {
    Unknown(String),
}

impl fmt::Display for UserRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRoleError::Unknown(value) => write!(f, "Unknown account role: {}", value),
        }
    }
}

impl std::error::Error for UserRoleError {}

/// Represents a child profile tracked by one or more parents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birth_date: Option<String>, // ISO 8601 date format (YYYY-MM-DD)
    pub grade: Option<String>,
    pub school_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new child profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChildRequest {
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Request for updating an existing child profile.
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateChildRequest {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub grade: Option<String>,
    pub school_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Response after creating or updating a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

/// Response containing a list of children
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Link between a child profile and the child's own login account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildUserLink {
    pub id: String,
    pub child_id: String,
    pub user_id: String,
    pub created_at: String, // RFC 3339 timestamp
}

/// Invite code a parent shares with a child, format `XXXX-XXXX`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InviteCodeResponse {
    pub child_id: String,
    pub invite_code: String,
}

/// Request sent by a child account to redeem an invite code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedeemInviteCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedeemInviteCodeResponse {
    pub link: ChildUserLink,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildLinkResponse {
    pub link: Option<ChildUserLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildLinkListResponse {
    pub links: Vec<ChildUserLink>,
}

/// Request for setting the active child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetActiveChildRequest {
    pub child_id: String,
}

/// Response after setting active child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetActiveChildResponse {
    pub success_message: String,
    pub active_child: Child,
}

/// Response containing the active child information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveChildResponse {
    pub active_child: Option<Child>,
}

/// Lets update requests tell a missing field (`None`) from an explicit
/// `null` (`Some(None)`), which clears the field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A school subject of a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub child_id: String,
    pub name: String,
    pub color: String, // #RRGGBB
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSubjectRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectResponse {
    pub subject: Subject,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectListResponse {
    pub subjects: Vec<Subject>,
}

/// A homework assignment, with its subject when it has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    pub id: String,
    pub child_id: String,
    pub subject_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String, // YYYY-MM-DD
    pub completed: bool,
    pub completed_at: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateHomeworkRequest {
    #[serde(default)]
    pub subject_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
}

/// Partial homework update; `null` clears `subject_id` or `description`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateHomeworkRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Option<String>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetHomeworkCompletedRequest {
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeworkResponse {
    pub homework: Homework,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeworkListResponse {
    pub homework: Vec<Homework>,
}

/// Kind of graded work, under the school's names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "prova")]
    Test,
    #[serde(rename = "trabalho")]
    Assignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub child_id: String,
    pub subject_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub exam_type: ExamType,
    pub exam_date: String, // YYYY-MM-DD
    pub grade: Option<f64>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateExamRequest {
    #[serde(default)]
    pub subject_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `prova` or `trabalho`
    pub exam_type: String,
    pub exam_date: String,
    #[serde(default)]
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateExamRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Option<String>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub exam_type: Option<String>,
    pub exam_date: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub grade: Option<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamResponse {
    pub exam: Exam,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamListResponse {
    pub exams: Vec<Exam>,
}

/// Calendar event; times are local `YYYY-MM-DDTHH:MM:SS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub all_day: bool,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateScheduleRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateScheduleRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Option<String>>,
    pub all_day: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEventResponse {
    pub event: ScheduleEvent,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEventListResponse {
    pub events: Vec<ScheduleEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub content: Option<String>,
    pub important: bool,
    pub created_by: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub important: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    pub important: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementResponse {
    pub announcement: Announcement,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementListResponse {
    pub announcements: Vec<Announcement>,
}

/// Dashboard of one child for `date`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaResponse {
    pub child_id: String,
    pub date: String,
    pub homework_due_today: Vec<Homework>,
    pub upcoming_homework: Vec<Homework>,
    pub completed_today: Vec<Homework>,
    pub overdue_homework: Vec<Homework>,
    pub upcoming_exams: Vec<Exam>,
    pub todays_schedule: Vec<ScheduleEvent>,
}

/// Error body returned by every failing API call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Stable machine-readable kind, e.g. `CODE_NOT_FOUND`
    pub code: String,
    /// User-displayable message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
