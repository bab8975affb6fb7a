//! Who may see and manage the school records of a child, plus the field
//! rules shared by the record services.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::warn;

use super::models::{SessionContext, UserRole};
use crate::storage::{ChildUserLinkStorage, ParentChildStorage, StoreError, SubjectStorage};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const DEFAULT_SUBJECT_COLOR: &str = "#3B82F6";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("Child is not visible to this account")]
    ChildNotVisible,

    #[error("Only parent accounts can manage school records")]
    ParentOnly,

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Ownership checks against the parent relations and child-account links
#[derive(Clone)]
pub struct ChildAccess {
    relations: Arc<dyn ParentChildStorage>,
    links: Arc<dyn ChildUserLinkStorage>,
}

impl ChildAccess {
    pub fn new(relations: Arc<dyn ParentChildStorage>, links: Arc<dyn ChildUserLinkStorage>) -> Self {
        Self { relations, links }
    }

    /// Parents see the children they own, child accounts their linked child
    pub async fn ensure_visible(&self, session: &SessionContext, child_id: &str) -> Result<(), RecordError> {
        let visible = match session.role {
            UserRole::Parent => self.relations.relation_exists(&session.account_id, child_id).await?,
            UserRole::Child => self
                .links
                .get_link_by_user(&session.account_id)
                .await?
                .is_some_and(|link| link.child_id == child_id),
        };

        if !visible {
            warn!("Account {} cannot see child {}", session.account_id, child_id);
            return Err(RecordError::ChildNotVisible);
        }
        Ok(())
    }

    /// Create, update and delete need a parent that owns the child
    pub async fn ensure_manageable(&self, session: &SessionContext, child_id: &str) -> Result<(), RecordError> {
        if !session.is_parent() {
            return Err(RecordError::ParentOnly);
        }
        self.ensure_visible(session, child_id).await
    }
}

/// Resolve an optional subject reference; it must belong to `child_id`.
/// Blank ids mean no subject.
pub async fn check_subject(
    subjects: &dyn SubjectStorage,
    child_id: &str,
    subject_id: Option<String>,
) -> Result<Option<String>, RecordError> {
    let Some(subject_id) = subject_id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    match subjects.get_subject(&subject_id).await? {
        Some(subject) if subject.child_id == child_id => Ok(Some(subject.id)),
        Some(_) => Err(RecordError::Validation(
            "Subject belongs to another child".to_string(),
        )),
        None => Err(RecordError::NotFound("Subject", subject_id)),
    }
}

/// Trimmed, non-empty text of at most `max` characters
pub fn required_text(label: &str, value: &str, max: usize) -> Result<String, RecordError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RecordError::Validation(format!("{} cannot be empty", label)));
    }
    check_length(label, value, max)?;
    Ok(value.to_string())
}

/// Trimmed optional text; blank becomes `None`
pub fn optional_text(label: &str, value: Option<String>, max: usize) -> Result<Option<String>, RecordError> {
    let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    if let Some(ref v) = value {
        check_length(label, v, max)?;
    }
    Ok(value)
}

fn check_length(label: &str, value: &str, max: usize) -> Result<(), RecordError> {
    if value.chars().count() > max {
        return Err(RecordError::Validation(format!(
            "{} cannot exceed {} characters",
            label, max
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(label: &str, raw: &str) -> Result<NaiveDate, RecordError> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return Err(RecordError::Validation(format!("{} must be in YYYY-MM-DD format", label)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RecordError::Validation(format!("Invalid {}: {}", label.to_lowercase(), raw)))
}

/// Parse a local `YYYY-MM-DDTHH:MM[:SS]` date-time
pub fn parse_date_time(label: &str, raw: &str) -> Result<NaiveDateTime, RecordError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            RecordError::Validation(format!("{} must be in YYYY-MM-DDTHH:MM format", label))
        })
}

/// `#RRGGBB`, upper-cased. `None` or blank picks the default color.
pub fn parse_color(value: Option<String>) -> Result<String, RecordError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_SUBJECT_COLOR.to_string());
    };

    let hex = value.strip_prefix('#').unwrap_or_default();
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RecordError::Validation(format!("Color must be #RRGGBB, got {}", value)));
    }
    Ok(value.to_uppercase())
}

/// Grades run from 0 to 10
pub fn check_grade(grade: Option<f64>) -> Result<Option<f64>, RecordError> {
    match grade {
        Some(g) if !(0.0..=10.0).contains(&g) => Err(RecordError::Validation(format!(
            "Grade must be between 0 and 10, got {}",
            g
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ChildUserLink, Subject};
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{ChildUserLinkRepository, DbConnection, ParentChildRepository, SubjectRepository};
    use chrono::Utc;

    async fn setup_test() -> (DbConnection, ChildAccess, Arc<ChildUserLinkRepository>) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let links = Arc::new(ChildUserLinkRepository::new(db.clone()));
        let access = ChildAccess::new(Arc::new(ParentChildRepository::new(db.clone())), links.clone());
        (db, access, links)
    }

    #[tokio::test]
    async fn test_visibility_per_role() {
        let (db, access, links) = setup_test().await;
        let child_id = insert_test_child(&db, "Ana").await;

        assert!(access.ensure_visible(&SessionContext::parent("parent-1"), &child_id).await.is_ok());
        assert!(matches!(
            access.ensure_visible(&SessionContext::parent("parent-2"), &child_id).await,
            Err(RecordError::ChildNotVisible)
        ));

        let kid = SessionContext::child("kid-1");
        assert!(access.ensure_visible(&kid, &child_id).await.is_err());
        links.insert_link(&ChildUserLink::new(&child_id, "kid-1", Utc::now())).await.unwrap();
        assert!(access.ensure_visible(&kid, &child_id).await.is_ok());

        // Linked child accounts still cannot manage records
        assert!(matches!(
            access.ensure_manageable(&kid, &child_id).await,
            Err(RecordError::ParentOnly)
        ));
        assert!(matches!(
            access.ensure_visible(&SessionContext::parent("parent-1"), "missing-child").await,
            Err(RecordError::ChildNotVisible)
        ));
    }

    #[tokio::test]
    async fn test_subject_must_belong_to_child() {
        let (db, _, _) = setup_test().await;
        let ana = insert_test_child(&db, "Ana").await;
        let bia = insert_test_child(&db, "Bia").await;
        let subjects = SubjectRepository::new(db);
        let math = Subject {
            id: Subject::generate_id(),
            child_id: ana.clone(),
            name: "Math".to_string(),
            color: DEFAULT_SUBJECT_COLOR.to_string(),
            created_at: Utc::now(),
        };
        subjects.store_subject(&math).await.unwrap();

        assert_eq!(check_subject(&subjects, &ana, Some(math.id.clone())).await.unwrap(), Some(math.id.clone()));
        assert_eq!(check_subject(&subjects, &ana, Some("  ".to_string())).await.unwrap(), None);
        assert!(matches!(
            check_subject(&subjects, &bia, Some(math.id.clone())).await,
            Err(RecordError::Validation(_))
        ));
        assert!(matches!(
            check_subject(&subjects, &ana, Some("nope".to_string())).await,
            Err(RecordError::NotFound("Subject", _))
        ));
    }

    #[test]
    fn test_field_rules() {
        assert_eq!(required_text("Title", "  Essay ", 100).unwrap(), "Essay");
        assert!(required_text("Title", "   ", 100).is_err());
        assert!(required_text("Title", &"x".repeat(101), 100).is_err());
        assert_eq!(optional_text("Description", Some(" ".to_string()), 500).unwrap(), None);

        assert!(parse_date("Due date", "2024-02-29").is_ok());
        assert!(parse_date("Due date", "2023-02-29").is_err());
        assert!(parse_date("Due date", "2024-9-1").is_err());

        let with_seconds = parse_date_time("Start time", "2024-09-02T08:30:00").unwrap();
        assert_eq!(parse_date_time("Start time", "2024-09-02T08:30").unwrap(), with_seconds);
        assert!(parse_date_time("Start time", "2024-09-02 08:30").is_err());

        assert_eq!(parse_color(None).unwrap(), DEFAULT_SUBJECT_COLOR);
        assert_eq!(parse_color(Some("#10b981".to_string())).unwrap(), "#10B981");
        assert!(parse_color(Some("10B981".to_string())).is_err());
        assert!(parse_color(Some("#12345".to_string())).is_err());

        assert_eq!(check_grade(Some(10.0)).unwrap(), Some(10.0));
        assert!(check_grade(Some(-0.5)).is_err());
        assert!(check_grade(Some(10.5)).is_err());
        assert!(check_grade(Some(f64::NAN)).is_err());
    }
}
