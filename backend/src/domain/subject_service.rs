use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::access::{parse_color, required_text, ChildAccess, RecordError};
use super::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};
use super::models::{SessionContext, Subject};
use crate::storage::SubjectStorage;

const MAX_SUBJECT_NAME_LENGTH: usize = 50;

/// Service for the school subjects of a child
#[derive(Clone)]
pub struct SubjectService {
    subjects: Arc<dyn SubjectStorage>,
    access: ChildAccess,
}

impl SubjectService {
    pub fn new(subjects: Arc<dyn SubjectStorage>, access: ChildAccess) -> Self {
        Self { subjects, access }
    }

    pub async fn list_subjects(&self, session: &SessionContext, child_id: &str) -> Result<Vec<Subject>, RecordError> {
        self.access.ensure_visible(session, child_id).await?;
        let subjects = self.subjects.list_subjects_for_child(child_id).await?;
        info!("Found {} subjects for child {}", subjects.len(), child_id);
        Ok(subjects)
    }

    pub async fn get_subject(&self, session: &SessionContext, subject_id: &str) -> Result<Subject, RecordError> {
        let subject = self.load(subject_id).await?;
        self.access.ensure_visible(session, &subject.child_id).await?;
        Ok(subject)
    }

    pub async fn create_subject(
        &self,
        session: &SessionContext,
        command: CreateSubjectCommand,
    ) -> Result<Subject, RecordError> {
        self.access.ensure_manageable(session, &command.child_id).await?;
        info!("Creating subject: name={}, child={}", command.name, command.child_id);

        let subject = Subject {
            id: Subject::generate_id(),
            child_id: command.child_id,
            name: required_text("Subject name", &command.name, MAX_SUBJECT_NAME_LENGTH)?,
            color: parse_color(command.color)?,
            created_at: Utc::now(),
        };
        self.subjects.store_subject(&subject).await?;

        info!("Created subject: {} with ID: {}", subject.name, subject.id);
        Ok(subject)
    }

    pub async fn update_subject(
        &self,
        session: &SessionContext,
        subject_id: &str,
        command: UpdateSubjectCommand,
    ) -> Result<Subject, RecordError> {
        let mut subject = self.load(subject_id).await?;
        self.access.ensure_manageable(session, &subject.child_id).await?;

        if let Some(name) = command.name {
            subject.name = required_text("Subject name", &name, MAX_SUBJECT_NAME_LENGTH)?;
        }
        if let Some(color) = command.color {
            subject.color = parse_color(Some(color))?;
        }
        self.subjects.update_subject(&subject).await?;

        info!("Updated subject: {}", subject.id);
        Ok(subject)
    }

    /// Homework and exams labelled with the subject keep existing without it
    pub async fn delete_subject(&self, session: &SessionContext, subject_id: &str) -> Result<(), RecordError> {
        let subject = self.load(subject_id).await?;
        self.access.ensure_manageable(session, &subject.child_id).await?;

        if !self.subjects.delete_subject(subject_id).await? {
            return Err(RecordError::NotFound("Subject", subject_id.to_string()));
        }
        info!("Deleted subject: {}", subject_id);
        Ok(())
    }

    async fn load(&self, subject_id: &str) -> Result<Subject, RecordError> {
        self.subjects
            .get_subject(subject_id)
            .await?
            .ok_or_else(|| RecordError::NotFound("Subject", subject_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::DEFAULT_SUBJECT_COLOR;
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{ChildUserLinkRepository, DbConnection, ParentChildRepository, SubjectRepository};

    async fn setup_test() -> (SubjectService, String) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let access = ChildAccess::new(
            Arc::new(ParentChildRepository::new(db.clone())),
            Arc::new(ChildUserLinkRepository::new(db.clone())),
        );
        (SubjectService::new(Arc::new(SubjectRepository::new(db)), access), child_id)
    }

    fn create_command(child_id: &str, name: &str) -> CreateSubjectCommand {
        CreateSubjectCommand {
            child_id: child_id.to_string(),
            name: name.to_string(),
            color: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_subjects() {
        let (service, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");

        let science = service.create_subject(&parent, create_command(&child_id, " Science ")).await.unwrap();
        assert_eq!(science.name, "Science");
        assert_eq!(science.color, DEFAULT_SUBJECT_COLOR);
        service.create_subject(&parent, create_command(&child_id, "Art")).await.unwrap();

        let names: Vec<String> = service
            .list_subjects(&parent, &child_id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Art", "Science"]);

        let mut too_long = create_command(&child_id, &"x".repeat(51));
        assert!(matches!(
            service.create_subject(&parent, too_long.clone()).await,
            Err(RecordError::Validation(_))
        ));
        too_long.name = "Music".to_string();
        too_long.color = Some("blue".to_string());
        assert!(service.create_subject(&parent, too_long).await.is_err());
    }

    #[tokio::test]
    async fn test_subjects_of_unowned_child_are_hidden() {
        let (service, child_id) = setup_test().await;
        let stranger = SessionContext::parent("parent-2");

        assert!(matches!(
            service.list_subjects(&stranger, &child_id).await,
            Err(RecordError::ChildNotVisible)
        ));
        assert!(matches!(
            service.create_subject(&stranger, create_command(&child_id, "Math")).await,
            Err(RecordError::ChildNotVisible)
        ));

        let math = service
            .create_subject(&SessionContext::parent("parent-1"), create_command(&child_id, "Math"))
            .await
            .unwrap();
        assert!(service.get_subject(&stranger, &math.id).await.is_err());
        assert!(service.delete_subject(&stranger, &math.id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete_subject() {
        let (service, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let math = service.create_subject(&parent, create_command(&child_id, "Math")).await.unwrap();

        let updated = service
            .update_subject(
                &parent,
                &math.id,
                UpdateSubjectCommand {
                    name: None,
                    color: Some("#ef4444".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Math");
        assert_eq!(updated.color, "#EF4444");

        service.delete_subject(&parent, &math.id).await.unwrap();
        assert!(matches!(
            service.get_subject(&parent, &math.id).await,
            Err(RecordError::NotFound("Subject", _))
        ));
    }
}
