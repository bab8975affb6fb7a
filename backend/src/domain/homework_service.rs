use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::access::{
    check_subject, optional_text, parse_date, required_text, ChildAccess, RecordError,
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};
use super::commands::homework::{CreateHomeworkCommand, UpdateHomeworkCommand};
use super::models::{Homework, SessionContext};
use crate::storage::{HomeworkStorage, SubjectStorage};

/// Service for the homework of a child.
///
/// Parents that own the child manage it; the linked child account may only
/// read it and tick items off.
#[derive(Clone)]
pub struct HomeworkService {
    homework: Arc<dyn HomeworkStorage>,
    subjects: Arc<dyn SubjectStorage>,
    access: ChildAccess,
}

impl HomeworkService {
    pub fn new(homework: Arc<dyn HomeworkStorage>, subjects: Arc<dyn SubjectStorage>, access: ChildAccess) -> Self {
        Self {
            homework,
            subjects,
            access,
        }
    }

    /// Homework of a child ordered by due date
    pub async fn list_homework(&self, session: &SessionContext, child_id: &str) -> Result<Vec<Homework>, RecordError> {
        self.access.ensure_visible(session, child_id).await?;
        let homework = self.homework.list_homework_for_child(child_id).await?;
        info!("Found {} homework items for child {}", homework.len(), child_id);
        Ok(homework)
    }

    pub async fn get_homework(&self, session: &SessionContext, homework_id: &str) -> Result<Homework, RecordError> {
        let homework = self.load(homework_id).await?;
        self.access.ensure_visible(session, &homework.child_id).await?;
        Ok(homework)
    }

    pub async fn create_homework(
        &self,
        session: &SessionContext,
        command: CreateHomeworkCommand,
    ) -> Result<Homework, RecordError> {
        self.access.ensure_manageable(session, &command.child_id).await?;
        info!("Creating homework: title={}, child={}", command.title, command.child_id);

        let subject_id = check_subject(self.subjects.as_ref(), &command.child_id, command.subject_id).await?;
        let now = Utc::now();
        let homework = Homework {
            id: Homework::generate_id(),
            subject_id,
            title: required_text("Title", &command.title, MAX_TITLE_LENGTH)?,
            description: optional_text("Description", command.description, MAX_DESCRIPTION_LENGTH)?,
            due_date: parse_date("Due date", &command.due_date)?,
            child_id: command.child_id,
            completed: false,
            completed_at: None,
            created_by: Some(session.account_id.clone()),
            created_at: now,
            updated_at: now,
            subject: None,
        };
        self.homework.store_homework(&homework).await?;

        info!("Created homework: {} with ID: {}", homework.title, homework.id);
        self.load(&homework.id).await
    }

    pub async fn update_homework(
        &self,
        session: &SessionContext,
        homework_id: &str,
        command: UpdateHomeworkCommand,
    ) -> Result<Homework, RecordError> {
        let mut homework = self.load(homework_id).await?;
        self.access.ensure_manageable(session, &homework.child_id).await?;

        if let Some(subject_id) = command.subject_id {
            homework.subject_id = check_subject(self.subjects.as_ref(), &homework.child_id, subject_id).await?;
        }
        if let Some(title) = command.title {
            homework.title = required_text("Title", &title, MAX_TITLE_LENGTH)?;
        }
        if let Some(description) = command.description {
            homework.description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(due_date) = command.due_date {
            homework.due_date = parse_date("Due date", &due_date)?;
        }
        homework.updated_at = Utc::now();
        self.homework.update_homework(&homework).await?;

        info!("Updated homework: {}", homework.id);
        self.load(homework_id).await
    }

    /// Tick off or reopen a homework item. Allowed to any account that can
    /// see the child, including the linked child account.
    pub async fn set_homework_completed(
        &self,
        session: &SessionContext,
        homework_id: &str,
        completed: bool,
    ) -> Result<Homework, RecordError> {
        let mut homework = self.load(homework_id).await?;
        self.access.ensure_visible(session, &homework.child_id).await?;

        if homework.completed != completed {
            homework.set_completed(completed, Utc::now());
            self.homework.update_homework(&homework).await?;
        }

        info!("Homework {} completed={} by {}", homework.id, completed, session.account_id);
        Ok(homework)
    }

    pub async fn delete_homework(&self, session: &SessionContext, homework_id: &str) -> Result<(), RecordError> {
        let homework = self.load(homework_id).await?;
        self.access.ensure_manageable(session, &homework.child_id).await?;

        if !self.homework.delete_homework(homework_id).await? {
            return Err(RecordError::NotFound("Homework", homework_id.to_string()));
        }
        info!("Deleted homework: {}", homework_id);
        Ok(())
    }

    async fn load(&self, homework_id: &str) -> Result<Homework, RecordError> {
        self.homework
            .get_homework(homework_id)
            .await?
            .ok_or_else(|| RecordError::NotFound("Homework", homework_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ChildUserLink, Subject};
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{
        ChildUserLinkRepository, ChildUserLinkStorage, DbConnection, HomeworkRepository, ParentChildRepository,
        SubjectRepository,
    };
    use chrono::NaiveDate;

    struct TestContext {
        service: HomeworkService,
        subjects: Arc<SubjectRepository>,
        links: Arc<ChildUserLinkRepository>,
        db: DbConnection,
        child_id: String,
    }

    async fn setup_test() -> TestContext {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let links = Arc::new(ChildUserLinkRepository::new(db.clone()));
        let subjects = Arc::new(SubjectRepository::new(db.clone()));
        let access = ChildAccess::new(Arc::new(ParentChildRepository::new(db.clone())), links.clone());
        let service = HomeworkService::new(Arc::new(HomeworkRepository::new(db.clone())), subjects.clone(), access);
        TestContext {
            service,
            subjects,
            links,
            db,
            child_id,
        }
    }

    fn create_command(child_id: &str, title: &str, due_date: &str) -> CreateHomeworkCommand {
        CreateHomeworkCommand {
            child_id: child_id.to_string(),
            subject_id: None,
            title: title.to_string(),
            description: Some("  ".to_string()),
            due_date: due_date.to_string(),
        }
    }

    async fn store_subject(ctx: &TestContext, child_id: &str, name: &str) -> Subject {
        let subject = Subject {
            id: Subject::generate_id(),
            child_id: child_id.to_string(),
            name: name.to_string(),
            color: "#10B981".to_string(),
            created_at: Utc::now(),
        };
        ctx.subjects.store_subject(&subject).await.unwrap();
        subject
    }

    #[tokio::test]
    async fn test_create_homework_with_subject() {
        let ctx = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let math = store_subject(&ctx, &ctx.child_id, "Math").await;

        let mut command = create_command(&ctx.child_id, " Fractions ", "2024-09-03");
        command.subject_id = Some(math.id.clone());
        let homework = ctx.service.create_homework(&parent, command).await.unwrap();

        assert_eq!(homework.title, "Fractions");
        assert!(homework.description.is_none());
        assert_eq!(homework.due_date, NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
        assert_eq!(homework.created_by.as_deref(), Some("parent-1"));
        assert_eq!(homework.subject.map(|s| s.name), Some("Math".to_string()));
        assert!(!homework.completed);
    }

    #[tokio::test]
    async fn test_create_homework_validation() {
        let ctx = setup_test().await;
        let parent = SessionContext::parent("parent-1");

        for bad_date in ["2024-13-01", "03/09/2024", ""] {
            let result = ctx
                .service
                .create_homework(&parent, create_command(&ctx.child_id, "Essay", bad_date))
                .await;
            assert!(matches!(result, Err(RecordError::Validation(_))), "{} should be rejected", bad_date);
        }
        assert!(ctx
            .service
            .create_homework(&parent, create_command(&ctx.child_id, " ", "2024-09-03"))
            .await
            .is_err());

        // A subject of a sibling cannot label this child's homework
        let sibling = insert_test_child(&ctx.db, "Bia").await;
        let art = store_subject(&ctx, &sibling, "Art").await;
        let mut command = create_command(&ctx.child_id, "Drawing", "2024-09-03");
        command.subject_id = Some(art.id);
        assert!(matches!(
            ctx.service.create_homework(&parent, command).await,
            Err(RecordError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_linked_child_reads_and_completes_but_cannot_edit() {
        let ctx = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let homework = ctx
            .service
            .create_homework(&parent, create_command(&ctx.child_id, "Essay", "2024-09-03"))
            .await
            .unwrap();

        let kid = SessionContext::child("kid-1");
        assert!(matches!(
            ctx.service.list_homework(&kid, &ctx.child_id).await,
            Err(RecordError::ChildNotVisible)
        ));

        ctx.links
            .insert_link(&ChildUserLink::new(&ctx.child_id, "kid-1", Utc::now()))
            .await
            .unwrap();
        assert_eq!(ctx.service.list_homework(&kid, &ctx.child_id).await.unwrap().len(), 1);

        let done = ctx.service.set_homework_completed(&kid, &homework.id, true).await.unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let reopened = ctx.service.set_homework_completed(&parent, &homework.id, false).await.unwrap();
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());

        assert!(matches!(
            ctx.service
                .update_homework(&kid, &homework.id, UpdateHomeworkCommand::default())
                .await,
            Err(RecordError::ParentOnly)
        ));
        assert!(matches!(
            ctx.service.delete_homework(&kid, &homework.id).await,
            Err(RecordError::ParentOnly)
        ));
    }

    #[tokio::test]
    async fn test_update_clears_nullable_fields() {
        let ctx = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let math = store_subject(&ctx, &ctx.child_id, "Math").await;

        let mut command = create_command(&ctx.child_id, "Fractions", "2024-09-03");
        command.subject_id = Some(math.id);
        command.description = Some("Pages 10-12".to_string());
        let homework = ctx.service.create_homework(&parent, command).await.unwrap();

        // Untouched fields survive
        let updated = ctx
            .service
            .update_homework(
                &parent,
                &homework.id,
                UpdateHomeworkCommand {
                    due_date: Some("2024-09-05".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Pages 10-12"));
        assert!(updated.subject.is_some());

        let cleared = ctx
            .service
            .update_homework(
                &parent,
                &homework.id,
                UpdateHomeworkCommand {
                    subject_id: Some(None),
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.subject_id.is_none());
        assert!(cleared.subject.is_none());
        assert!(cleared.description.is_none());
        assert_eq!(cleared.due_date, NaiveDate::from_ymd_opt(2024, 9, 5).unwrap());
    }

    #[tokio::test]
    async fn test_delete_homework() {
        let ctx = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let homework = ctx
            .service
            .create_homework(&parent, create_command(&ctx.child_id, "Essay", "2024-09-03"))
            .await
            .unwrap();

        assert!(ctx
            .service
            .delete_homework(&SessionContext::parent("parent-2"), &homework.id)
            .await
            .is_err());
        ctx.service.delete_homework(&parent, &homework.id).await.unwrap();
        assert!(matches!(
            ctx.service.get_homework(&parent, &homework.id).await,
            Err(RecordError::NotFound("Homework", _))
        ));
    }
}
