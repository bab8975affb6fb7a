use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::access::{
    check_grade, check_subject, optional_text, parse_date, required_text, ChildAccess, RecordError,
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};
use super::commands::exam::{CreateExamCommand, UpdateExamCommand};
use super::models::{Exam, ExamType, SessionContext};
use crate::storage::{ExamStorage, SubjectStorage};

/// Service for the exams and graded assignments of a child
#[derive(Clone)]
pub struct ExamService {
    exams: Arc<dyn ExamStorage>,
    subjects: Arc<dyn SubjectStorage>,
    access: ChildAccess,
}

impl ExamService {
    pub fn new(exams: Arc<dyn ExamStorage>, subjects: Arc<dyn SubjectStorage>, access: ChildAccess) -> Self {
        Self {
            exams,
            subjects,
            access,
        }
    }

    /// Exams of a child ordered by date
    pub async fn list_exams(&self, session: &SessionContext, child_id: &str) -> Result<Vec<Exam>, RecordError> {
        self.access.ensure_visible(session, child_id).await?;
        let exams = self.exams.list_exams_for_child(child_id).await?;
        info!("Found {} exams for child {}", exams.len(), child_id);
        Ok(exams)
    }

    pub async fn get_exam(&self, session: &SessionContext, exam_id: &str) -> Result<Exam, RecordError> {
        let exam = self.load(exam_id).await?;
        self.access.ensure_visible(session, &exam.child_id).await?;
        Ok(exam)
    }

    pub async fn create_exam(&self, session: &SessionContext, command: CreateExamCommand) -> Result<Exam, RecordError> {
        self.access.ensure_manageable(session, &command.child_id).await?;
        info!("Creating exam: title={}, child={}", command.title, command.child_id);

        let subject_id = check_subject(self.subjects.as_ref(), &command.child_id, command.subject_id).await?;
        let now = Utc::now();
        let exam = Exam {
            id: Exam::generate_id(),
            subject_id,
            title: required_text("Title", &command.title, MAX_TITLE_LENGTH)?,
            description: optional_text("Description", command.description, MAX_DESCRIPTION_LENGTH)?,
            exam_type: parse_exam_type(&command.exam_type)?,
            exam_date: parse_date("Exam date", &command.exam_date)?,
            grade: check_grade(command.grade)?,
            child_id: command.child_id,
            created_by: Some(session.account_id.clone()),
            created_at: now,
            updated_at: now,
            subject: None,
        };
        self.exams.store_exam(&exam).await?;

        info!("Created exam: {} with ID: {}", exam.title, exam.id);
        self.load(&exam.id).await
    }

    pub async fn update_exam(
        &self,
        session: &SessionContext,
        exam_id: &str,
        command: UpdateExamCommand,
    ) -> Result<Exam, RecordError> {
        let mut exam = self.load(exam_id).await?;
        self.access.ensure_manageable(session, &exam.child_id).await?;

        if let Some(subject_id) = command.subject_id {
            exam.subject_id = check_subject(self.subjects.as_ref(), &exam.child_id, subject_id).await?;
        }
        if let Some(title) = command.title {
            exam.title = required_text("Title", &title, MAX_TITLE_LENGTH)?;
        }
        if let Some(description) = command.description {
            exam.description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(exam_type) = command.exam_type {
            exam.exam_type = parse_exam_type(&exam_type)?;
        }
        if let Some(exam_date) = command.exam_date {
            exam.exam_date = parse_date("Exam date", &exam_date)?;
        }
        if let Some(grade) = command.grade {
            exam.grade = check_grade(grade)?;
        }
        exam.updated_at = Utc::now();
        self.exams.update_exam(&exam).await?;

        info!("Updated exam: {}", exam.id);
        self.load(exam_id).await
    }

    pub async fn delete_exam(&self, session: &SessionContext, exam_id: &str) -> Result<(), RecordError> {
        let exam = self.load(exam_id).await?;
        self.access.ensure_manageable(session, &exam.child_id).await?;

        if !self.exams.delete_exam(exam_id).await? {
            return Err(RecordError::NotFound("Exam", exam_id.to_string()));
        }
        info!("Deleted exam: {}", exam_id);
        Ok(())
    }

    async fn load(&self, exam_id: &str) -> Result<Exam, RecordError> {
        self.exams
            .get_exam(exam_id)
            .await?
            .ok_or_else(|| RecordError::NotFound("Exam", exam_id.to_string()))
    }
}

fn parse_exam_type(raw: &str) -> Result<ExamType, RecordError> {
    ExamType::parse(raw).ok_or_else(|| {
        RecordError::Validation(format!("Exam type must be 'prova' or 'trabalho', got '{}'", raw.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{ChildUserLinkRepository, DbConnection, ExamRepository, ParentChildRepository, SubjectRepository};

    async fn setup_test() -> (ExamService, String) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let access = ChildAccess::new(
            Arc::new(ParentChildRepository::new(db.clone())),
            Arc::new(ChildUserLinkRepository::new(db.clone())),
        );
        let service = ExamService::new(
            Arc::new(ExamRepository::new(db.clone())),
            Arc::new(SubjectRepository::new(db)),
            access,
        );
        (service, child_id)
    }

    fn create_command(child_id: &str, title: &str, exam_date: &str) -> CreateExamCommand {
        CreateExamCommand {
            child_id: child_id.to_string(),
            subject_id: None,
            title: title.to_string(),
            description: None,
            exam_type: "prova".to_string(),
            exam_date: exam_date.to_string(),
            grade: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_exams() {
        let (service, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");

        let mut project = create_command(&child_id, "Volcano project", "2024-10-20");
        project.exam_type = "Trabalho".to_string();
        service.create_exam(&parent, project).await.unwrap();
        let test = service
            .create_exam(&parent, create_command(&child_id, "Math test", "2024-10-04"))
            .await
            .unwrap();
        assert_eq!(test.exam_type, ExamType::Test);
        assert_eq!(test.created_by.as_deref(), Some("parent-1"));

        let exams = service.list_exams(&parent, &child_id).await.unwrap();
        let titles: Vec<&str> = exams.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Math test", "Volcano project"]);
        assert_eq!(exams[1].exam_type, ExamType::Assignment);
    }

    #[tokio::test]
    async fn test_exam_validation() {
        let (service, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");

        let mut command = create_command(&child_id, "Math test", "2024-10-04");
        command.exam_type = "quiz".to_string();
        assert!(matches!(
            service.create_exam(&parent, command).await,
            Err(RecordError::Validation(_))
        ));

        let mut command = create_command(&child_id, "Math test", "2024-10-04");
        command.grade = Some(11.0);
        assert!(matches!(
            service.create_exam(&parent, command).await,
            Err(RecordError::Validation(_))
        ));

        assert!(service
            .create_exam(&parent, create_command(&child_id, "Math test", "2024-10-32"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_grade_update_and_clear() {
        let (service, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let exam = service
            .create_exam(&parent, create_command(&child_id, "Math test", "2024-10-04"))
            .await
            .unwrap();

        let graded = service
            .update_exam(
                &parent,
                &exam.id,
                UpdateExamCommand {
                    grade: Some(Some(9.5)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(graded.grade, Some(9.5));
        assert_eq!(graded.title, "Math test");

        let cleared = service
            .update_exam(
                &parent,
                &exam.id,
                UpdateExamCommand {
                    grade: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.grade.is_none());

        assert!(matches!(
            service
                .update_exam(&SessionContext::child("kid-1"), &exam.id, UpdateExamCommand::default())
                .await,
            Err(RecordError::ParentOnly)
        ));

        service.delete_exam(&parent, &exam.id).await.unwrap();
        assert!(service.get_exam(&parent, &exam.id).await.is_err());
    }
}
