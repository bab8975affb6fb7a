use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::{format_date, parse_date, parse_timestamp};
use super::subject_repository::{joined_subject, JOINED_SUBJECT_COLUMNS};
use crate::domain::models::{Exam, ExamType};
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ExamStorage;

/// Repository for exam operations
#[derive(Clone)]
pub struct ExamRepository {
    db: DbConnection,
}

impl ExamRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn select(filter: &str) -> String {
        format!(
            r#"
            SELECT e.id, e.child_id, e.subject_id, e.title, e.description, e.exam_type,
                   e.exam_date, e.grade, e.created_by, e.created_at, e.updated_at,
                   {}
            FROM exams e
            LEFT JOIN subjects s ON s.id = e.subject_id
            {}
            "#,
            JOINED_SUBJECT_COLUMNS, filter
        )
    }
}

fn exam_from_row(row: &SqliteRow) -> Result<Exam> {
    let raw_type: String = row.get("exam_type");
    let exam_type =
        ExamType::parse(&raw_type).ok_or_else(|| anyhow!("Unknown exam type {}", raw_type))?;

    Ok(Exam {
        id: row.get("id"),
        child_id: row.get("child_id"),
        subject_id: row.get("subject_id"),
        title: row.get("title"),
        description: row.get("description"),
        exam_type,
        exam_date: parse_date(&row.get::<String, _>("exam_date"))?,
        grade: row.get("grade"),
        created_by: row.get("created_by"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
        subject: joined_subject(row)?,
    })
}

#[async_trait]
impl ExamStorage for ExamRepository {
    async fn store_exam(&self, exam: &Exam) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO exams (id, child_id, subject_id, title, description, exam_type,
                               exam_date, grade, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&exam.id)
        .bind(&exam.child_id)
        .bind(&exam.subject_id)
        .bind(&exam.title)
        .bind(&exam.description)
        .bind(exam.exam_type.as_str())
        .bind(format_date(exam.exam_date))
        .bind(exam.grade)
        .bind(&exam.created_by)
        .bind(exam.created_at.to_rfc3339())
        .bind(exam.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_exam(&self, exam_id: &str) -> StoreResult<Option<Exam>> {
        let row = sqlx::query(&Self::select("WHERE e.id = ?"))
            .bind(exam_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(exam_from_row).transpose()?)
    }

    async fn list_exams_for_child(&self, child_id: &str) -> StoreResult<Vec<Exam>> {
        let rows = sqlx::query(&Self::select(
            "WHERE e.child_id = ? ORDER BY e.exam_date ASC, e.ROWID ASC",
        ))
        .bind(child_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(exam_from_row).collect::<Result<Vec<_>>>()?)
    }

    async fn update_exam(&self, exam: &Exam) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE exams
            SET subject_id = ?, title = ?, description = ?, exam_type = ?,
                exam_date = ?, grade = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&exam.subject_id)
        .bind(&exam.title)
        .bind(&exam.description)
        .bind(exam.exam_type.as_str())
        .bind(format_date(exam.exam_date))
        .bind(exam.grade)
        .bind(exam.updated_at.to_rfc3339())
        .bind(&exam.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_exam(&self, exam_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM exams WHERE id = ?")
            .bind(exam_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::child_repository::insert_test_child;
    use chrono::{NaiveDate, Utc};

    fn exam(child_id: &str, title: &str, exam_type: ExamType, day: u32) -> Exam {
        let now = Utc::now();
        Exam {
            id: Exam::generate_id(),
            child_id: child_id.to_string(),
            subject_id: None,
            title: title.to_string(),
            description: None,
            exam_type,
            exam_date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            grade: None,
            created_by: None,
            created_at: now,
            updated_at: now,
            subject: None,
        }
    }

    #[tokio::test]
    async fn test_exams_are_listed_by_date() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = ExamRepository::new(db);

        repo.store_exam(&exam(&child_id, "Science fair", ExamType::Assignment, 20)).await.unwrap();
        repo.store_exam(&exam(&child_id, "Math test", ExamType::Test, 4)).await.unwrap();

        let exams = repo.list_exams_for_child(&child_id).await.unwrap();
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].title, "Math test");
        assert_eq!(exams[0].exam_type, ExamType::Test);
        assert_eq!(exams[1].exam_type, ExamType::Assignment);
    }

    #[tokio::test]
    async fn test_grade_is_recorded_and_cleared() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = ExamRepository::new(db);

        let mut item = exam(&child_id, "Math test", ExamType::Test, 4);
        repo.store_exam(&item).await.unwrap();

        item.grade = Some(8.5);
        repo.update_exam(&item).await.unwrap();
        assert_eq!(repo.get_exam(&item.id).await.unwrap().unwrap().grade, Some(8.5));

        item.grade = None;
        repo.update_exam(&item).await.unwrap();
        assert!(repo.get_exam(&item.id).await.unwrap().unwrap().grade.is_none());

        assert!(repo.delete_exam(&item.id).await.unwrap());
        assert!(repo.get_exam(&item.id).await.unwrap().is_none());
    }
}
