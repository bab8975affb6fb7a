use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::{format_date, parse_date, parse_optional_timestamp, parse_timestamp};
use super::subject_repository::{joined_subject, JOINED_SUBJECT_COLUMNS};
use crate::domain::models::Homework;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::HomeworkStorage;

/// Repository for homework operations
#[derive(Clone)]
pub struct HomeworkRepository {
    db: DbConnection,
}

impl HomeworkRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn select(filter: &str) -> String {
        format!(
            r#"
            SELECT h.id, h.child_id, h.subject_id, h.title, h.description, h.due_date,
                   h.completed, h.completed_at, h.created_by, h.created_at, h.updated_at,
                   {}
            FROM homework h
            LEFT JOIN subjects s ON s.id = h.subject_id
            {}
            "#,
            JOINED_SUBJECT_COLUMNS, filter
        )
    }
}

fn homework_from_row(row: &SqliteRow) -> Result<Homework> {
    Ok(Homework {
        id: row.get("id"),
        child_id: row.get("child_id"),
        subject_id: row.get("subject_id"),
        title: row.get("title"),
        description: row.get("description"),
        due_date: parse_date(&row.get::<String, _>("due_date"))?,
        completed: row.get("completed"),
        completed_at: parse_optional_timestamp(row.get("completed_at"))?,
        created_by: row.get("created_by"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
        subject: joined_subject(row)?,
    })
}

#[async_trait]
impl HomeworkStorage for HomeworkRepository {
    async fn store_homework(&self, homework: &Homework) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO homework (id, child_id, subject_id, title, description, due_date,
                                  completed, completed_at, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&homework.id)
        .bind(&homework.child_id)
        .bind(&homework.subject_id)
        .bind(&homework.title)
        .bind(&homework.description)
        .bind(format_date(homework.due_date))
        .bind(homework.completed)
        .bind(homework.completed_at.map(|at| at.to_rfc3339()))
        .bind(&homework.created_by)
        .bind(homework.created_at.to_rfc3339())
        .bind(homework.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_homework(&self, homework_id: &str) -> StoreResult<Option<Homework>> {
        let row = sqlx::query(&Self::select("WHERE h.id = ?"))
            .bind(homework_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(homework_from_row).transpose()?)
    }

    async fn list_homework_for_child(&self, child_id: &str) -> StoreResult<Vec<Homework>> {
        let rows = sqlx::query(&Self::select(
            "WHERE h.child_id = ? ORDER BY h.due_date ASC, h.ROWID ASC",
        ))
        .bind(child_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(homework_from_row).collect::<Result<Vec<_>>>()?)
    }

    async fn update_homework(&self, homework: &Homework) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE homework
            SET subject_id = ?, title = ?, description = ?, due_date = ?,
                completed = ?, completed_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&homework.subject_id)
        .bind(&homework.title)
        .bind(&homework.description)
        .bind(format_date(homework.due_date))
        .bind(homework.completed)
        .bind(homework.completed_at.map(|at| at.to_rfc3339()))
        .bind(homework.updated_at.to_rfc3339())
        .bind(&homework.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_homework(&self, homework_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM homework WHERE id = ?")
            .bind(homework_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Subject;
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::repositories::{ChildRepository, SubjectRepository};
    use crate::storage::traits::{ChildStorage, SubjectStorage};
    use chrono::{NaiveDate, Utc};

    fn homework(child_id: &str, title: &str, due: (i32, u32, u32)) -> Homework {
        let now = Utc::now();
        Homework {
            id: Homework::generate_id(),
            child_id: child_id.to_string(),
            subject_id: None,
            title: title.to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            completed: false,
            completed_at: None,
            created_by: Some("parent-1".to_string()),
            created_at: now,
            updated_at: now,
            subject: None,
        }
    }

    #[tokio::test]
    async fn test_homework_is_listed_by_due_date() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = HomeworkRepository::new(db);

        repo.store_homework(&homework(&child_id, "Essay", (2024, 9, 10))).await.unwrap();
        repo.store_homework(&homework(&child_id, "Worksheet", (2024, 9, 3))).await.unwrap();
        repo.store_homework(&homework(&child_id, "Reading", (2024, 9, 10))).await.unwrap();

        let titles: Vec<String> = repo
            .list_homework_for_child(&child_id)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(titles, vec!["Worksheet", "Essay", "Reading"]);
    }

    #[tokio::test]
    async fn test_reads_join_subject_and_deleting_subject_clears_reference() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let subjects = SubjectRepository::new(db.clone());
        let repo = HomeworkRepository::new(db);

        let math = Subject {
            id: Subject::generate_id(),
            child_id: child_id.clone(),
            name: "Math".to_string(),
            color: "#10B981".to_string(),
            created_at: Utc::now(),
        };
        subjects.store_subject(&math).await.unwrap();

        let mut item = homework(&child_id, "Fractions", (2024, 9, 3));
        item.subject_id = Some(math.id.clone());
        repo.store_homework(&item).await.unwrap();

        let stored = repo.get_homework(&item.id).await.unwrap().expect("Homework should exist");
        assert_eq!(stored.subject.as_ref().map(|s| s.name.as_str()), Some("Math"));
        assert_eq!(stored.subject.as_ref().map(|s| s.color.as_str()), Some("#10B981"));

        subjects.delete_subject(&math.id).await.unwrap();
        let stored = repo.get_homework(&item.id).await.unwrap().expect("Homework should survive");
        assert!(stored.subject_id.is_none());
        assert!(stored.subject.is_none());
    }

    #[tokio::test]
    async fn test_update_completion_and_cascade_on_child_delete() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = HomeworkRepository::new(db.clone());

        let mut item = homework(&child_id, "Fractions", (2024, 9, 3));
        repo.store_homework(&item).await.unwrap();

        item.set_completed(true, Utc::now());
        repo.update_homework(&item).await.unwrap();
        let stored = repo.get_homework(&item.id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert!(stored.completed_at.is_some());

        ChildRepository::new(db).delete_child(&child_id).await.unwrap();
        assert!(repo.get_homework(&item.id).await.unwrap().is_none());
        assert!(!repo.delete_homework(&item.id).await.unwrap());
    }
}
