use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::{parse_optional_timestamp, parse_timestamp};
use crate::domain::models::Subject;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::SubjectStorage;

/// Subject columns for queries that `LEFT JOIN subjects s`
pub(crate) const JOINED_SUBJECT_COLUMNS: &str =
    "s.child_id AS subject_child_id, s.name AS subject_name, s.color AS subject_color, s.created_at AS subject_created_at";

/// Repository for subject operations
#[derive(Clone)]
pub struct SubjectRepository {
    db: DbConnection,
}

impl SubjectRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn subject_from_row(row: &SqliteRow) -> Result<Subject> {
    Ok(Subject {
        id: row.get("id"),
        child_id: row.get("child_id"),
        name: row.get("name"),
        color: row.get("color"),
        created_at: parse_timestamp(row.get("created_at"))?,
    })
}

/// Rebuild the subject of a joined row. `None` when the row has no subject
/// or the reference points at nothing.
pub(crate) fn joined_subject(row: &SqliteRow) -> Result<Option<Subject>> {
    let subject_id: Option<String> = row.get("subject_id");
    let name: Option<String> = row.get("subject_name");
    let (Some(id), Some(name)) = (subject_id, name) else {
        return Ok(None);
    };
    let Some(created_at) = parse_optional_timestamp(row.get("subject_created_at"))? else {
        return Ok(None);
    };

    Ok(Some(Subject {
        id,
        child_id: row.get("subject_child_id"),
        name,
        color: row.get("subject_color"),
        created_at,
    }))
}

#[async_trait]
impl SubjectStorage for SubjectRepository {
    async fn store_subject(&self, subject: &Subject) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subjects (id, child_id, name, color, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subject.id)
        .bind(&subject.child_id)
        .bind(&subject.name)
        .bind(&subject.color)
        .bind(subject.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_subject(&self, subject_id: &str) -> StoreResult<Option<Subject>> {
        let row = sqlx::query(
            "SELECT id, child_id, name, color, created_at FROM subjects WHERE id = ?",
        )
        .bind(subject_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(subject_from_row).transpose()?)
    }

    async fn list_subjects_for_child(&self, child_id: &str) -> StoreResult<Vec<Subject>> {
        let rows = sqlx::query(
            r#"
            SELECT id, child_id, name, color, created_at
            FROM subjects
            WHERE child_id = ?
            ORDER BY name ASC, ROWID ASC
            "#,
        )
        .bind(child_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(subject_from_row).collect::<Result<Vec<_>>>()?)
    }

    async fn update_subject(&self, subject: &Subject) -> StoreResult<()> {
        sqlx::query("UPDATE subjects SET name = ?, color = ? WHERE id = ?")
            .bind(&subject.name)
            .bind(&subject.color)
            .bind(&subject.id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_subject(&self, subject_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?")
            .bind(subject_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
