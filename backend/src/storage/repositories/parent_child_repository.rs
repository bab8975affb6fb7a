use async_trait::async_trait;
use sqlx::Row;

use super::child_repository::child_from_row;
use super::columns::parse_timestamp;
use crate::domain::models::{Child, ParentChildRelation};
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ParentChildStorage;

/// Repository for parent-child relations
#[derive(Clone)]
pub struct ParentChildRepository {
    db: DbConnection,
}

impl ParentChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ParentChildStorage for ParentChildRepository {
    async fn list_relations(&self, limit: u32) -> StoreResult<Vec<ParentChildRelation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, parent_id, child_id, created_at
            FROM parent_child
            ORDER BY ROWID ASC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        let mut relations = Vec::with_capacity(rows.len());
        for row in &rows {
            relations.push(ParentChildRelation {
                id: row.get("id"),
                parent_id: row.get("parent_id"),
                child_id: row.get("child_id"),
                created_at: parse_timestamp(row.get("created_at"))?,
            });
        }
        Ok(relations)
    }

    async fn list_children_for_parent(&self, parent_id: &str) -> StoreResult<Vec<Child>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.birth_date, c.grade, c.school_name, c.avatar_url, c.created_at, c.updated_at
            FROM parent_child pc
            JOIN children c ON c.id = pc.child_id
            WHERE pc.parent_id = ?
            ORDER BY pc.ROWID ASC
            "#,
        )
        .bind(parent_id)
        .fetch_all(self.db.pool())
        .await?;

        let mut children = Vec::with_capacity(rows.len());
        for row in &rows {
            children.push(child_from_row(row)?);
        }
        Ok(children)
    }

    async fn relation_exists(&self, parent_id: &str, child_id: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT 1 FROM parent_child WHERE parent_id = ? AND child_id = ?")
            .bind(parent_id)
            .bind(child_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.is_some())
    }
}
