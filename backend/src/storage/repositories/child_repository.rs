use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::{format_date, parse_date, parse_timestamp};
use crate::domain::models::{Child, ParentChildRelation};
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ChildStorage;

/// Repository for child profile operations
#[derive(Clone)]
pub struct ChildRepository {
    db: DbConnection,
}

impl ChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

/// Map a `children` row to the domain model
pub(crate) fn child_from_row(row: &SqliteRow) -> Result<Child> {
    let birth_date = row
        .get::<Option<String>, _>("birth_date")
        .map(|raw| parse_date(&raw))
        .transpose()?;

    Ok(Child {
        id: row.get("id"),
        name: row.get("name"),
        birth_date,
        grade: row.get("grade"),
        school_name: row.get("school_name"),
        avatar_url: row.get("avatar_url"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child_for_parent(
        &self,
        child: &Child,
        relation: &ParentChildRelation,
    ) -> StoreResult<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO children (id, name, birth_date, grade, school_name, avatar_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&child.id)
        .bind(&child.name)
        .bind(child.birth_date.map(format_date))
        .bind(&child.grade)
        .bind(&child.school_name)
        .bind(&child.avatar_url)
        .bind(child.created_at.to_rfc3339())
        .bind(child.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO parent_child (id, parent_id, child_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&relation.id)
        .bind(&relation.parent_id)
        .bind(&relation.child_id)
        .bind(relation.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> StoreResult<Option<Child>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birth_date, grade, school_name, avatar_url, created_at, updated_at
            FROM children
            WHERE id = ?
            "#,
        )
        .bind(child_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(child_from_row).transpose()?)
    }

    async fn update_child(&self, child: &Child) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE children
            SET name = ?, birth_date = ?, grade = ?, school_name = ?, avatar_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&child.name)
        .bind(child.birth_date.map(format_date))
        .bind(&child.grade)
        .bind(&child.school_name)
        .bind(&child.avatar_url)
        .bind(child.updated_at.to_rfc3339())
        .bind(&child.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_child(&self, child_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM children WHERE id = ?")
            .bind(child_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}


/// Insert a child owned by `parent-1` for repository tests of child-scoped tables
#[cfg(test)]
pub(crate) async fn insert_test_child(db: &DbConnection, name: &str) -> String {
    let now = chrono::Utc::now();
    let child = Child {
        id: Child::generate_id(),
        name: name.to_string(),
        birth_date: None,
        grade: None,
        school_name: None,
        avatar_url: None,
        created_at: now,
        updated_at: now,
    };
    let relation = ParentChildRelation::new("parent-1", &child.id, now);
    ChildRepository::new(db.clone())
        .store_child_for_parent(&child, &relation)
        .await
        .expect("Failed to store test child");
    child.id
}
