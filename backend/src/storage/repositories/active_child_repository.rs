use async_trait::async_trait;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ActiveChildStorage;

/// Repository for the sticky per-account child selection
#[derive(Clone)]
pub struct ActiveChildRepository {
    db: DbConnection,
}

impl ActiveChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActiveChildStorage for ActiveChildRepository {
    async fn get_active_child(&self, account_id: &str) -> StoreResult<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT child_id
            FROM active_child
            WHERE account_id = ?
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| r.get("child_id")))
    }

    async fn set_active_child(&self, account_id: &str, child_id: &str) -> StoreResult<()> {
        // Use INSERT OR REPLACE to handle both initial insert and updates
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO active_child (account_id, child_id, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(account_id)
        .bind(child_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn clear_active_child(&self, account_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM active_child WHERE account_id = ?")
            .bind(account_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
