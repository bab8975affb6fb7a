use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::parse_timestamp;
use crate::domain::models::Announcement;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::AnnouncementStorage;

/// Repository for school announcements
#[derive(Clone)]
pub struct AnnouncementRepository {
    db: DbConnection,
}

impl AnnouncementRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn announcement_from_row(row: &SqliteRow) -> Result<Announcement> {
    Ok(Announcement {
        id: row.get("id"),
        child_id: row.get("child_id"),
        title: row.get("title"),
        content: row.get("content"),
        important: row.get("important"),
        created_by: row.get("created_by"),
        created_at: parse_timestamp(row.get("created_at"))?,
    })
}

#[async_trait]
impl AnnouncementStorage for AnnouncementRepository {
    async fn store_announcement(&self, announcement: &Announcement) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO announcements (id, child_id, title, content, important, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&announcement.id)
        .bind(&announcement.child_id)
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.important)
        .bind(&announcement.created_by)
        .bind(announcement.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_announcement(&self, announcement_id: &str) -> StoreResult<Option<Announcement>> {
        let row = sqlx::query(
            r#"
            SELECT id, child_id, title, content, important, created_by, created_at
            FROM announcements
            WHERE id = ?
            "#,
        )
        .bind(announcement_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(announcement_from_row).transpose()?)
    }

    async fn list_announcements_for_child(&self, child_id: &str) -> StoreResult<Vec<Announcement>> {
        // Newest first; same-instant rows keep reverse insertion order
        let rows = sqlx::query(
            r#"
            SELECT id, child_id, title, content, important, created_by, created_at
            FROM announcements
            WHERE child_id = ?
            ORDER BY created_at DESC, ROWID DESC
            "#,
        )
        .bind(child_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(announcement_from_row).collect::<Result<Vec<_>>>()?)
    }

    async fn update_announcement(&self, announcement: &Announcement) -> StoreResult<()> {
        sqlx::query("UPDATE announcements SET title = ?, content = ?, important = ? WHERE id = ?")
            .bind(&announcement.title)
            .bind(&announcement.content)
            .bind(announcement.important)
            .bind(&announcement.id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_announcement(&self, announcement_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(announcement_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
