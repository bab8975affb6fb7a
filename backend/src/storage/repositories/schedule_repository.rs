use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::columns::{format_date_time, parse_date_time, parse_timestamp};
use crate::domain::models::ScheduleEvent;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ScheduleStorage;

/// Repository for schedule events
#[derive(Clone)]
pub struct ScheduleRepository {
    db: DbConnection,
}

impl ScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn event_from_row(row: &SqliteRow) -> Result<ScheduleEvent> {
    let end_time = row
        .get::<Option<String>, _>("end_time")
        .map(|raw| parse_date_time(&raw))
        .transpose()?;

    Ok(ScheduleEvent {
        id: row.get("id"),
        child_id: row.get("child_id"),
        title: row.get("title"),
        description: row.get("description"),
        start_time: parse_date_time(&row.get::<String, _>("start_time"))?,
        end_time,
        all_day: row.get("all_day"),
        created_by: row.get("created_by"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

#[async_trait]
impl ScheduleStorage for ScheduleRepository {
    async fn store_event(&self, event: &ScheduleEvent) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (id, child_id, title, description, start_time, end_time,
                                   all_day, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.child_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(format_date_time(event.start_time))
        .bind(event.end_time.map(format_date_time))
        .bind(event.all_day)
        .bind(&event.created_by)
        .bind(event.created_at.to_rfc3339())
        .bind(event.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> StoreResult<Option<ScheduleEvent>> {
        let row = sqlx::query(
            r#"
            SELECT id, child_id, title, description, start_time, end_time, all_day,
                   created_by, created_at, updated_at
            FROM schedules
            WHERE id = ?
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(event_from_row).transpose()?)
    }

    async fn list_events_for_child(&self, child_id: &str) -> StoreResult<Vec<ScheduleEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, child_id, title, description, start_time, end_time, all_day,
                   created_by, created_at, updated_at
            FROM schedules
            WHERE child_id = ?
            ORDER BY start_time ASC, ROWID ASC
            "#,
        )
        .bind(child_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(event_from_row).collect::<Result<Vec<_>>>()?)
    }

    async fn update_event(&self, event: &ScheduleEvent) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET title = ?, description = ?, start_time = ?, end_time = ?, all_day = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(format_date_time(event.start_time))
        .bind(event.end_time.map(format_date_time))
        .bind(event.all_day)
        .bind(event.updated_at.to_rfc3339())
        .bind(&event.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(event_id)
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

    fn event(child_id: &str, title: &str, day: u32, hour: u32) -> ScheduleEvent {
        let now = Utc::now();
        ScheduleEvent {
            id: ScheduleEvent::generate_id(),
            child_id: child_id.to_string(),
            title: title.to_string(),
            description: None,
            start_time: NaiveDate::from_ymd_opt(2024, 9, day).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            end_time: None,
            all_day: false,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_events_are_listed_by_start_time() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = ScheduleRepository::new(db);

        repo.store_event(&event(&child_id, "Swimming", 3, 16)).await.unwrap();
        repo.store_event(&event(&child_id, "Dentist", 3, 9)).await.unwrap();
        repo.store_event(&event(&child_id, "Field trip", 2, 8)).await.unwrap();

        let titles: Vec<String> = repo
            .list_events_for_child(&child_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Field trip", "Dentist", "Swimming"]);
    }

    #[tokio::test]
    async fn test_update_event_times() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let repo = ScheduleRepository::new(db);

        let mut item = event(&child_id, "Dentist", 3, 9);
        repo.store_event(&item).await.unwrap();

        item.end_time = Some(item.start_time + chrono::Duration::minutes(45));
        repo.update_event(&item).await.unwrap();

        let stored = repo.get_event(&item.id).await.unwrap().expect("Event should exist");
        assert_eq!(stored.end_time, item.end_time);
        assert!(!stored.all_day);
        assert!(repo.delete_event(&item.id).await.unwrap());
    }
}
