use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::columns::parse_timestamp;
use crate::domain::models::ChildUserLink;
use crate::storage::connection::DbConnection;
use crate::storage::error::StoreResult;
use crate::storage::traits::ChildUserLinkStorage;

/// Repository for child-account links
#[derive(Clone)]
pub struct ChildUserLinkRepository {
    db: DbConnection,
}

impl ChildUserLinkRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn fetch_one_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> StoreResult<Option<ChildUserLink>> {
        let sql = format!(
            "SELECT id, child_id, user_id, created_at FROM child_user_link WHERE {} = ?",
            column
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(link_from_row).transpose()?)
    }
}

fn link_from_row(row: &SqliteRow) -> Result<ChildUserLink> {
    Ok(ChildUserLink {
        id: row.get("id"),
        child_id: row.get("child_id"),
        user_id: row.get("user_id"),
        created_at: parse_timestamp(row.get("created_at"))?,
    })
}

#[async_trait]
impl ChildUserLinkStorage for ChildUserLinkRepository {
    async fn insert_link(&self, link: &ChildUserLink) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO child_user_link (id, child_id, user_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&link.id)
        .bind(&link.child_id)
        .bind(&link.user_id)
        .bind(link.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_link(&self, link_id: &str) -> StoreResult<Option<ChildUserLink>> {
        self.fetch_one_by("id", link_id).await
    }

    async fn get_link_by_child(&self, child_id: &str) -> StoreResult<Option<ChildUserLink>> {
        self.fetch_one_by("child_id", child_id).await
    }

    async fn get_link_by_user(&self, user_id: &str) -> StoreResult<Option<ChildUserLink>> {
        self.fetch_one_by("user_id", user_id).await
    }

    async fn list_links_for_children(&self, child_ids: &[String]) -> StoreResult<Vec<ChildUserLink>> {
        if child_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, child_id, user_id, created_at FROM child_user_link WHERE child_id IN (",
        );
        let mut separated = builder.separated(", ");
        for child_id in child_ids {
            separated.push_bind(child_id.as_str());
        }
        separated.push_unseparated(") ORDER BY ROWID ASC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;

        let mut links = Vec::with_capacity(rows.len());
        for row in &rows {
            links.push(link_from_row(row)?);
        }
        Ok(links)
    }

    async fn delete_link(&self, link_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM child_user_link WHERE id = ?")
            .bind(link_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Child, ParentChildRelation};
    use crate::storage::error::StoreError;
    use crate::storage::repositories::ChildRepository;
    use crate::storage::traits::ChildStorage;
    use chrono::Utc;

    async fn setup_test() -> (ChildRepository, ChildUserLinkRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (ChildRepository::new(db.clone()), ChildUserLinkRepository::new(db))
    }

    async fn add_child(children: &ChildRepository) -> String {
        let now = Utc::now();
        let child = Child {
            id: Child::generate_id(),
            name: "Ana".to_string(),
            birth_date: None,
            grade: None,
            school_name: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        let relation = ParentChildRelation::new("parent-1", &child.id, now);
        children.store_child_for_parent(&child, &relation).await.unwrap();
        child.id
    }

    #[tokio::test]
    async fn test_insert_and_lookup_link() {
        let (children, links) = setup_test().await;
        let child_id = add_child(&children).await;
        let link = ChildUserLink::new(&child_id, "user-1", Utc::now());

        links.insert_link(&link).await.expect("Failed to insert link");

        let by_child = links.get_link_by_child(&child_id).await.unwrap().unwrap();
        let by_user = links.get_link_by_user("user-1").await.unwrap().unwrap();
        let by_id = links.get_link(&link.id).await.unwrap().unwrap();
        assert_eq!(by_child.id, link.id);
        assert_eq!(by_user.child_id, child_id);
        assert_eq!(by_id.user_id, "user-1");
        assert!(links.get_link_by_user("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_link_for_child_is_unique_violation() {
        let (children, links) = setup_test().await;
        let child_id = add_child(&children).await;
        links
            .insert_link(&ChildUserLink::new(&child_id, "user-1", Utc::now()))
            .await
            .unwrap();

        let err = links
            .insert_link(&ChildUserLink::new(&child_id, "user-2", Utc::now()))
            .await
            .expect_err("Second link for the same child must fail");
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_second_link_for_account_is_unique_violation() {
        let (children, links) = setup_test().await;
        let first = add_child(&children).await;
        let second = add_child(&children).await;
        links
            .insert_link(&ChildUserLink::new(&first, "user-1", Utc::now()))
            .await
            .unwrap();

        let err = links
            .insert_link(&ChildUserLink::new(&second, "user-1", Utc::now()))
            .await
            .expect_err("Second link for the same account must fail");
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_list_links_for_children() {
        let (children, links) = setup_test().await;
        let first = add_child(&children).await;
        let second = add_child(&children).await;
        let unlinked = add_child(&children).await;
        links.insert_link(&ChildUserLink::new(&first, "user-1", Utc::now())).await.unwrap();
        links.insert_link(&ChildUserLink::new(&second, "user-2", Utc::now())).await.unwrap();

        let listed = links
            .list_links_for_children(&[first.clone(), unlinked])
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].child_id, first);

        assert!(links.list_links_for_children(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_link() {
        let (children, links) = setup_test().await;
        let child_id = add_child(&children).await;
        let link = ChildUserLink::new(&child_id, "user-1", Utc::now());
        links.insert_link(&link).await.unwrap();

        assert!(links.delete_link(&link.id).await.unwrap());
        assert!(!links.delete_link(&link.id).await.unwrap());
        assert!(links.get_link_by_child(&child_id).await.unwrap().is_none());
    }
}
