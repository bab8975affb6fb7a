use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::access::{optional_text, required_text, ChildAccess, RecordError, MAX_TITLE_LENGTH};
use super::commands::announcement::{CreateAnnouncementCommand, UpdateAnnouncementCommand};
use super::models::{Announcement, SessionContext};
use crate::storage::AnnouncementStorage;

const MAX_CONTENT_LENGTH: usize = 1000;

/// Service for school announcements of a child
#[derive(Clone)]
pub struct AnnouncementService {
    announcements: Arc<dyn AnnouncementStorage>,
    access: ChildAccess,
}

impl AnnouncementService {
    pub fn new(announcements: Arc<dyn AnnouncementStorage>, access: ChildAccess) -> Self {
        Self { announcements, access }
    }

    /// Announcements of a child, newest first
    pub async fn list_announcements(
        &self,
        session: &SessionContext,
        child_id: &str,
    ) -> Result<Vec<Announcement>, RecordError> {
        self.access.ensure_visible(session, child_id).await?;
        let announcements = self.announcements.list_announcements_for_child(child_id).await?;
        info!("Found {} announcements for child {}", announcements.len(), child_id);
        Ok(announcements)
    }

    pub async fn get_announcement(
        &self,
        session: &SessionContext,
        announcement_id: &str,
    ) -> Result<Announcement, RecordError> {
        let announcement = self.load(announcement_id).await?;
        self.access.ensure_visible(session, &announcement.child_id).await?;
        Ok(announcement)
    }

    pub async fn create_announcement(
        &self,
        session: &SessionContext,
        command: CreateAnnouncementCommand,
    ) -> Result<Announcement, RecordError> {
        self.access.ensure_manageable(session, &command.child_id).await?;
        info!("Creating announcement: title={}, child={}", command.title, command.child_id);

        let announcement = Announcement {
            id: Announcement::generate_id(),
            title: required_text("Title", &command.title, MAX_TITLE_LENGTH)?,
            content: optional_text("Content", command.content, MAX_CONTENT_LENGTH)?,
            child_id: command.child_id,
            important: command.important,
            created_by: Some(session.account_id.clone()),
            created_at: Utc::now(),
        };
        self.announcements.store_announcement(&announcement).await?;

        info!("Created announcement: {} with ID: {}", announcement.title, announcement.id);
        Ok(announcement)
    }

    pub async fn update_announcement(
        &self,
        session: &SessionContext,
        announcement_id: &str,
        command: UpdateAnnouncementCommand,
    ) -> Result<Announcement, RecordError> {
        let mut announcement = self.load(announcement_id).await?;
        self.access.ensure_manageable(session, &announcement.child_id).await?;

        if let Some(title) = command.title {
            announcement.title = required_text("Title", &title, MAX_TITLE_LENGTH)?;
        }
        if let Some(content) = command.content {
            announcement.content = optional_text("Content", content, MAX_CONTENT_LENGTH)?;
        }
        if let Some(important) = command.important {
            announcement.important = important;
        }
        self.announcements.update_announcement(&announcement).await?;

        info!("Updated announcement: {}", announcement.id);
        Ok(announcement)
    }

    pub async fn delete_announcement(&self, session: &SessionContext, announcement_id: &str) -> Result<(), RecordError> {
        let announcement = self.load(announcement_id).await?;
        self.access.ensure_manageable(session, &announcement.child_id).await?;

        if !self.announcements.delete_announcement(announcement_id).await? {
            return Err(RecordError::NotFound("Announcement", announcement_id.to_string()));
        }
        info!("Deleted announcement: {}", announcement_id);
        Ok(())
    }

    async fn load(&self, announcement_id: &str) -> Result<Announcement, RecordError> {
        self.announcements
            .get_announcement(announcement_id)
            .await?
            .ok_or_else(|| RecordError::NotFound("Announcement", announcement_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChildUserLink;
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{
        AnnouncementRepository, ChildUserLinkRepository, ChildUserLinkStorage, DbConnection, ParentChildRepository,
    };

    async fn setup_test() -> (AnnouncementService, Arc<ChildUserLinkRepository>, String) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let links = Arc::new(ChildUserLinkRepository::new(db.clone()));
        let access = ChildAccess::new(Arc::new(ParentChildRepository::new(db.clone())), links.clone());
        (
            AnnouncementService::new(Arc::new(AnnouncementRepository::new(db)), access),
            links,
            child_id,
        )
    }

    fn create_command(child_id: &str, title: &str) -> CreateAnnouncementCommand {
        CreateAnnouncementCommand {
            child_id: child_id.to_string(),
            title: title.to_string(),
            content: Some("Bring a signed permission slip".to_string()),
            important: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_read_announcement() {
        let (service, links, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");

        let notice = service.create_announcement(&parent, create_command(&child_id, "Museum trip")).await.unwrap();
        assert!(notice.important);
        assert_eq!(notice.created_by.as_deref(), Some("parent-1"));

        links.insert_link(&ChildUserLink::new(&child_id, "kid-1", Utc::now())).await.unwrap();
        let kid = SessionContext::child("kid-1");
        let listed = service.list_announcements(&kid, &child_id).await.unwrap();
        assert_eq!(listed, vec![notice.clone()]);

        assert!(matches!(
            service.create_announcement(&kid, create_command(&child_id, "No school")).await,
            Err(RecordError::ParentOnly)
        ));

        let mut long = create_command(&child_id, "Long");
        long.content = Some("x".repeat(1001));
        assert!(matches!(
            service.create_announcement(&parent, long).await,
            Err(RecordError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_announcement() {
        let (service, _, child_id) = setup_test().await;
        let parent = SessionContext::parent("parent-1");
        let notice = service.create_announcement(&parent, create_command(&child_id, "Museum trip")).await.unwrap();

        let updated = service
            .update_announcement(
                &parent,
                &notice.id,
                UpdateAnnouncementCommand {
                    content: Some(None),
                    important: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Museum trip");
        assert!(updated.content.is_none());
        assert!(!updated.important);

        assert!(matches!(
            service.get_announcement(&SessionContext::parent("parent-2"), &notice.id).await,
            Err(RecordError::ChildNotVisible)
        ));
        service.delete_announcement(&parent, &notice.id).await.unwrap();
        assert!(service.list_announcements(&parent, &child_id).await.unwrap().is_empty());
    }
}
