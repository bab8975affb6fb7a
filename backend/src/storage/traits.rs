//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::domain::models::{
    Announcement, Child, ChildUserLink, Exam, Homework, ParentChildRelation, ScheduleEvent, Subject,
};

/// Trait defining the interface for child profile storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child together with the relation to the parent creating it.
    /// Either both rows are written or neither is.
    async fn store_child_for_parent(
        &self,
        child: &Child,
        relation: &ParentChildRelation,
    ) -> StoreResult<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> StoreResult<Option<Child>>;

    /// Update the mutable fields of an existing child
    async fn update_child(&self, child: &Child) -> StoreResult<()>;

    /// Delete a child and, by cascade, its relations, link and selections.
    /// Returns true if the child existed.
    async fn delete_child(&self, child_id: &str) -> StoreResult<bool>;
}

/// Trait defining the interface for parent-child relation storage
#[async_trait]
pub trait ParentChildStorage: Send + Sync {
    /// Bounded scan over all relations, oldest first, at most `limit` rows
    async fn list_relations(&self, limit: u32) -> StoreResult<Vec<ParentChildRelation>>;

    /// Children owned by a parent, in the order the relations were created
    async fn list_children_for_parent(&self, parent_id: &str) -> StoreResult<Vec<Child>>;

    /// Whether the parent owns the child
    async fn relation_exists(&self, parent_id: &str, child_id: &str) -> StoreResult<bool>;
}

/// Trait defining the interface for child-account link storage
#[async_trait]
pub trait ChildUserLinkStorage: Send + Sync {
    /// Insert a new link.
    /// Fails with `StoreError::UniqueViolation` if the child or the account
    /// is already linked.
    async fn insert_link(&self, link: &ChildUserLink) -> StoreResult<()>;

    async fn get_link(&self, link_id: &str) -> StoreResult<Option<ChildUserLink>>;

    /// Point lookup of the link for a child profile
    async fn get_link_by_child(&self, child_id: &str) -> StoreResult<Option<ChildUserLink>>;

    /// Point lookup of the link for a login account
    async fn get_link_by_user(&self, user_id: &str) -> StoreResult<Option<ChildUserLink>>;

    /// All links referencing any of the given children
    async fn list_links_for_children(&self, child_ids: &[String]) -> StoreResult<Vec<ChildUserLink>>;

    /// Returns true if the link existed
    async fn delete_link(&self, link_id: &str) -> StoreResult<bool>;
}

/// Trait defining the interface for the explicit active-child selection
#[async_trait]
pub trait ActiveChildStorage: Send + Sync {
    /// Get the explicitly selected child ID of an account
    async fn get_active_child(&self, account_id: &str) -> StoreResult<Option<String>>;

    /// Set (or replace) the selected child of an account
    async fn set_active_child(&self, account_id: &str, child_id: &str) -> StoreResult<()>;

    /// Remove the selection. Returns true if one existed.
    async fn clear_active_child(&self, account_id: &str) -> StoreResult<bool>;
}

/// Subjects of a child
#[async_trait]
pub trait SubjectStorage: Send + Sync {
    async fn store_subject(&self, subject: &Subject) -> StoreResult<()>;

    async fn get_subject(&self, subject_id: &str) -> StoreResult<Option<Subject>>;

    /// Subjects of a child ordered by name
    async fn list_subjects_for_child(&self, child_id: &str) -> StoreResult<Vec<Subject>>;

    async fn update_subject(&self, subject: &Subject) -> StoreResult<()>;

    /// Delete a subject; homework and exams referencing it lose the reference.
    /// Returns true if the subject existed.
    async fn delete_subject(&self, subject_id: &str) -> StoreResult<bool>;
}

/// Homework of a child. Reads join the referenced subject.
#[async_trait]
pub trait HomeworkStorage: Send + Sync {
    async fn store_homework(&self, homework: &Homework) -> StoreResult<()>;

    async fn get_homework(&self, homework_id: &str) -> StoreResult<Option<Homework>>;

    /// Homework of a child ordered by due date
    async fn list_homework_for_child(&self, child_id: &str) -> StoreResult<Vec<Homework>>;

    async fn update_homework(&self, homework: &Homework) -> StoreResult<()>;

    async fn delete_homework(&self, homework_id: &str) -> StoreResult<bool>;
}

/// Exams of a child. Reads join the referenced subject.
#[async_trait]
pub trait ExamStorage: Send + Sync {
    async fn store_exam(&self, exam: &Exam) -> StoreResult<()>;

    async fn get_exam(&self, exam_id: &str) -> StoreResult<Option<Exam>>;

    /// Exams of a child ordered by exam date
    async fn list_exams_for_child(&self, child_id: &str) -> StoreResult<Vec<Exam>>;

    async fn update_exam(&self, exam: &Exam) -> StoreResult<()>;

    async fn delete_exam(&self, exam_id: &str) -> StoreResult<bool>;
}

/// Schedule events of a child
#[async_trait]
pub trait ScheduleStorage: Send + Sync {
    async fn store_event(&self, event: &ScheduleEvent) -> StoreResult<()>;

    async fn get_event(&self, event_id: &str) -> StoreResult<Option<ScheduleEvent>>;

    /// Events of a child ordered by start time
    async fn list_events_for_child(&self, child_id: &str) -> StoreResult<Vec<ScheduleEvent>>;

    async fn update_event(&self, event: &ScheduleEvent) -> StoreResult<()>;

    async fn delete_event(&self, event_id: &str) -> StoreResult<bool>;
}

/// Announcements of a child
#[async_trait]
pub trait AnnouncementStorage: Send + Sync {
    async fn store_announcement(&self, announcement: &Announcement) -> StoreResult<()>;

    async fn get_announcement(&self, announcement_id: &str) -> StoreResult<Option<Announcement>>;

    /// Announcements of a child, newest first
    async fn list_announcements_for_child(&self, child_id: &str) -> StoreResult<Vec<Announcement>>;

    async fn update_announcement(&self, announcement: &Announcement) -> StoreResult<()>;

    async fn delete_announcement(&self, announcement_id: &str) -> StoreResult<bool>;
}
