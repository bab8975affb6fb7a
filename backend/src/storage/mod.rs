//! # Storage Module
//!
//! Handles all data persistence for the school tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`repositories`] are one implementation of them.
//!
//! ## Tables
//!
//! - `children`: child profiles
//! - `parent_child`: which parent accounts own which child profiles
//! - `child_user_link`: child login account ↔ child profile, unique on both sides
//! - `active_child`: explicit child selection per parent account
//! - `subjects`, `homework`, `exams`, `schedules`, `announcements`: school
//!   records of one child, deleted with the child
//!
//! Uniqueness violations surface as [`StoreError::UniqueViolation`] so the
//! domain can tell a lost race apart from a broken database.

pub mod connection;
pub mod error;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use error::{StoreError, StoreResult};
pub use repositories::{
    ActiveChildRepository,
    AnnouncementRepository,
    ChildRepository,
    ChildUserLinkRepository,
    ExamRepository,
    HomeworkRepository,
    ParentChildRepository,
    ScheduleRepository,
    SubjectRepository,
};
pub use traits::{
    ActiveChildStorage, AnnouncementStorage, ChildStorage, ChildUserLinkStorage, ExamStorage,
    HomeworkStorage, ParentChildStorage, ScheduleStorage, SubjectStorage,
};
