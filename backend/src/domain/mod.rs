//! # Domain Module
//!
//! Business logic of the school tracker, independent of storage and transport.
//!
//! ## Module Organization
//!
//! - **invite_code**: derives and parses the `XXXX-XXXX` codes parents share
//! - **link_service**: redeems codes into child-account links, looks links up, unlinks
//! - **active_child**: picks which child profile a session is looking at
//! - **child_service**: child profile management for parent accounts
//! - **access**: who may see or manage a child's school records, shared field rules
//! - **subject_service**, **homework_service**, **exam_service**,
//!   **schedule_service**, **announcement_service**: school records of a child
//! - **agenda**: the dashboard buckets (due today, upcoming, overdue, ...)
//! - **commands**: internal command types mapped from the public DTOs
//! - **models**: domain entities and the session context
//!
//! ## Business Rules
//!
//! - A child profile has at most one linked login account, and an account
//!   links to at most one profile
//! - Only a parent that owns a child can share its invite code, edit it,
//!   delete it or remove its link
//! - Invite codes are derived, never stored, and never expire
//! - School records are managed by owning parents; a linked child account
//!   reads them and may only tick homework off

pub mod access;
pub mod active_child;
pub mod agenda;
pub mod announcement_service;
pub mod child_service;
pub mod commands;
pub mod exam_service;
pub mod homework_service;
pub mod invite_code;
pub mod link_service;
pub mod models;
pub mod schedule_service;
pub mod subject_service;

pub use access::{ChildAccess, RecordError};
pub use active_child::{resolve_active_child, ActiveChildError, ActiveChildService};
pub use agenda::{Agenda, AgendaService};
pub use announcement_service::AnnouncementService;
pub use child_service::{ChildError, ChildService};
pub use exam_service::ExamService;
pub use homework_service::HomeworkService;
pub use link_service::{LinkError, LinkService, DEFAULT_RELATION_SCAN_LIMIT};
pub use schedule_service::ScheduleService;
pub use subject_service::SubjectService;
