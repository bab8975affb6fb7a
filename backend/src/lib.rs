//! # School Tracker Backend
//!
//! Non-UI logic of the family school tracker: child profiles owned by
//! parent accounts, invite codes that let a child link their own account to
//! a profile, resolution of the child a session is looking at, and each
//! child's school records (subjects, homework, exams, schedule,
//! announcements) with the dashboard agenda built from them.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST API, handlers, DTO mappers)
//!     ↓
//! Domain Layer (invite codes, linking, active child, child profiles, school records)
//!     ↓
//! Storage Layer (traits + SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{
    ActiveChildService, AgendaService, AnnouncementService, ChildAccess, ChildService, ExamService,
    HomeworkService, LinkService, ScheduleService, SubjectService,
};
use crate::storage::{
    ActiveChildRepository, AnnouncementRepository, ChildRepository, ChildUserLinkRepository, DbConnection,
    ExamRepository, HomeworkRepository, ParentChildRepository, ScheduleRepository, SubjectRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub link_service: LinkService,
    pub active_child_service: ActiveChildService,
    pub subject_service: SubjectService,
    pub homework_service: HomeworkService,
    pub exam_service: ExamService,
    pub schedule_service: ScheduleService,
    pub announcement_service: AnnouncementService,
    pub agenda_service: AgendaService,
}

impl AppState {
    /// Wire every service to the SQLite repositories of one connection
    pub fn from_connection(db: DbConnection, config: &AppConfig) -> Self {
        let children = Arc::new(ChildRepository::new(db.clone()));
        let relations = Arc::new(ParentChildRepository::new(db.clone()));
        let links = Arc::new(ChildUserLinkRepository::new(db.clone()));
        let selections = Arc::new(ActiveChildRepository::new(db.clone()));
        let subjects = Arc::new(SubjectRepository::new(db.clone()));
        let access = ChildAccess::new(relations.clone(), links.clone());

        let homework_service = HomeworkService::new(
            Arc::new(HomeworkRepository::new(db.clone())),
            subjects.clone(),
            access.clone(),
        );
        let exam_service = ExamService::new(Arc::new(ExamRepository::new(db.clone())), subjects.clone(), access.clone());
        let schedule_service = ScheduleService::new(Arc::new(ScheduleRepository::new(db.clone())), access.clone());

        Self {
            child_service: ChildService::new(children.clone(), relations.clone(), links.clone()),
            link_service: LinkService::new(relations.clone(), links.clone(), config.relation_scan_limit),
            active_child_service: ActiveChildService::new(children, relations, links, selections),
            subject_service: SubjectService::new(subjects, access.clone()),
            announcement_service: AnnouncementService::new(Arc::new(AnnouncementRepository::new(db)), access),
            agenda_service: AgendaService::new(homework_service.clone(), exam_service.clone(), schedule_service.clone()),
            homework_service,
            exam_service,
            schedule_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url, config.max_connections).await?;

    info!("Setting up application state");
    Ok(AppState::from_connection(db, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!("Ignoring invalid CORS origin {:?}", config.cors_origin);
            cors
        }
    };

    let api_routes = Router::new()
        .route("/health", get(io::health))
        .route("/children", get(io::list_children).post(io::create_child))
        .route(
            "/children/:child_id",
            get(io::get_child).put(io::update_child).delete(io::delete_child),
        )
        .route("/children/:child_id/invite-code", get(io::get_invite_code))
        .route("/children/:child_id/link", get(io::get_child_link))
        .route("/links", get(io::list_links))
        .route("/links/redeem", post(io::redeem_invite_code))
        .route("/links/:link_id", delete(io::unlink_child_account))
        .route(
            "/active-child",
            get(io::get_active_child)
                .put(io::set_active_child)
                .delete(io::reset_active_child),
        )
        .route(
            "/children/:child_id/subjects",
            get(io::list_subjects).post(io::create_subject),
        )
        .route(
            "/subjects/:subject_id",
            get(io::get_subject).put(io::update_subject).delete(io::delete_subject),
        )
        .route(
            "/children/:child_id/homework",
            get(io::list_homework).post(io::create_homework),
        )
        .route(
            "/homework/:homework_id",
            get(io::get_homework).put(io::update_homework).delete(io::delete_homework),
        )
        .route("/homework/:homework_id/completion", put(io::set_homework_completed))
        .route("/children/:child_id/exams", get(io::list_exams).post(io::create_exam))
        .route(
            "/exams/:exam_id",
            get(io::get_exam).put(io::update_exam).delete(io::delete_exam),
        )
        .route(
            "/children/:child_id/schedules",
            get(io::list_schedule_events).post(io::create_schedule_event),
        )
        .route(
            "/schedules/:event_id",
            get(io::get_schedule_event)
                .put(io::update_schedule_event)
                .delete(io::delete_schedule_event),
        )
        .route(
            "/children/:child_id/announcements",
            get(io::list_announcements).post(io::create_announcement),
        )
        .route(
            "/announcements/:announcement_id",
            get(io::get_announcement)
                .put(io::update_announcement)
                .delete(io::delete_announcement),
        )
        .route("/children/:child_id/agenda", get(io::get_agenda));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
