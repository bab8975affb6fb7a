use shared::{
    Announcement as SharedAnnouncement, AnnouncementListResponse, AnnouncementResponse, CreateAnnouncementRequest,
    UpdateAnnouncementRequest,
};

use crate::domain::commands::announcement::{CreateAnnouncementCommand, UpdateAnnouncementCommand};
use crate::domain::models::Announcement as DomainAnnouncement;

pub struct AnnouncementMapper;

impl AnnouncementMapper {
    pub fn to_dto(domain: DomainAnnouncement) -> SharedAnnouncement {
        SharedAnnouncement {
            id: domain.id,
            child_id: domain.child_id,
            title: domain.title,
            content: domain.content,
            important: domain.important,
            created_by: domain.created_by,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(child_id: String, request: CreateAnnouncementRequest) -> CreateAnnouncementCommand {
        CreateAnnouncementCommand {
            child_id,
            title: request.title,
            content: request.content,
            important: request.important,
        }
    }

    pub fn to_update_command(request: UpdateAnnouncementRequest) -> UpdateAnnouncementCommand {
        UpdateAnnouncementCommand {
            title: request.title,
            content: request.content,
            important: request.important,
        }
    }

    pub fn to_list_dto(announcements: Vec<DomainAnnouncement>) -> AnnouncementListResponse {
        AnnouncementListResponse {
            announcements: announcements.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response_dto(domain: DomainAnnouncement, message: &str) -> AnnouncementResponse {
        AnnouncementResponse {
            announcement: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
