use shared::{
    CreateScheduleRequest, ScheduleEvent as SharedEvent, ScheduleEventListResponse, ScheduleEventResponse,
    UpdateScheduleRequest,
};

use crate::domain::commands::schedule::{CreateScheduleCommand, UpdateScheduleCommand};
use crate::domain::models::ScheduleEvent as DomainEvent;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct ScheduleMapper;

impl ScheduleMapper {
    pub fn to_dto(domain: DomainEvent) -> SharedEvent {
        SharedEvent {
            id: domain.id,
            child_id: domain.child_id,
            title: domain.title,
            description: domain.description,
            start_time: domain.start_time.format(DATE_TIME_FORMAT).to_string(),
            end_time: domain.end_time.map(|end| end.format(DATE_TIME_FORMAT).to_string()),
            all_day: domain.all_day,
            created_by: domain.created_by,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(child_id: String, request: CreateScheduleRequest) -> CreateScheduleCommand {
        CreateScheduleCommand {
            child_id,
            title: request.title,
            description: request.description,
            start_time: request.start_time,
            end_time: request.end_time,
            all_day: request.all_day,
        }
    }

    pub fn to_update_command(request: UpdateScheduleRequest) -> UpdateScheduleCommand {
        UpdateScheduleCommand {
            title: request.title,
            description: request.description,
            start_time: request.start_time,
            end_time: request.end_time,
            all_day: request.all_day,
        }
    }

    pub fn to_list_dto(events: Vec<DomainEvent>) -> ScheduleEventListResponse {
        ScheduleEventListResponse {
            events: events.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response_dto(domain: DomainEvent, message: &str) -> ScheduleEventResponse {
        ScheduleEventResponse {
            event: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
