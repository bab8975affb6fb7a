use shared::{
    CreateHomeworkRequest, Homework as SharedHomework, HomeworkListResponse, HomeworkResponse, UpdateHomeworkRequest,
};

use super::SubjectMapper;
use crate::domain::commands::homework::{CreateHomeworkCommand, UpdateHomeworkCommand};
use crate::domain::models::Homework as DomainHomework;

pub struct HomeworkMapper;

impl HomeworkMapper {
    pub fn to_dto(domain: DomainHomework) -> SharedHomework {
        SharedHomework {
            id: domain.id,
            child_id: domain.child_id,
            subject_id: domain.subject_id,
            title: domain.title,
            description: domain.description,
            due_date: domain.due_date.format("%Y-%m-%d").to_string(),
            completed: domain.completed,
            completed_at: domain.completed_at.map(|at| at.to_rfc3339()),
            created_by: domain.created_by,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
            subject: domain.subject.map(SubjectMapper::to_dto),
        }
    }

    pub fn to_create_command(child_id: String, request: CreateHomeworkRequest) -> CreateHomeworkCommand {
        CreateHomeworkCommand {
            child_id,
            subject_id: request.subject_id,
            title: request.title,
            description: request.description,
            due_date: request.due_date,
        }
    }

    pub fn to_update_command(request: UpdateHomeworkRequest) -> UpdateHomeworkCommand {
        UpdateHomeworkCommand {
            subject_id: request.subject_id,
            title: request.title,
            description: request.description,
            due_date: request.due_date,
        }
    }

    pub fn to_list_dto(homework: Vec<DomainHomework>) -> HomeworkListResponse {
        HomeworkListResponse {
            homework: homework.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response_dto(domain: DomainHomework, message: &str) -> HomeworkResponse {
        HomeworkResponse {
            homework: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
