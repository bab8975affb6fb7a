use shared::{
    CreateSubjectRequest, Subject as SharedSubject, SubjectListResponse, SubjectResponse, UpdateSubjectRequest,
};

use crate::domain::commands::subject::{CreateSubjectCommand, UpdateSubjectCommand};
use crate::domain::models::Subject as DomainSubject;

pub struct SubjectMapper;

impl SubjectMapper {
    pub fn to_dto(domain: DomainSubject) -> SharedSubject {
        SharedSubject {
            id: domain.id,
            child_id: domain.child_id,
            name: domain.name,
            color: domain.color,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(child_id: String, request: CreateSubjectRequest) -> CreateSubjectCommand {
        CreateSubjectCommand {
            child_id,
            name: request.name,
            color: request.color,
        }
    }

    pub fn to_update_command(request: UpdateSubjectRequest) -> UpdateSubjectCommand {
        UpdateSubjectCommand {
            name: request.name,
            color: request.color,
        }
    }

    pub fn to_list_dto(subjects: Vec<DomainSubject>) -> SubjectListResponse {
        SubjectListResponse {
            subjects: subjects.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response_dto(domain: DomainSubject, message: &str) -> SubjectResponse {
        SubjectResponse {
            subject: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
