use shared::{
    ActiveChildResponse, Child as SharedChild, ChildListResponse, ChildResponse, CreateChildRequest,
    SetActiveChildResponse, UpdateChildRequest,
};

use crate::domain::commands::child::{CreateChildCommand, UpdateChildCommand};
use crate::domain::models::Child as DomainChild;

/// Mapper between the shared Child DTOs and the domain Child model.
pub struct ChildMapper;

impl ChildMapper {
    /// Converts a domain Child model to a shared Child DTO.
    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            name: domain.name,
            birth_date: domain.birth_date.map(|date| date.format("%Y-%m-%d").to_string()),
            grade: domain.grade,
            school_name: domain.school_name,
            avatar_url: domain.avatar_url,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreateChildRequest) -> CreateChildCommand {
        CreateChildCommand {
            name: request.name,
            birth_date: request.birth_date,
            grade: request.grade,
            school_name: request.school_name,
            avatar_url: request.avatar_url,
        }
    }

    pub fn to_update_command(request: UpdateChildRequest) -> UpdateChildCommand {
        UpdateChildCommand {
            name: request.name,
            birth_date: request.birth_date,
            grade: request.grade,
            school_name: request.school_name,
            avatar_url: request.avatar_url,
        }
    }

    pub fn to_child_list_dto(domain_children: Vec<DomainChild>) -> ChildListResponse {
        ChildListResponse {
            children: domain_children.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_child_response_dto(domain: DomainChild, message: &str) -> ChildResponse {
        ChildResponse {
            child: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_active_child_dto(domain: Option<DomainChild>) -> ActiveChildResponse {
        ActiveChildResponse {
            active_child: domain.map(Self::to_dto),
        }
    }

    pub fn to_set_active_child_dto(domain: DomainChild) -> SetActiveChildResponse {
        SetActiveChildResponse {
            success_message: "Active child has been set successfully.".to_string(),
            active_child: Self::to_dto(domain),
        }
    }
}
