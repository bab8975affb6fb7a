use shared::ChildUserLink as SharedLink;

use crate::domain::models::ChildUserLink as DomainLink;

pub struct LinkMapper;

impl LinkMapper {
    pub fn to_dto(domain: DomainLink) -> SharedLink {
        SharedLink {
            id: domain.id,
            child_id: domain.child_id,
            user_id: domain.user_id,
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}
