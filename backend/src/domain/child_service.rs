use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::child::{CreateChildCommand, UpdateChildCommand};
use super::models::{Child, ParentChildRelation, SessionContext, UserRole};
use crate::storage::{ChildStorage, ChildUserLinkStorage, ParentChildStorage, StoreError};

const MAX_NAME_LENGTH: usize = 100;
const MAX_TEXT_FIELD_LENGTH: usize = 100;
const MAX_AVATAR_URL_LENGTH: usize = 2048;

#[derive(Debug, thiserror::Error)]
pub enum ChildError {
    #[error("{0}")]
    Validation(String),

    #[error("Child not found: {0}")]
    NotFound(String),

    #[error("Child profile is not owned by this parent")]
    NotOwned,

    #[error("Only parent accounts can manage child profiles")]
    NotAParent,

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Service for managing child profiles owned by parent accounts
#[derive(Clone)]
pub struct ChildService {
    children: Arc<dyn ChildStorage>,
    relations: Arc<dyn ParentChildStorage>,
    links: Arc<dyn ChildUserLinkStorage>,
}

impl ChildService {
    pub fn new(
        children: Arc<dyn ChildStorage>,
        relations: Arc<dyn ParentChildStorage>,
        links: Arc<dyn ChildUserLinkStorage>,
    ) -> Self {
        Self {
            children,
            relations,
            links,
        }
    }

    /// Create a child profile owned by the calling parent
    pub async fn create_child(&self, session: &SessionContext, command: CreateChildCommand) -> Result<Child, ChildError> {
        require_parent(session)?;
        info!("Creating child: name={}, parent={}", command.name, session.account_id);

        let birth_date = validate_create(&command)?;

        let now = Utc::now();
        let child = Child {
            id: Child::generate_id(),
            name: command.name.trim().to_string(),
            birth_date,
            grade: normalize(command.grade),
            school_name: normalize(command.school_name),
            avatar_url: normalize(command.avatar_url),
            created_at: now,
            updated_at: now,
        };
        let relation = ParentChildRelation::new(&session.account_id, &child.id, now);

        self.children.store_child_for_parent(&child, &relation).await?;

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    pub async fn get_child(&self, child_id: &str) -> Result<Option<Child>, ChildError> {
        let child = self.children.get_child(child_id).await?;
        if child.is_none() {
            warn!("Child not found: {}", child_id);
        }
        Ok(child)
    }

    /// A child profile as seen by a session: parents must own it, child
    /// accounts must be linked to it.
    pub async fn get_child_for_session(&self, session: &SessionContext, child_id: &str) -> Result<Child, ChildError> {
        match session.role {
            UserRole::Parent => self.owned_child(session, child_id).await,
            UserRole::Child => {
                let linked = self.links.get_link_by_user(&session.account_id).await?;
                if linked.map(|link| link.child_id).as_deref() != Some(child_id) {
                    return Err(ChildError::NotOwned);
                }
                self.children
                    .get_child(child_id)
                    .await?
                    .ok_or_else(|| ChildError::NotFound(child_id.to_string()))
            }
        }
    }

    /// Children visible to a session: the owned ones for a parent, the
    /// linked one (if any) for a child account.
    pub async fn list_children(&self, session: &SessionContext) -> Result<Vec<Child>, ChildError> {
        let children = match session.role {
            UserRole::Parent => self.relations.list_children_for_parent(&session.account_id).await?,
            UserRole::Child => match self.links.get_link_by_user(&session.account_id).await? {
                Some(link) => self.children.get_child(&link.child_id).await?.into_iter().collect(),
                None => Vec::new(),
            },
        };

        info!("Found {} children for account {}", children.len(), session.account_id);
        Ok(children)
    }

    pub async fn update_child(
        &self,
        session: &SessionContext,
        child_id: &str,
        command: UpdateChildCommand,
    ) -> Result<Child, ChildError> {
        info!("Updating child: {}", child_id);
        let mut child = self.owned_child(session, child_id).await?;

        if let Some(name) = command.name {
            validate_name(&name)?;
            child.name = name.trim().to_string();
        }
        if let Some(birth_date) = command.birth_date {
            child.birth_date = parse_birth_date(&birth_date)?;
        }
        if let Some(grade) = command.grade {
            validate_text_field("Grade", &grade)?;
            child.grade = normalize(Some(grade));
        }
        if let Some(school_name) = command.school_name {
            validate_text_field("School name", &school_name)?;
            child.school_name = normalize(Some(school_name));
        }
        if let Some(avatar_url) = command.avatar_url {
            validate_avatar_url(&avatar_url)?;
            child.avatar_url = normalize(Some(avatar_url));
        }
        child.updated_at = Utc::now();

        self.children.update_child(&child).await?;

        info!("Updated child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Delete a child profile; its relations, link and selections go with it
    pub async fn delete_child(&self, session: &SessionContext, child_id: &str) -> Result<(), ChildError> {
        info!("Deleting child: {}", child_id);
        let child = self.owned_child(session, child_id).await?;

        if !self.children.delete_child(child_id).await? {
            return Err(ChildError::NotFound(child_id.to_string()));
        }

        info!("Deleted child: {} with ID: {}", child.name, child.id);
        Ok(())
    }

    async fn owned_child(&self, session: &SessionContext, child_id: &str) -> Result<Child, ChildError> {
        require_parent(session)?;

        let child = self
            .children
            .get_child(child_id)
            .await?
            .ok_or_else(|| ChildError::NotFound(child_id.to_string()))?;

        if !self.relations.relation_exists(&session.account_id, child_id).await? {
            warn!("Parent {} does not own child {}", session.account_id, child_id);
            return Err(ChildError::NotOwned);
        }

        Ok(child)
    }
}

fn require_parent(session: &SessionContext) -> Result<(), ChildError> {
    if session.is_parent() {
        Ok(())
    } else {
        Err(ChildError::NotAParent)
    }
}

fn validate_create(command: &CreateChildCommand) -> Result<Option<NaiveDate>, ChildError> {
    validate_name(&command.name)?;
    if let Some(ref grade) = command.grade {
        validate_text_field("Grade", grade)?;
    }
    if let Some(ref school_name) = command.school_name {
        validate_text_field("School name", school_name)?;
    }
    if let Some(ref avatar_url) = command.avatar_url {
        validate_avatar_url(avatar_url)?;
    }
    command
        .birth_date
        .as_deref()
        .map(parse_birth_date)
        .transpose()
        .map(Option::flatten)
}

fn validate_name(name: &str) -> Result<(), ChildError> {
    if name.trim().is_empty() {
        return Err(ChildError::Validation("Child name cannot be empty".to_string()));
    }
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ChildError::Validation(format!(
            "Child name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_text_field(label: &str, value: &str) -> Result<(), ChildError> {
    if value.trim().chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(ChildError::Validation(format!(
            "{} cannot exceed {} characters",
            label, MAX_TEXT_FIELD_LENGTH
        )));
    }
    Ok(())
}

/// Avatars are links to hosted images; blank clears the avatar
fn validate_avatar_url(value: &str) -> Result<(), ChildError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(ChildError::Validation("Avatar URL must be an http(s) link".to_string()));
    }
    if value.chars().count() > MAX_AVATAR_URL_LENGTH {
        return Err(ChildError::Validation(format!(
            "Avatar URL cannot exceed {} characters",
            MAX_AVATAR_URL_LENGTH
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` birth date. An empty string clears the date.
fn parse_birth_date(raw: &str) -> Result<Option<NaiveDate>, ChildError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.len() != 10 {
        return Err(ChildError::Validation("Birth date must be in YYYY-MM-DD format".to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ChildError::Validation(format!("Invalid birth date: {}", raw)))
}

/// Trim optional text; blank becomes `None`
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
