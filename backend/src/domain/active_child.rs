//! # Active Child
//!
//! Decides which child profile a session is looking at.
//!
//! - A child account always sees the profile its account is linked to, or
//!   nothing until it redeems an invite code.
//! - A parent sees the child they explicitly selected, otherwise the first
//!   of their children in creation order.
//!
//! The decision itself is the pure [`resolve_active_child`]; the service
//! only gathers its inputs from storage.

use std::sync::Arc;
use tracing::{info, warn};

use super::models::{Child, SessionContext, UserRole};
use crate::storage::{
    ActiveChildStorage, ChildStorage, ChildUserLinkStorage, ParentChildStorage, StoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum ActiveChildError {
    #[error("Only parent accounts can select a child")]
    NotAParent,

    #[error("Child profile is not owned by this parent")]
    NotOwned,

    #[error("Child not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Resolve the active child id for a session.
///
/// `linked_child_id` is only consulted for child sessions and
/// `owned_children` only for parent sessions.
pub fn resolve_active_child(
    session: &SessionContext,
    linked_child_id: Option<&str>,
    owned_children: &[Child],
) -> Option<String> {
    match session.role {
        UserRole::Child => linked_child_id.map(str::to_string),
        UserRole::Parent => session
            .selected_child_id
            .clone()
            .or_else(|| owned_children.first().map(|child| child.id.clone())),
    }
}

/// Service that loads the inputs of [`resolve_active_child`] and manages
/// the explicit selection of parent accounts
#[derive(Clone)]
pub struct ActiveChildService {
    children: Arc<dyn ChildStorage>,
    relations: Arc<dyn ParentChildStorage>,
    links: Arc<dyn ChildUserLinkStorage>,
    selections: Arc<dyn ActiveChildStorage>,
}

impl ActiveChildService {
    pub fn new(
        children: Arc<dyn ChildStorage>,
        relations: Arc<dyn ParentChildStorage>,
        links: Arc<dyn ChildUserLinkStorage>,
        selections: Arc<dyn ActiveChildStorage>,
    ) -> Self {
        Self {
            children,
            relations,
            links,
            selections,
        }
    }

    /// Active child id for the session.
    ///
    /// For parents an explicit selection in `session` wins over the stored one.
    pub async fn resolve(&self, session: &SessionContext) -> Result<Option<String>, ActiveChildError> {
        let resolved = match session.role {
            UserRole::Child => {
                let link = self.links.get_link_by_user(&session.account_id).await?;
                resolve_active_child(session, link.as_ref().map(|l| l.child_id.as_str()), &[])
            }
            UserRole::Parent => {
                let selection = match &session.selected_child_id {
                    Some(child_id) => Some(child_id.clone()),
                    None => self.selections.get_active_child(&session.account_id).await?,
                };
                let owned = self.relations.list_children_for_parent(&session.account_id).await?;
                let session = session.clone().with_selection(selection);
                resolve_active_child(&session, None, &owned)
            }
        };

        if resolved.is_none() {
            info!("No active child for account {}", session.account_id);
        }
        Ok(resolved)
    }

    /// Active child profile for the session, if any
    pub async fn active_child(&self, session: &SessionContext) -> Result<Option<Child>, ActiveChildError> {
        match self.resolve(session).await? {
            Some(child_id) => Ok(self.children.get_child(&child_id).await?),
            None => Ok(None),
        }
    }

    /// Remember an explicit selection for a parent account.
    ///
    /// The account is the session key: the selection sticks across requests
    /// and logins of that account until `reset_selection` or a new selection.
    pub async fn select_child(&self, session: &SessionContext, child_id: &str) -> Result<Child, ActiveChildError> {
        if session.role != UserRole::Parent {
            return Err(ActiveChildError::NotAParent);
        }

        let child = self
            .children
            .get_child(child_id)
            .await?
            .ok_or_else(|| ActiveChildError::NotFound(child_id.to_string()))?;

        if !self.relations.relation_exists(&session.account_id, child_id).await? {
            warn!("Parent {} tried to select unowned child {}", session.account_id, child_id);
            return Err(ActiveChildError::NotOwned);
        }

        self.selections.set_active_child(&session.account_id, child_id).await?;
        info!("Account {} selected child {}", session.account_id, child_id);
        Ok(child)
    }

    /// Drop the explicit selection, falling back to the first owned child
    pub async fn reset_selection(&self, session: &SessionContext) -> Result<bool, ActiveChildError> {
        if session.role != UserRole::Parent {
            return Err(ActiveChildError::NotAParent);
        }
        Ok(self.selections.clear_active_child(&session.account_id).await?)
    }
}
