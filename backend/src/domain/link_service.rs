//! # Link Service
//!
//! Turns a redeemed invite code into a persistent child-account link and
//! answers questions about existing links.
//!
//! Redemption pairs a cheap pre-check (is this child already linked?) with
//! the store's unique constraints. The pre-check gives a fast, specific
//! error; the constraint is what actually holds when two redemptions race.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::invite_code::{self, ParseError};
use super::models::ChildUserLink;
use crate::storage::{ChildUserLinkStorage, ParentChildStorage, StoreError};

/// Default page size of the relation scan performed during redemption
pub const DEFAULT_RELATION_SCAN_LIMIT: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Invalid invite code format")]
    InvalidCodeFormat(#[from] ParseError),

    #[error("Invite code not found. Check that the code is correct.")]
    CodeNotFound,

    #[error("This child profile is already linked to an account")]
    ChildAlreadyLinked,

    #[error("Your account is already linked to a child profile")]
    AccountAlreadyLinked,

    #[error("Child profile is not owned by this parent")]
    ChildNotOwned,

    #[error("Link not found")]
    LinkNotFound,

    #[error("No invite code can be issued for these account identifiers")]
    UnencodableIdentifier,

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Service for creating, looking up and removing child-account links
#[derive(Clone)]
pub struct LinkService {
    relations: Arc<dyn ParentChildStorage>,
    links: Arc<dyn ChildUserLinkStorage>,
    relation_scan_limit: u32,
}

impl LinkService {
    pub fn new(
        relations: Arc<dyn ParentChildStorage>,
        links: Arc<dyn ChildUserLinkStorage>,
        relation_scan_limit: u32,
    ) -> Self {
        Self {
            relations,
            links,
            relation_scan_limit,
        }
    }

    /// Invite code a parent shares for one of their children
    pub async fn invite_code_for(&self, parent_id: &str, child_id: &str) -> Result<String, LinkError> {
        if !self.relations.relation_exists(parent_id, child_id).await? {
            warn!("Parent {} requested invite code for unowned child {}", parent_id, child_id);
            return Err(LinkError::ChildNotOwned);
        }

        // A '-' inside either prefix yields a code that can never be redeemed
        let code = invite_code::encode(child_id, parent_id);
        match invite_code::decode(&code) {
            Ok(parsed) if parsed.matches(child_id, parent_id) => Ok(code),
            _ => {
                warn!("Refusing unredeemable invite code {} for child {}", code, child_id);
                Err(LinkError::UnencodableIdentifier)
            }
        }
    }

    /// Redeem an invite code on behalf of a child's login account.
    ///
    /// Nothing is written unless the final insert succeeds.
    pub async fn redeem(&self, code: &str, redeeming_account_id: &str) -> Result<ChildUserLink, LinkError> {
        let parsed = invite_code::decode(code)?;
        info!("Account {} redeeming invite code {}", redeeming_account_id, parsed);

        // Bounded scan; with a 4+4 prefix collision the first row in scan order wins
        let relations = self.relations.list_relations(self.relation_scan_limit).await?;
        debug!("Scanned {} parent-child relations", relations.len());

        let matched = relations
            .iter()
            .find(|relation| parsed.matches(&relation.child_id, &relation.parent_id))
            .ok_or(LinkError::CodeNotFound)?;

        if self.links.get_link_by_child(&matched.child_id).await?.is_some() {
            warn!("Child {} is already linked", matched.child_id);
            return Err(LinkError::ChildAlreadyLinked);
        }

        let link = ChildUserLink::new(&matched.child_id, redeeming_account_id, Utc::now());
        match self.links.insert_link(&link).await {
            Ok(()) => {
                info!("Linked account {} to child {}", link.user_id, link.child_id);
                Ok(link)
            }
            Err(StoreError::UniqueViolation(detail)) => {
                warn!("Link insert rejected by unique constraint: {}", detail);
                Err(LinkError::AccountAlreadyLinked)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn link_for_child(&self, child_id: &str) -> Result<Option<ChildUserLink>, LinkError> {
        Ok(self.links.get_link_by_child(child_id).await?)
    }

    pub async fn link_for_account(&self, account_id: &str) -> Result<Option<ChildUserLink>, LinkError> {
        Ok(self.links.get_link_by_user(account_id).await?)
    }

    /// Links for several children at once, e.g. a parent's overview
    pub async fn links_for_children(&self, child_ids: &[String]) -> Result<Vec<ChildUserLink>, LinkError> {
        if child_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.links.list_links_for_children(child_ids).await?)
    }

    /// Remove a link; only a parent of the linked child may do so
    pub async fn unlink(&self, parent_id: &str, link_id: &str) -> Result<(), LinkError> {
        let link = self
            .links
            .get_link(link_id)
            .await?
            .ok_or(LinkError::LinkNotFound)?;

        if !self.relations.relation_exists(parent_id, &link.child_id).await? {
            return Err(LinkError::ChildNotOwned);
        }

        if !self.links.delete_link(link_id).await? {
            return Err(LinkError::LinkNotFound);
        }

        info!("Unlinked account {} from child {}", link.user_id, link.child_id);
        Ok(())
    }
}
