use serde::{Deserialize, Serialize};

/// Role of the account driving a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Parent,
    Child,
}

/// Explicit per-session context: who is calling and what they picked.
///
/// Handed to the services that need it instead of living in global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub account_id: String,
    pub role: UserRole,
    /// Explicit child selection of a parent session. Ignored for child sessions.
    pub selected_child_id: Option<String>,
}

impl SessionContext {
    pub fn parent(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            role: UserRole::Parent,
            selected_child_id: None,
        }
    }

    pub fn child(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            role: UserRole::Child,
            selected_child_id: None,
        }
    }

    pub fn with_selection(mut self, child_id: Option<String>) -> Self {
        self.selected_child_id = child_id;
        self
    }

    /// Forget the explicit selection
    pub fn reset(&mut self) {
        self.selected_child_id = None;
    }

    pub fn is_parent(&self) -> bool {
        self.role == UserRole::Parent
    }
}
