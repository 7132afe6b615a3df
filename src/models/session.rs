//! Auth session model
//!
//! Shape of the auth-state transitions delivered by the hosted auth provider.

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// Fill a missing display name with the local part of the email
    pub fn with_default_display_name(mut self) -> Self {
        if self.display_name.trim().is_empty() {
            self.display_name = self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string();
        }
        self
    }
}

/// One auth-state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub is_loading: bool,
}

impl AuthState {
    /// State before the provider has reported anything
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            is_loading: false,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}
