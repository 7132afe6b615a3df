//! Session state
//!
//! Holds the auth state pushed by the hosted auth provider. Consumers either
//! read the current value or subscribe to transitions.
//!
//! Every sign-in issues a fresh session token. Requests act as the signed-in
//! user only when they present that token; a later publish or a sign-out
//! invalidates it.

use std::sync::RwLock;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::{AuthState, SessionUser};

/// Publish/subscribe holder for the current auth state
pub struct SessionState {
    sender: watch::Sender<AuthState>,
    /// Token of the current sign-in; `None` while nobody is signed in
    token: RwLock<Option<String>>,
}

impl SessionState {
    /// Starts in the loading state
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AuthState::loading());
        Self {
            sender,
            token: RwLock::new(None),
        }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    /// Receiver that observes every later transition
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    /// Replace the state, filling in a missing display name.
    ///
    /// Returns the new session token when the state carries a user.
    pub fn publish(&self, mut state: AuthState) -> Option<String> {
        state.user = state.user.map(SessionUser::with_default_display_name);

        match &state.user {
            Some(user) => tracing::info!("Session signed in as {}", user.id),
            None if state.is_loading => tracing::debug!("Session loading"),
            None => tracing::info!("Session signed out"),
        }

        let issued = state.user.as_ref().map(|_| Uuid::new_v4().to_string());

        let mut token = self.token.write().unwrap_or_else(|e| e.into_inner());
        *token = issued.clone();
        self.sender.send_replace(state);

        issued
    }

    /// The signed-in user, if `presented` is the current session token
    pub fn authenticate(&self, presented: &str) -> Option<SessionUser> {
        let token = self.token.read().unwrap_or_else(|e| e.into_inner());
        match token.as_deref() {
            Some(current) if tokens_match(current, presented) => self.sender.borrow().user.clone(),
            _ => None,
        }
    }

    /// Fire-and-forget logout
    pub fn sign_out(&self) {
        self.publish(AuthState::signed_out());
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two secrets without stopping at the first differing byte
pub(crate) fn tokens_match(expected: &str, presented: &str) -> bool {
    let (a, b) = (expected.as_bytes(), presented.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
