//! Sign-in prompt shown when the gate blocks an action.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::{AuthStatus, SignIn};
use crate::config::CopyConfig;

/// Created when a restricted click is intercepted and consumed immediately
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestrictedActionRequest {
    pub action_label: String,
}

impl RestrictedActionRequest {
    pub fn new(action_label: impl Into<String>) -> Self {
        Self {
            action_label: action_label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptState {
    pub is_open: bool,
    pub message: String,
}

/// What an open prompt presents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptView {
    pub title: String,
    pub message: String,
    pub sign_in_label: String,
    pub dismiss_label: String,
    pub direction: String,
}

/// Two-state modal: closed, or open with a message.
///
/// Only the controller mutates its [`PromptState`]. It closes on dismissal
/// and whenever it observes an authenticated status.
pub struct PromptController {
    state: PromptState,
    copy: CopyConfig,
    sign_in: Arc<dyn SignIn>,
}

impl PromptController {
    pub fn new(copy: CopyConfig, sign_in: Arc<dyn SignIn>) -> Self {
        Self {
            state: PromptState::default(),
            copy,
            sign_in,
        }
    }

    pub(crate) fn set_copy(&mut self, copy: CopyConfig) {
        self.copy = copy;
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn message(&self) -> &str {
        &self.state.message
    }

    pub fn request(&mut self, request: RestrictedActionRequest) {
        self.state.message = self.copy.prompt_message(&request.action_label);
        self.state.is_open = true;
        tracing::info!(action = %request.action_label, "sign-in prompt opened");
    }

    /// Open without changing the current message
    pub fn open(&mut self) {
        if !self.state.is_open {
            self.state.is_open = true;
            tracing::info!("sign-in prompt opened from banner");
        }
    }

    pub fn dismiss(&mut self) {
        if self.state.is_open {
            self.state.is_open = false;
            tracing::debug!("sign-in prompt dismissed");
        }
    }

    /// React to the latest auth status: a signed-in user never sees the prompt
    pub fn observe(&mut self, status: AuthStatus) {
        if self.state.is_open && status.is_member() {
            self.state.is_open = false;
            tracing::info!("sign-in prompt closed after authentication");
        }
    }

    pub fn view(&self) -> Option<PromptView> {
        if !self.state.is_open {
            return None;
        }
        Some(PromptView {
            title: self.copy.prompt_title.clone(),
            message: self.state.message.clone(),
            sign_in_label: self.copy.sign_in_label.clone(),
            dismiss_label: self.copy.dismiss_label.clone(),
            direction: self.copy.direction.clone(),
        })
    }

    /// The prompt's sign-in affordance; hands off to the identity flow
    pub fn sign_in(&self) {
        self.sign_in.begin_sign_in();
    }
}

impl std::fmt::Debug for PromptController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptController")
            .field("state", &self.state)
            .finish()
    }
}
