//! Guest-mode interaction gate.
//!
//! [`InteractionGate`] wraps arbitrary content. While the visitor is a guest
//! it attaches one listener at the subtree boundary that classifies every
//! click from the click origin up to the boundary and suppresses restricted
//! clicks before their own handlers run, opening the sign-in prompt instead.
//! Controls need no knowledge of the gate; they are recognised by marker.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::auth::{AuthView, SignIn};
use crate::config::{self, CopyConfig};
use crate::element::{ClickEvent, ClickListener, ElementTree, NodeId};
use crate::markers::{Classification, Marker, MarkerConfig};
use crate::prompt::{PromptController, PromptView, RestrictedActionRequest};
use crate::styling;

/// Presentation state derived from the auth status and the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    Loading,
    Authenticated,
    Fallback,
    Guarded,
}

/// Persistent guest banner; its sign-in control always carries the exempt marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryBanner {
    pub title: String,
    pub subtitle: String,
    pub sign_in_label: String,
    pub direction: String,
    pub exempt_marker: Marker,
}

/// Rendered output of a gate
#[derive(Debug)]
pub enum GateView<'a, C> {
    /// Neutral loading indicator only
    Loading,
    /// Children untouched, nothing intercepted
    Content(&'a C),
    /// Fallback verbatim, children discarded
    Fallback(&'a C),
    /// Children inside the interception boundary plus banner and prompt
    Guarded {
        content: &'a C,
        banner: AdvisoryBanner,
        prompt: Option<PromptView>,
        stylesheet: &'a str,
    },
}

impl<C> GateView<'_, C> {
    pub fn mode(&self) -> GateMode {
        match self {
            GateView::Loading => GateMode::Loading,
            GateView::Content(_) => GateMode::Authenticated,
            GateView::Fallback(_) => GateMode::Fallback,
            GateView::Guarded { .. } => GateMode::Guarded,
        }
    }
}

/// Result of one click dispatched through a gate
#[derive(Debug, Clone)]
pub struct ClickOutcome {
    pub event: ClickEvent,
    /// `None` when no listener was attached and nothing was classified
    pub classification: Option<Classification>,
    pub request: Option<RestrictedActionRequest>,
}

impl ClickOutcome {
    pub fn suppressed(&self) -> bool {
        self.event.suppressed()
    }
}

pub struct InteractionGate<C> {
    instance: Uuid,
    children: C,
    fallback: Option<C>,
    auth: AuthView,
    prompt: PromptController,
    markers: MarkerConfig,
    copy: CopyConfig,
    stylesheet: String,
    last: Option<(Classification, Option<RestrictedActionRequest>)>,
}

impl<C> InteractionGate<C> {
    /// Mount a gate around `children` using the global configuration
    pub fn new(children: C, auth: AuthView, sign_in: Arc<dyn SignIn>) -> Self {
        let config = config::config();
        let markers = config.markers.clone();
        let copy = config.copy.clone();
        let instance = Uuid::new_v4();
        tracing::debug!(%instance, "gate mounted");

        Self {
            instance,
            children,
            fallback: None,
            auth,
            prompt: PromptController::new(copy.clone(), sign_in),
            stylesheet: styling::restricted_stylesheet(&markers),
            markers,
            copy,
            last: None,
        }
    }

    pub fn with_fallback(mut self, fallback: C) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.stylesheet = styling::restricted_stylesheet(&markers);
        self.markers = markers;
        self
    }

    pub fn with_copy(mut self, copy: CopyConfig) -> Self {
        self.prompt.set_copy(copy.clone());
        self.copy = copy;
        self
    }

    pub fn instance(&self) -> Uuid {
        self.instance
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    /// The prompt as of the current auth status
    pub fn prompt(&mut self) -> &PromptController {
        self.sync_auth();
        &self.prompt
    }

    pub fn mode(&self) -> GateMode {
        let status = self.auth.current();
        if status.is_loading {
            GateMode::Loading
        } else if status.is_authenticated {
            GateMode::Authenticated
        } else if self.fallback.is_some() {
            GateMode::Fallback
        } else {
            GateMode::Guarded
        }
    }

    /// Whether clicks are currently intercepted
    pub fn is_intercepting(&self) -> bool {
        self.mode() == GateMode::Guarded
    }

    fn sync_auth(&mut self) {
        let status = self.auth.current();
        self.prompt.observe(status);
    }

    pub fn render(&mut self) -> GateView<'_, C> {
        self.sync_auth();
        let status = self.auth.current();
        if status.is_loading {
            return GateView::Loading;
        }
        if status.is_authenticated {
            return GateView::Content(&self.children);
        }
        match &self.fallback {
            Some(fallback) => GateView::Fallback(fallback),
            None => GateView::Guarded {
                content: &self.children,
                banner: self.banner(),
                prompt: self.prompt.view(),
                stylesheet: &self.stylesheet,
            },
        }
    }

    fn banner(&self) -> AdvisoryBanner {
        AdvisoryBanner {
            title: self.copy.banner_title.clone(),
            subtitle: self.copy.banner_subtitle.clone(),
            sign_in_label: self.copy.sign_in_label.clone(),
            direction: self.copy.direction.clone(),
            exempt_marker: self.markers.exempt.clone(),
        }
    }

    /// Dispatch a click on `target` within the gated tree. The boundary
    /// listener is attached only while guarded.
    pub fn dispatch(&mut self, tree: &mut ElementTree, target: NodeId) -> ClickOutcome {
        self.sync_auth();
        self.last = None;

        let event = if self.is_intercepting() {
            tree.dispatch_click(target, Some(self as &mut dyn ClickListener))
        } else {
            tree.dispatch_click(target, None)
        };

        let (classification, request) = match self.last.take() {
            Some((classification, request)) => (Some(classification), request),
            None => (None, None),
        };
        ClickOutcome {
            event,
            classification,
            request,
        }
    }

    /// The banner's sign-in control: opens the prompt as is
    pub fn banner_sign_in(&mut self) {
        self.sync_auth();
        if self.is_intercepting() {
            self.prompt.open();
        }
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt.dismiss();
    }

    /// The prompt's sign-in control; does nothing once the prompt has closed
    pub fn prompt_sign_in(&mut self) {
        self.sync_auth();
        if self.prompt.is_open() {
            self.prompt.sign_in();
        }
    }

    fn action_label(&self, event: &ClickEvent) -> String {
        event
            .path
            .iter()
            .find_map(|element| element.action())
            .unwrap_or(self.copy.default_action.as_str())
            .to_string()
    }
}

impl<C> ClickListener for InteractionGate<C> {
    fn on_click(&mut self, event: &mut ClickEvent) {
        if !self.is_intercepting() {
            return;
        }

        let classification = self.markers.classify(&event.path);
        let request = match &classification {
            Classification::Restricted(kind) => {
                event.prevent_default();
                event.stop_propagation();
                let request = RestrictedActionRequest::new(self.action_label(event));
                tracing::info!(
                    instance = %self.instance,
                    kind = %kind,
                    action = %request.action_label,
                    "restricted click suppressed"
                );
                self.prompt.request(request.clone());
                Some(request)
            }
            Classification::Exempt | Classification::Unclassified => {
                tracing::debug!(
                    instance = %self.instance,
                    ?classification,
                    "click passed through"
                );
                None
            }
        };
        self.last = Some((classification, request));
    }
}

impl<C> Drop for InteractionGate<C> {
    fn drop(&mut self) {
        tracing::debug!(instance = %self.instance, "gate unmounted");
    }
}

impl<C> std::fmt::Debug for InteractionGate<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionGate")
            .field("instance", &self.instance)
            .field("mode", &self.mode())
            .field("prompt", &self.prompt)
            .finish()
    }
}
