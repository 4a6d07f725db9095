//! Whole-region veil: obscured content under a fixed sign-in call-to-action.
//!
//! Unlike the interaction gate there is no click handling and no auth check.
//! Callers apply the veil only where the whole region should read as gated.

use std::sync::Arc;

use serde::Serialize;

use crate::config::{self, CopyConfig};
use crate::element::{ClickEvent, ElementTree, NodeId};
use crate::notify::{NotifyParent, ParentMessage};

/// The overlay shown above veiled content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VeilOverlay {
    pub title: String,
    pub body: String,
    pub call_to_action: String,
    pub direction: String,
}

#[derive(Debug)]
pub struct VeilView<'a, C> {
    pub content: &'a C,
    pub overlay: VeilOverlay,
}

pub struct ContentVeil<C> {
    children: C,
    copy: CopyConfig,
    notify: Arc<dyn NotifyParent>,
}

impl<C> ContentVeil<C> {
    pub fn new(children: C, notify: Arc<dyn NotifyParent>) -> Self {
        Self {
            children,
            copy: config::config().copy.clone(),
            notify,
        }
    }

    pub fn with_copy(mut self, copy: CopyConfig) -> Self {
        self.copy = copy;
        self
    }

    /// The overlay is always present
    pub fn render(&self) -> VeilView<'_, C> {
        VeilView {
            content: &self.children,
            overlay: VeilOverlay {
                title: self.copy.veil_title.clone(),
                body: self.copy.veil_body.clone(),
                call_to_action: self.copy.sign_in_label.clone(),
                direction: self.copy.direction.clone(),
            },
        }
    }

    /// Clicks inside the veil reach their handlers untouched
    pub fn dispatch(&self, tree: &mut ElementTree, target: NodeId) -> ClickEvent {
        tree.dispatch_click(target, None)
    }

    /// Ask the parent surface to switch to its authentication view
    pub fn activate_call_to_action(&self) {
        tracing::debug!("veil call-to-action, switching parent to profile tab");
        self.notify.post(ParentMessage::switch_to_profile());
    }
}

impl<C> std::fmt::Debug for ContentVeil<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentVeil").finish_non_exhaustive()
    }
}
