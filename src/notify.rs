//! Messages posted to the parent surface hosting an embedded page.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Structured message for the parent context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentMessage {
    SwitchTab { tab: String },
}

impl ParentMessage {
    /// Ask the parent to show its authentication view
    pub fn switch_to_profile() -> Self {
        ParentMessage::SwitchTab {
            tab: "profile".to_string(),
        }
    }
}

/// Fire-and-forget port to the parent context
pub trait NotifyParent: Send + Sync {
    fn post(&self, message: ParentMessage);
}

impl<F> NotifyParent for F
where
    F: Fn(ParentMessage) + Send + Sync,
{
    fn post(&self, message: ParentMessage) {
        self(message)
    }
}

/// Notifier backed by an unbounded channel. A closed receiver drops the
/// message; nobody waits for an acknowledgment.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<ParentMessage>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ParentMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotifyParent for ChannelNotifier {
    fn post(&self, message: ParentMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("parent context gone, message dropped");
        }
    }
}
