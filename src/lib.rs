pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod element;
pub mod error;
pub mod gate;
pub mod html;
pub mod identity;
pub mod markers;
pub mod notify;
pub mod prompt;
pub mod script;
pub mod styling;
pub mod veil;

pub use auth::{AuthStatus, AuthView, IdentityProvider, SignIn};
pub use element::{ClickEvent, ClickListener, Element, ElementTree, NodeId};
pub use gate::{ClickOutcome, GateMode, GateView, InteractionGate};
pub use markers::{Classification, Marker, MarkerConfig, RestrictedKind};
pub use notify::{NotifyParent, ParentMessage};
pub use prompt::{PromptController, PromptState, RestrictedActionRequest};
pub use veil::ContentVeil;

#[cfg(test)]
pub mod testing;
