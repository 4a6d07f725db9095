#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use pistac_gate::auth::AuthView;
use pistac_gate::config::CopyConfig;
use pistac_gate::{Element, ElementTree, InteractionGate, MarkerConfig, NodeId};

/// A gated page holding one control of every kind
pub struct Page {
    pub tree: ElementTree,
    pub primary: NodeId,
    pub button: NodeId,
    pub card: NodeId,
    pub card_title: NodeId,
    pub exempt: NodeId,
    /// `span` inside an exempt wrapper that sits inside a primary-action control
    pub nested_exempt: NodeId,
    /// restricted `button.btn-primary` inside an exempt zone
    pub zone_button: NodeId,
    pub link: NodeId,
    pub text: NodeId,
    pub hits: Rc<Cell<u32>>,
}

impl Page {
    pub fn hits(&self) -> u32 {
        self.hits.get()
    }
}

pub fn page() -> Page {
    let mut tree = ElementTree::new(Element::new("main").with_class("library"));
    let root = tree.root();

    let primary = tree.append(root, Element::new("a").with_class("btn-primary").with_action("buy this workshop"));
    let button = tree.append(root, Element::new("button"));
    let card = tree.append(root, Element::new("div").with_class("card-interactive"));
    let card_title = tree.append(card, Element::new("h4"));
    let exempt = tree.append(root, Element::new("button").with_class("guest-allowed"));
    let cta = tree.append(root, Element::new("div").with_class("btn-primary"));
    let wrapper = tree.append(cta, Element::new("div").with_class("guest-allowed"));
    let nested_exempt = tree.append(wrapper, Element::new("span"));
    let zone = tree.append(root, Element::new("section").with_class("guest-allowed"));
    let zone_button = tree.append(zone, Element::new("button").with_class("btn-primary"));
    let link = tree.append(root, Element::new("a").with_class("nav-link"));
    let text = tree.append(root, Element::new("p"));

    let hits = Rc::new(Cell::new(0));
    for node in [primary, button, card, exempt, nested_exempt, zone_button, link, text] {
        let counter = hits.clone();
        tree.on_click(node, move |_| counter.set(counter.get() + 1));
    }

    Page {
        tree,
        primary,
        button,
        card,
        card_title,
        exempt,
        nested_exempt,
        zone_button,
        link,
        text,
        hits,
    }
}

pub fn copy() -> CopyConfig {
    CopyConfig {
        prompt_template: "Sign in to {action}".to_string(),
        default_action: "use this feature".to_string(),
        ..CopyConfig::default()
    }
}

/// Gate with English copy and the default markers; returns the sign-in counter
pub fn gate(auth: AuthView) -> (InteractionGate<&'static str>, Arc<AtomicUsize>) {
    let sign_ins = Arc::new(AtomicUsize::new(0));
    let counter = sign_ins.clone();
    let gate = InteractionGate::new("library", auth, Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
    .with_markers(MarkerConfig::default())
    .with_copy(copy());
    (gate, sign_ins)
}

/// Local stand-in for the platform identity endpoints
pub struct IdentityStub {
    pub base_url: String,
}

impl IdentityStub {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind identity stub")?;

        let app = Router::new()
            .route("/api/auth/user", get(|| async { Json(json!({ "id": 7, "username": "reader" })) }))
            .route("/api/guest/user", get(|| async { (StatusCode::UNAUTHORIZED, "Unauthorized") }))
            .route("/api/null/user", get(|| async { Json(Value::Null) }))
            .route("/api/broken/user", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
        })
    }
}
