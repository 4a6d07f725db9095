use std::sync::Arc;

use clap::Args;

use crate::auth::{AuthStatus, AuthView};
use crate::cli::utils::output_raw;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::element::{Element, ElementTree};
use crate::gate::InteractionGate;
use crate::html;
use crate::markers::Marker;
use crate::notify::ParentMessage;
use crate::veil::ContentVeil;

const SAMPLE_CONTENT: &str = concat!(
    r#"<div class="card-interactive"><h4>Course</h4>"#,
    r#"<button class="btn-primary">Enroll</button>"#,
    r#"<button class="guest-allowed">Preview</button></div>"#
);

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(long, default_value = "guest", help = "Auth state: loading, guest or member")]
    pub state: String,

    #[arg(long, help = "Content HTML to wrap (defaults to a sample course card)")]
    pub content: Option<String>,

    #[arg(long, help = "Fallback HTML shown to guests instead of the content")]
    pub fallback: Option<String>,

    #[arg(long, help = "Render the whole-region veil instead of the gate")]
    pub veil: bool,

    #[arg(long, help = "Open the prompt as if a click on this action had been blocked")]
    pub blocked: Option<String>,
}

pub fn handle(args: RenderArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let content = args.content.unwrap_or_else(|| SAMPLE_CONTENT.to_string());

    if args.veil {
        let veil = ContentVeil::new(
            content,
            Arc::new(|message: ParentMessage| tracing::debug!(?message, "parent message")),
        )
        .with_copy(config.copy.clone());
        return output_raw(&output_format, "html", &html::render_veil(&veil.render()));
    }

    let status: AuthStatus = args.state.parse()?;
    let mut gate = InteractionGate::new(content, AuthView::fixed(status), Arc::new(|| {}))
        .with_markers(config.markers.clone())
        .with_copy(config.copy.clone());
    if let Some(fallback) = args.fallback {
        gate = gate.with_fallback(fallback);
    }

    if let Some(action) = args.blocked {
        // Drive the prompt through a real blocked click
        let mut tree = ElementTree::new(Element::new("div"));
        let root = tree.root();
        let control = match config.markers.restricted.first().map(|category| &category.marker) {
            Some(Marker::Tag(tag)) => Element::new(tag.as_str()),
            Some(Marker::Class(class)) => Element::new("button").with_class(class.as_str()),
            None => Element::new("button"),
        }
        .with_action(action);
        let target = tree.append(root, control);
        gate.dispatch(&mut tree, target);
    }

    let markup = html::render_gate(&gate.render());
    output_raw(&output_format, "html", &markup)
}
