//! HTML for the gate and veil chrome around pre-rendered content.
//!
//! Content is inserted as is; every configured string is escaped.

use crate::gate::{AdvisoryBanner, GateView};
use crate::markers::Marker;
use crate::prompt::PromptView;
use crate::styling::GUARD_SCOPE;
use crate::veil::VeilView;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const LOADING: &str = r#"<div class="gate-loading" role="status" aria-busy="true"><div class="gate-spinner"></div></div>"#;

fn banner(banner: &AdvisoryBanner) -> String {
    let exempt_class = match &banner.exempt_marker {
        Marker::Class(class) => format!(" {}", escape(class)),
        Marker::Tag(_) => String::new(),
    };
    format!(
        concat!(
            r#"<div class="guest-banner" dir="{dir}">"#,
            r#"<div class="guest-banner-text"><p class="guest-banner-title">{title}</p>"#,
            r#"<p class="guest-banner-subtitle">{subtitle}</p></div>"#,
            r#"<button class="guest-banner-sign-in{exempt}" data-gate-action="open-prompt">{label}</button>"#,
            "</div>"
        ),
        dir = escape(&banner.direction),
        title = escape(&banner.title),
        subtitle = escape(&banner.subtitle),
        exempt = exempt_class,
        label = escape(&banner.sign_in_label),
    )
}

fn prompt(prompt: &PromptView) -> String {
    format!(
        concat!(
            r#"<div class="gate-prompt" role="dialog" aria-modal="true" dir="{dir}">"#,
            r#"<h3 class="gate-prompt-title">{title}</h3>"#,
            r#"<p class="gate-prompt-message">{message}</p>"#,
            r#"<button class="gate-prompt-sign-in" data-gate-action="sign-in">{sign_in}</button>"#,
            r#"<button class="gate-prompt-dismiss" data-gate-action="dismiss">{dismiss}</button>"#,
            "</div>"
        ),
        dir = escape(&prompt.direction),
        title = escape(&prompt.title),
        message = escape(&prompt.message),
        sign_in = escape(&prompt.sign_in_label),
        dismiss = escape(&prompt.dismiss_label),
    )
}

pub fn render_gate<C: AsRef<str>>(view: &GateView<'_, C>) -> String {
    match view {
        GateView::Loading => LOADING.to_string(),
        GateView::Content(content) | GateView::Fallback(content) => content.as_ref().to_string(),
        GateView::Guarded {
            content,
            banner: advisory,
            prompt: modal,
            stylesheet,
        } => {
            let mut html = String::from(r#"<div class="gate">"#);
            if !stylesheet.is_empty() {
                html.push_str("<style>");
                html.push_str(stylesheet);
                html.push_str("</style>");
            }
            html.push_str(&format!(
                r#"<div class="{}" data-gate-boundary="true">{}</div>"#,
                GUARD_SCOPE,
                content.as_ref()
            ));
            html.push_str(&banner(advisory));
            if let Some(modal) = modal {
                html.push_str(&prompt(modal));
            }
            html.push_str("</div>");
            html
        }
    }
}

pub fn render_veil<C: AsRef<str>>(view: &VeilView<'_, C>) -> String {
    let overlay = &view.overlay;
    format!(
        concat!(
            r#"<div class="veil">"#,
            r#"<div class="veil-overlay"><div class="veil-card" dir="{dir}">"#,
            r#"<h3 class="veil-title">{title}</h3><p class="veil-body">{body}</p>"#,
            r#"<button class="veil-call-to-action" data-gate-action="switch-tab">{cta}</button>"#,
            "</div></div>",
            r#"<div class="veil-content" aria-hidden="true">{content}</div>"#,
            "</div>"
        ),
        dir = escape(&overlay.direction),
        title = escape(&overlay.title),
        body = escape(&overlay.body),
        cta = escape(&overlay.call_to_action),
        content = view.content.as_ref(),
    )
}
