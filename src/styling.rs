//! Stylesheet dimming restricted controls inside a guarded region.

use std::fmt::Write;

use crate::markers::{MarkerConfig, RestrictedKind};

/// Class placed on the guarded region's wrapper
pub const GUARD_SCOPE: &str = "guest-restricted";

fn scoped(selector: &str, exempt: &str, suffix: &str) -> String {
    format!(".{} {}:not({}){}", GUARD_SCOPE, selector, exempt, suffix)
}

/// Build the guest-restricted stylesheet for the configured markers. Every
/// restricted control gets a translucent overlay; interactive cards darken
/// on hover. Exempt controls, and restricted controls inside an exempt
/// ancestor, are left alone.
pub fn restricted_stylesheet(markers: &MarkerConfig) -> String {
    if markers.restricted.is_empty() {
        return String::new();
    }

    let exempt = markers.exempt.selector();
    let selectors = |suffix: &str| {
        markers
            .restricted
            .iter()
            .map(|category| scoped(&category.marker.selector(), &exempt, suffix))
            .collect::<Vec<_>>()
            .join(",\n")
    };

    let mut css = String::new();
    let _ = writeln!(css, "{} {{\n  position: relative;\n  overflow: hidden;\n}}\n", selectors(""));
    let _ = writeln!(
        css,
        "{} {{\n  content: '';\n  position: absolute;\n  top: 0;\n  left: 0;\n  right: 0;\n  bottom: 0;\n  background: rgba(0, 0, 0, 0.1);\n  z-index: 1;\n}}",
        selectors("::after")
    );

    for category in markers
        .restricted
        .iter()
        .filter(|category| category.kind == RestrictedKind::InteractiveCard)
    {
        let _ = writeln!(
            css,
            "\n{} {{\n  background: rgba(0, 0, 0, 0.2);\n}}",
            scoped(&category.marker.selector(), &exempt, ":hover::after")
        );
    }

    // Same specificity as the overlay rule, so it has to come last
    let inside_exempt = markers
        .restricted
        .iter()
        .map(|category| format!(".{} {} {}::after", GUARD_SCOPE, exempt, category.marker.selector()))
        .collect::<Vec<_>>()
        .join(",\n");
    let _ = writeln!(css, "\n{} {{\n  content: none;\n}}", inside_exempt);

    css
}
