//! Structural markers and click-path classification.
//!
//! The gate never knows the controls it protects. It only recognises them by
//! structural markers: an element kind (`button`) or a class name
//! (`btn-primary`). The set of recognised markers is an explicit
//! [`MarkerConfig`]; anything outside it is never gated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::GateError;

/// A structural selector matched against a single element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marker {
    /// Element kind, e.g. `button`
    Tag(String),
    /// Class name, e.g. `btn-primary`
    Class(String),
}

impl Marker {
    pub fn tag(name: impl Into<String>) -> Self {
        Marker::Tag(name.into().to_ascii_lowercase())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Marker::Class(name.into())
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Marker::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            Marker::Class(class) => element.has_class(class),
        }
    }

    /// CSS selector form: `button` or `.btn-primary`
    pub fn selector(&self) -> String {
        match self {
            Marker::Tag(tag) => tag.clone(),
            Marker::Class(class) => format!(".{}", class),
        }
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for Marker {
    type Err = GateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let marker = if let Some(name) = trimmed.strip_prefix("tag:") {
            Marker::tag(name)
        } else if let Some(name) = trimmed.strip_prefix("class:") {
            Marker::class(name)
        } else if let Some(name) = trimmed.strip_prefix('.') {
            Marker::class(name)
        } else {
            Marker::tag(trimmed)
        };

        let name = match &marker {
            Marker::Tag(name) | Marker::Class(name) => name,
        };
        if !valid_name(name) {
            return Err(GateError::invalid_marker(raw));
        }
        Ok(marker)
    }
}

impl TryFrom<String> for Marker {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.to_string()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Tag(tag) => write!(f, "tag:{}", tag),
            Marker::Class(class) => write!(f, "class:{}", class),
        }
    }
}

/// Recognised interactive-control categories
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictedKind {
    PrimaryAction,
    GenericButton,
    InteractiveCard,
    Custom(String),
}

impl fmt::Display for RestrictedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictedKind::PrimaryAction => write!(f, "primary_action"),
            RestrictedKind::GenericButton => write!(f, "generic_button"),
            RestrictedKind::InteractiveCard => write!(f, "interactive_card"),
            RestrictedKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedCategory {
    pub kind: RestrictedKind,
    pub marker: Marker,
}

impl RestrictedCategory {
    pub fn new(kind: RestrictedKind, marker: Marker) -> Self {
        Self { kind, marker }
    }
}

/// Outcome of classifying one click path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "classification", content = "kind", rename_all = "snake_case")]
pub enum Classification {
    Exempt,
    Restricted(RestrictedKind),
    Unclassified,
}

impl Classification {
    pub fn is_restricted(&self) -> bool {
        matches!(self, Classification::Restricted(_))
    }
}

/// The registry of markers the gate understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub exempt: Marker,
    pub restricted: Vec<RestrictedCategory>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            exempt: Marker::class("guest-allowed"),
            restricted: vec![
                RestrictedCategory::new(RestrictedKind::PrimaryAction, Marker::class("btn-primary")),
                RestrictedCategory::new(RestrictedKind::GenericButton, Marker::tag("button")),
                RestrictedCategory::new(RestrictedKind::InteractiveCard, Marker::class("card-interactive")),
            ],
        }
    }
}

impl MarkerConfig {
    /// Parse a comma separated restricted list. Entries may be prefixed with
    /// a category (`primary_action=class:btn-primary`); unprefixed entries
    /// become custom categories named after their marker.
    pub fn parse_restricted(raw: &str) -> Result<Vec<RestrictedCategory>, GateError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (kind, marker) = match entry.split_once('=') {
                    Some((kind, marker)) => {
                        let kind = match kind.trim() {
                            "primary_action" => RestrictedKind::PrimaryAction,
                            "generic_button" => RestrictedKind::GenericButton,
                            "interactive_card" => RestrictedKind::InteractiveCard,
                            other => RestrictedKind::Custom(other.to_string()),
                        };
                        (kind, marker.parse::<Marker>()?)
                    }
                    None => {
                        let marker = entry.parse::<Marker>()?;
                        (RestrictedKind::Custom(marker.selector()), marker)
                    }
                };
                Ok(RestrictedCategory::new(kind, marker))
            })
            .collect()
    }

    /// Classify a click path ordered from the click origin to the boundary.
    ///
    /// The whole path is scanned for the exempt marker before any restricted
    /// match is considered, so an exempt ancestor covers a restricted leaf and
    /// an exempt leaf covers a restricted ancestor.
    pub fn classify(&self, path: &[Element]) -> Classification {
        if path.iter().any(|element| self.exempt.matches(element)) {
            return Classification::Exempt;
        }

        path.iter()
            .find_map(|element| {
                self.restricted
                    .iter()
                    .find(|category| category.marker.matches(element))
                    .map(|category| Classification::Restricted(category.kind.clone()))
            })
            .unwrap_or(Classification::Unclassified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_parsing_forms() {
        assert_eq!("tag:button".parse::<Marker>().unwrap(), Marker::tag("button"));
        assert_eq!("BUTTON".parse::<Marker>().unwrap(), Marker::tag("button"));
        assert_eq!("class:btn-primary".parse::<Marker>().unwrap(), Marker::class("btn-primary"));
        assert_eq!(".card-interactive".parse::<Marker>().unwrap(), Marker::class("card-interactive"));
        assert_eq!(Marker::class("guest-allowed").to_string(), "class:guest-allowed");
    }

    #[test]
    fn test_marker_rejects_bad_names() {
        assert!("".parse::<Marker>().is_err());
        assert!("class:".parse::<Marker>().is_err());
        assert!(".two words".parse::<Marker>().is_err());
        assert!("div.card".parse::<Marker>().is_err());
    }

    #[test]
    fn test_marker_serde_uses_string_form() {
        let json = serde_json::to_string(&Marker::class("btn-primary")).unwrap();
        assert_eq!(json, "\"class:btn-primary\"");
        let back: Marker = serde_json::from_str("\".btn-primary\"").unwrap();
        assert_eq!(back, Marker::class("btn-primary"));
    }

    #[test]
    fn test_parse_restricted_list() {
        let parsed = MarkerConfig::parse_restricted("primary_action=.btn-primary, a, class:chip").unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].kind, RestrictedKind::PrimaryAction);
        assert_eq!(parsed[1].kind, RestrictedKind::Custom("a".to_string()));
        assert_eq!(parsed[2].marker, Marker::class("chip"));
    }

    #[test]
    fn test_exempt_anywhere_on_path_wins() {
        let markers = MarkerConfig::default();
        let exempt_root = vec![
            Element::new("button").with_class("btn-primary"),
            Element::new("div").with_class("guest-allowed"),
        ];
        let exempt_leaf = vec![
            Element::new("span").with_class("guest-allowed"),
            Element::new("div").with_class("card-interactive"),
        ];
        assert_eq!(markers.classify(&exempt_root), Classification::Exempt);
        assert_eq!(markers.classify(&exempt_leaf), Classification::Exempt);
    }

    #[test]
    fn test_restricted_kind_reported_from_nearest_match() {
        let markers = MarkerConfig::default();
        let path = vec![
            Element::new("span"),
            Element::new("button").with_class("btn-primary"),
            Element::new("div").with_class("card-interactive"),
        ];
        assert_eq!(
            markers.classify(&path),
            Classification::Restricted(RestrictedKind::PrimaryAction)
        );
    }

    #[test]
    fn test_unmarked_path_is_unclassified() {
        let markers = MarkerConfig::default();
        let path = vec![Element::new("a").with_class("link"), Element::new("p")];
        assert_eq!(markers.classify(&path), Classification::Unclassified);
        assert_eq!(markers.classify(&[]), Classification::Unclassified);
    }
}
