use serde_json::json;

use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::element::Element;
use crate::error::GateError;
use crate::markers::Classification;

pub fn handle(path: &[String], config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let elements = path
        .iter()
        .map(|spec| Element::parse_spec(spec).ok_or_else(|| GateError::InvalidNodeSpec(spec.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let classification = config.markers.classify(&elements);
    tracing::debug!(?classification, depth = elements.len(), "classified path");

    let data = json!({
        "path": path,
        "classification": classification,
        "suppressed": classification.is_restricted(),
    });
    output_data(&output_format, &data, |_| match &classification {
        Classification::Exempt => "exempt: click passes through".to_string(),
        Classification::Restricted(kind) => format!("restricted ({}): click suppressed, prompt opens", kind),
        Classification::Unclassified => "unclassified: click passes through".to_string(),
    })
}
