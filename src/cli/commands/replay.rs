use std::path::Path;

use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::script::{Scenario, ScenarioReport};

pub fn handle(path: &Path, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let scenario = Scenario::load(path)?;
    let report = scenario.run(&config.markers, &config.copy)?;
    output_data(&output_format, &report, text_report)
}

fn text_report(report: &ScenarioReport) -> String {
    let mut lines = vec![format!(
        "Scenario '{}' ({} steps, {} suppressed)",
        report.name,
        report.steps.len(),
        report.suppressed_count()
    )];
    for (index, step) in report.steps.iter().enumerate() {
        let mut line = format!("{:>3}. {:<24} mode={:?}", index + 1, step.step, step.mode);
        if step.suppressed {
            line.push_str(" SUPPRESSED");
        }
        if !step.handlers.is_empty() {
            line.push_str(&format!(" handlers=[{}]", step.handlers.join(", ")));
        }
        if step.prompt.is_open {
            line.push_str(&format!(" prompt=\"{}\"", step.prompt.message));
        }
        if step.sign_in_requests > 0 {
            line.push_str(&format!(" sign-ins={}", step.sign_in_requests));
        }
        lines.push(line);
    }
    lines.join("\n")
}
