use crate::cli::utils::output_data;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    output_data(&output_format, config, |config| {
        serde_yaml::to_string(config).unwrap_or_else(|e| format!("failed to render configuration: {}", e))
    })
}
