use crate::cli::utils::output_raw;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::styling;

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let css = styling::restricted_stylesheet(&config.markers);
    output_raw(&output_format, "stylesheet", &css)
}
