pub mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "pistac-gate")]
#[command(about = "Pistac guest-mode gate - classify clicks, replay scenarios, render gate chrome")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "YAML configuration file (defaults to environment)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Classify a click path given from the click origin up to the boundary")]
    Classify {
        #[arg(required = true, help = "Node specs such as span div.card-interactive div.catalog")]
        path: Vec<String>,
    },

    #[command(about = "Replay a YAML gate scenario and report every step")]
    Replay {
        #[arg(help = "Scenario file")]
        scenario: PathBuf,
    },

    #[command(about = "Render gate or veil chrome around sample content as HTML")]
    Render(commands::render::RenderArgs),

    #[command(about = "Print the guest-restricted stylesheet")]
    Styles,

    #[command(about = "Print the effective configuration")]
    Config,

    #[command(about = "Identity provider operations")]
    Identity {
        #[command(subcommand)]
        cmd: commands::identity::IdentityCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { path } => commands::classify::handle(&path, &config, output_format),
        Commands::Replay { scenario } => commands::replay::handle(&scenario, &config, output_format),
        Commands::Render(args) => commands::render::handle(args, &config, output_format),
        Commands::Styles => commands::styles::handle(&config, output_format),
        Commands::Config => commands::config::handle(&config, output_format),
        Commands::Identity { cmd } => commands::identity::handle(cmd, &config, output_format).await,
    }
}
