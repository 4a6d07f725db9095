use clap::Subcommand;
use serde_json::json;
use url::Url;

use crate::auth::{IdentityProvider, SignIn};
use crate::cli::utils::{output_data, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::identity::{self, HttpIdentity, LoginRedirect};

#[derive(Subcommand)]
pub enum IdentityCommands {
    #[command(about = "Resolve the current authentication status from the identity endpoint")]
    Status,

    #[command(about = "Show where the sign-in flow starts")]
    Login,
}

pub async fn handle(cmd: IdentityCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        IdentityCommands::Status => {
            let source = HttpIdentity::from_config(&config.identity)?;
            let provider = IdentityProvider::new();
            let status = identity::refresh(&provider, &source).await;
            output_data(&output_format, &status, |status| {
                format!("{} ({}{})", status.label(), config.identity.base_url, config.identity.user_path)
            })
        }
        IdentityCommands::Login => {
            let redirect = LoginRedirect::from_config(&config.identity, |url: &Url| {
                tracing::debug!(%url, "navigate");
            })?;
            redirect.begin_sign_in();
            let login_url = redirect.login_url().to_string();
            output_success(
                &output_format,
                &format!("Sign in at {}", login_url),
                Some(json!({ "login_url": login_url })),
            )
        }
    }
}
