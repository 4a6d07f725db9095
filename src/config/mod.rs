use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{GateError, GateResult};
use crate::markers::{Marker, MarkerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub markers: MarkerConfig,
    pub copy: CopyConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// User-facing strings of the gate chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Prompt message; `{action}` is replaced with the blocked action label
    pub prompt_template: String,
    pub default_action: String,
    pub prompt_title: String,
    pub sign_in_label: String,
    pub dismiss_label: String,
    pub banner_title: String,
    pub banner_subtitle: String,
    pub veil_title: String,
    pub veil_body: String,
    /// Text direction of the chrome (`rtl` or `ltr`)
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,
    pub user_path: String,
    pub login_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub filter: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            prompt_template: "برای {action} باید وارد حساب کاربری خود شوید".to_string(),
            default_action: "استفاده از این قابلیت".to_string(),
            prompt_title: "ورود به حساب کاربری".to_string(),
            sign_in_label: "ورود".to_string(),
            dismiss_label: "بستن".to_string(),
            banner_title: "شما در حالت مهمان هستید".to_string(),
            banner_subtitle: "برای دسترسی کامل وارد شوید".to_string(),
            veil_title: "کاربر مهمان".to_string(),
            veil_body: "برای دسترسی کامل به محتوا، لطفاً وارد شوید".to_string(),
            direction: "rtl".to_string(),
        }
    }
}

impl CopyConfig {
    pub fn prompt_message(&self, action: &str) -> String {
        self.prompt_template.replace("{action}", action)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            user_path: "/api/auth/user".to_string(),
            login_path: "/api/login".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pistac_gate=debug".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Load a YAML file; missing sections fall back to development defaults.
    /// Environment overrides still apply on top.
    pub fn from_yaml_file(path: &Path) -> GateResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GateError::io(path.display().to_string(), e))?;
        let config: AppConfig = serde_yaml::from_str(&raw)?;
        Ok(config.with_env_overrides())
    }

    pub fn load(path: Option<&Path>) -> GateResult<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::from_env()),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Marker overrides
        if let Ok(v) = env::var("GATE_EXEMPT_MARKER") {
            match v.parse::<Marker>() {
                Ok(marker) => self.markers.exempt = marker,
                Err(e) => tracing::warn!("ignoring GATE_EXEMPT_MARKER: {}", e),
            }
        }
        if let Ok(v) = env::var("GATE_RESTRICTED_MARKERS") {
            match MarkerConfig::parse_restricted(&v) {
                Ok(restricted) if !restricted.is_empty() => self.markers.restricted = restricted,
                Ok(_) => tracing::warn!("ignoring empty GATE_RESTRICTED_MARKERS"),
                Err(e) => tracing::warn!("ignoring GATE_RESTRICTED_MARKERS: {}", e),
            }
        }

        // Copy overrides
        if let Ok(v) = env::var("GATE_PROMPT_TEMPLATE") {
            self.copy.prompt_template = v;
        }
        if let Ok(v) = env::var("GATE_DEFAULT_ACTION") {
            self.copy.default_action = v;
        }
        if let Ok(v) = env::var("GATE_DIRECTION") {
            self.copy.direction = v;
        }

        // Identity overrides
        if let Ok(v) = env::var("IDENTITY_BASE_URL") {
            self.identity.base_url = v;
        }
        if let Ok(v) = env::var("IDENTITY_USER_PATH") {
            self.identity.user_path = v;
        }
        if let Ok(v) = env::var("IDENTITY_LOGIN_PATH") {
            self.identity.login_path = v;
        }

        if let Ok(v) = env::var("LOG_FILTER") {
            self.logging.filter = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            markers: MarkerConfig::default(),
            copy: CopyConfig::default(),
            identity: IdentityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            identity: IdentityConfig {
                base_url: "https://staging.example.com".to_string(),
                ..IdentityConfig::default()
            },
            logging: LoggingConfig {
                filter: "pistac_gate=info".to_string(),
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            identity: IdentityConfig {
                base_url: "https://app.example.com".to_string(),
                ..IdentityConfig::default()
            },
            logging: LoggingConfig {
                filter: "pistac_gate=warn".to_string(),
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
