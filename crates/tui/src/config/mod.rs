use std::str::FromStr;

use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Anti-forgery token the store expects on mutating requests. Supplied
    /// by the deployment, never derived from ambient state.
    pub csrf_token: String,
    /// IANA timezone used to bucket transactions into calendar months.
    pub timezone: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            csrf_token: String::new(),
            timezone: "America/New_York".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        Tz::from_str(self.timezone.trim()).map_err(|err| AppError::Timezone(err.to_string()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "spese_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the anti-forgery token sent with mutating requests.
    #[arg(long)]
    csrf_token: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPESE_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(csrf_token) = args.csrf_token {
        settings.csrf_token = csrf_token;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }

    Ok(settings)
}
