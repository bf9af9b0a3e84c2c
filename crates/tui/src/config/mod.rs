use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use engine::{Currency, PageSize};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";
const DEFAULT_ENDPOINT: &str = "https://672be4011600dda5a9f6ae2c.mockapi.io/mockapi/transactions";
const DEFAULT_LOG_FILE: &str = "config/tui.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub timezone: String,
    pub currency: Currency,
    /// Rows per page: 5, 10 or 15. Checked by [`AppConfig::page_size`].
    pub page_size: u8,
    pub fetch_on_start: bool,
    /// Unset means the request may wait forever.
    pub timeout_secs: Option<u64>,
    /// Empty disables logging.
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timezone: "UTC".to_string(),
            currency: Currency::default(),
            page_size: PageSize::default().into(),
            fetch_on_start: true,
            timeout_secs: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Invalid(format!("timezone {:?}: {err}", self.timezone)))
    }

    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::try_from(self.page_size).map_err(|err| AppError::Invalid(err.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "txview_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the transactions endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Override timezone (IANA name) used for dates and day ranges.
    #[arg(long)]
    timezone: Option<String>,
    /// Rows per page: 5, 10 or 15.
    #[arg(long)]
    page_size: Option<u8>,
    /// Override the log file path (empty string disables logging).
    #[arg(long)]
    log_file: Option<String>,
    /// Do not fetch until `r` is pressed.
    #[arg(long)]
    no_fetch_on_start: bool,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = layered(
        config::File::with_name(config_path).required(false),
        environment(),
    )?;

    apply_args(&mut settings, args);
    settings.tz()?;
    settings.page_size()?;

    Ok(settings)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TXVIEW_TUI").try_parsing(true)
}

/// File first, environment on top.
fn layered<F>(file: F, env: config::Environment) -> Result<AppConfig>
where
    F: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

fn apply_args(settings: &mut AppConfig, args: Args) {
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if args.no_fetch_on_start {
        settings.fetch_on_start = false;
    }
}
