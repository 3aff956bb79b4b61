use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use super::sheets_config::SpreadsheetConfig;

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const DEFAULT_RANGE: &str = "Sheet1!A:Z";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Service settings. Keys match the lowercased environment variable names,
/// e.g. `SHEET_ID` fills `sheet_id`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub google_application_credentials: String,
    pub sheet_id: String,
    pub default_range: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_application_credentials: String::new(),
            sheet_id: String::new(),
            default_range: DEFAULT_RANGE.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Reads the optional config file at `config_path`, then the process
    /// environment on top of it.
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::default())
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    pub fn spreadsheet(&self) -> SpreadsheetConfig {
        SpreadsheetConfig {
            credentials_path: non_blank(&self.google_application_credentials),
            spreadsheet_id: non_blank(&self.sheet_id),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Environment variables the read and append paths need but that are unset.
    pub fn missing_values(&self) -> Vec<&'static str> {
        let spreadsheet = self.spreadsheet();
        let mut missing = Vec::new();
        if spreadsheet.credentials_path.is_none() {
            missing.push(SpreadsheetConfig::CREDENTIALS_VAR);
        }
        if spreadsheet.spreadsheet_id.is_none() {
            missing.push(SpreadsheetConfig::SPREADSHEET_ID_VAR);
        }
        missing
    }
}

fn non_blank(value: &str) -> Option<Box<str>> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.into())
}
