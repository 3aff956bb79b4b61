use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, Registry,
};

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

pub fn parse_level(level: &str) -> Result<Level, TelemetryError> {
    Level::from_str(level.trim()).map_err(|_| TelemetryError::InvalidLevel(level.to_string()))
}

/// Installs the global subscriber: our crate and request traces at `level`,
/// everything else at WARN.
pub fn setup_tracing(level: &str, json: bool) -> Result<(), TelemetryError> {
    let level = parse_level(level)?;

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });
    let stdout_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
    });

    Registry::default()
        .with(
            Targets::new()
                .with_target("sheets_live_api", level)
                .with_target("tower_http", level)
                .with_default(Level::WARN),
        )
        .with(json_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(())
}
