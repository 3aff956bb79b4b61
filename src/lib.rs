//! Read/append HTTP proxy in front of a Google spreadsheet.
//!
//! `GET /sheet` returns a range as raw rows or header-keyed objects,
//! `POST /sheet` appends rows, `GET /health` answers without touching the sheet.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use adapters::config::app_config::AppConfig;
pub use adapters::http::{router, AppState};
pub use adapters::sheets::SheetsClient;
pub use domain::sheets::{shape, Grid, ShapedSheet, ValueRenderOption};
pub use ports::spreadsheet_gateway::{AppendAck, SpreadsheetGateway, SpreadsheetGatewayError};
