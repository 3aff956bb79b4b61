use std::time::Duration;

/// What the Sheets client needs, with unset values already folded into `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    pub credentials_path: Option<Box<str>>,
    pub spreadsheet_id: Option<Box<str>>,
    pub request_timeout: Duration,
}

impl SpreadsheetConfig {
    pub const CREDENTIALS_VAR: &'static str = "GOOGLE_APPLICATION_CREDENTIALS";
    pub const SPREADSHEET_ID_VAR: &'static str = "SHEET_ID";
}
