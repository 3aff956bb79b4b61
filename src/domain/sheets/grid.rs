use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// Rows of cell values, exactly as the Sheets API returns them.
pub type Grid = Vec<Vec<Value>>;

/// How the provider renders each cell before handing it back.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    /// Display value, as shown in the spreadsheet UI.
    FormattedValue,
    /// Typed value without number formatting.
    #[default]
    UnformattedValue,
    /// Formula text for formula cells.
    Formula,
}

/// Text form of a cell, used when a cell has to become an object key.
pub fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn is_empty_string_cell(cell: &Value) -> bool {
    matches!(cell, Value::String(s) if s.is_empty())
}
