use std::time::Duration;

use thiserror::Error;

use crate::domain::sheets::{Grid, ValueRenderOption};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetGatewayError {
    #[error("{0} env var is not set")]
    MissingConfig(&'static str),
    #[error("Google Sheets API error: {0}")]
    Provider(String),
    #[error("Google Sheets API did not respond within {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Unexpected(String),
}

/// What the provider reported after an append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendAck {
    pub updated_range: Option<String>,
    pub updated_rows: Option<i32>,
    pub updated_cells: Option<i32>,
}

#[async_trait::async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    /// Reads the live values of `range`. A range without data yields an empty grid.
    async fn read(
        &self,
        range: &str,
        render_option: ValueRenderOption,
    ) -> error_stack::Result<Grid, SpreadsheetGatewayError>;

    /// Appends `values` after the last row of data in `range`, inserting new
    /// rows and treating every cell as user-entered input.
    async fn append(
        &self,
        range: &str,
        values: Grid,
    ) -> error_stack::Result<AppendAck, SpreadsheetGatewayError>;
}
