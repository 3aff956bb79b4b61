use google_sheets4::api::{AppendValuesResponse, ValueRange};

use crate::domain::sheets::Grid;
use crate::ports::spreadsheet_gateway::AppendAck;

pub trait ValueRangeFactory {
    fn from_rows(rows: Grid) -> Self;
    fn into_grid(self) -> Grid;
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: Grid) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows),
        }
    }

    /// Sheets omits `values` entirely for a range without data.
    fn into_grid(self) -> Grid {
        self.values.unwrap_or_default()
    }
}

impl From<AppendValuesResponse> for AppendAck {
    fn from(response: AppendValuesResponse) -> Self {
        let updates = response.updates.unwrap_or_default();
        AppendAck {
            updated_range: updates.updated_range,
            updated_rows: updates.updated_rows,
            updated_cells: updates.updated_cells,
        }
    }
}
