use serde::Serialize;
use serde_json::{Map, Value};

use super::grid::{cell_to_string, is_empty_string_cell, Grid};

/// One data row keyed by header name, in header order.
pub type RowObject = Map<String, Value>;

/// Result of interpreting a grid against an optional header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapedSheet {
    /// Header mapping disabled, the grid is passed through.
    Raw { raw: Grid },
    /// Data rows mapped by header. `headers` is absent when no header row
    /// could be read (empty grid, or header row past the end of the data).
    Mapped {
        rows: Vec<RowObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<String>>,
        raw: Grid,
    },
}

/// Shapes `grid` using the 1-indexed `header_row`; `0` disables header mapping.
pub fn shape(grid: Grid, header_row: u64) -> ShapedSheet {
    if grid.is_empty() {
        return ShapedSheet::Mapped {
            rows: Vec::new(),
            headers: None,
            raw: grid,
        };
    }

    if header_row == 0 {
        return ShapedSheet::Raw { raw: grid };
    }

    let header_index = match usize::try_from(header_row - 1) {
        Ok(index) if index < grid.len() => index,
        _ => {
            return ShapedSheet::Mapped {
                rows: Vec::new(),
                headers: None,
                raw: grid,
            }
        }
    };

    let headers: Vec<String> = grid[header_index]
        .iter()
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    let rows = grid[header_index + 1..]
        .iter()
        .filter(|row| !row.iter().all(is_empty_string_cell))
        .map(|row| row_to_object(&headers, row))
        .collect();

    ShapedSheet::Mapped {
        rows,
        headers: Some(headers),
        raw: grid,
    }
}

fn row_to_object(headers: &[String], row: &[Value]) -> RowObject {
    let mut object = RowObject::new();
    for (i, header) in headers.iter().enumerate() {
        let key = if header.is_empty() {
            format!("col_{}", i + 1)
        } else {
            header.clone()
        };
        object.insert(key, row.get(i).cloned().unwrap_or(Value::Null));
    }
    object
}
