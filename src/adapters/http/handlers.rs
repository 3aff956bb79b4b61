use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{ApiError, ApiResult};
use crate::adapters::config::app_config::AppConfig;
use crate::domain::sheets::{shape, Grid, ShapedSheet, ValueRenderOption};
use crate::ports::spreadsheet_gateway::SpreadsheetGateway;

pub const UPDATE_MESSAGE: &str = "Sheet updated successfully";

/// State that's passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sheets: Arc<dyn SpreadsheetGateway>,
}

impl AppState {
    pub fn new(config: AppConfig, sheets: Arc<dyn SpreadsheetGateway>) -> Self {
        Self {
            config: Arc::new(config),
            sheets,
        }
    }

    fn range_or_default(&self, range: Option<String>) -> String {
        range.unwrap_or_else(|| self.config.default_range.clone())
    }
}

/// `Query` whose rejections render as `{"detail": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Json` whose rejections render as `{"detail": ...}`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct ReadSheetParams {
    pub range: Option<String>,
    /// 1-indexed header row, `0` disables header mapping.
    #[serde(default = "default_header_row")]
    pub header_row: u64,
    #[serde(default)]
    pub value_render_option: ValueRenderOption,
}

fn default_header_row() -> u64 {
    1
}

#[derive(Debug, Serialize)]
pub struct ReadSheetResponse {
    pub range: String,
    #[serde(flatten)]
    pub sheet: ShapedSheet,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSheetRequest {
    pub range: Option<String>,
    #[serde(default)]
    pub value: Grid,
}

#[derive(Debug, Serialize)]
pub struct UpdateSheetResponse {
    pub message: &'static str,
    pub range: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[instrument(skip(state))]
pub async fn read_sheet(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ReadSheetParams>,
) -> ApiResult<Json<ReadSheetResponse>> {
    let range = state.range_or_default(params.range);

    let grid = state
        .sheets
        .read(&range, params.value_render_option)
        .await?;

    Ok(Json(ReadSheetResponse {
        range,
        sheet: shape(grid, params.header_row),
    }))
}

#[instrument(skip(state, request), fields(rows = request.value.len()))]
pub async fn update_sheet(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateSheetRequest>,
) -> ApiResult<Json<UpdateSheetResponse>> {
    let range = state.range_or_default(request.range);

    let ack = state.sheets.append(&range, request.value).await?;
    tracing::info!(
        updated_range = ack.updated_range.as_deref(),
        updated_rows = ack.updated_rows,
        "Appended rows to {}",
        range
    );

    Ok(Json(UpdateSheetResponse {
        message: UPDATE_MESSAGE,
        range,
    }))
}
