use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use error_stack::Report;
use serde::Serialize;

use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

/// Error returned by every handler; rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<Report<SpreadsheetGatewayError>> for ApiError {
    fn from(report: Report<SpreadsheetGatewayError>) -> Self {
        let context = report.current_context();
        let status = match context {
            SpreadsheetGatewayError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SpreadsheetGatewayError::Provider(_) => StatusCode::BAD_GATEWAY,
            SpreadsheetGatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SpreadsheetGatewayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("{} {:?}", status, report);

        ApiError {
            status,
            detail: context.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}
