use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};

/// Any origin may call the API; credentials are never shared cross-origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/sheet",
            get(handlers::read_sheet).post(handlers::update_sheet),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use error_stack::report;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::config::app_config::AppConfig;
    use crate::domain::sheets::{Grid, ValueRenderOption};
    use crate::ports::spreadsheet_gateway::{
        AppendAck, SpreadsheetGateway, SpreadsheetGatewayError,
    };

    #[derive(Default)]
    struct RecordingGateway {
        grid: Grid,
        failure: Option<SpreadsheetGatewayError>,
        reads: Mutex<Vec<(String, ValueRenderOption)>>,
        appends: Mutex<Vec<(String, Grid)>>,
    }

    impl RecordingGateway {
        fn with_grid(grid: Value) -> Self {
            Self {
                grid: serde_json::from_value(grid).unwrap(),
                ..Default::default()
            }
        }

        fn failing(error: SpreadsheetGatewayError) -> Self {
            Self {
                failure: Some(error),
                ..Default::default()
            }
        }

        fn check_failure(&self) -> error_stack::Result<(), SpreadsheetGatewayError> {
            match &self.failure {
                Some(error) => Err(report!(error.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SpreadsheetGateway for RecordingGateway {
        async fn read(
            &self,
            range: &str,
            render_option: ValueRenderOption,
        ) -> error_stack::Result<Grid, SpreadsheetGatewayError> {
            self.reads
                .lock()
                .unwrap()
                .push((range.to_string(), render_option));
            self.check_failure()?;
            Ok(self.grid.clone())
        }

        async fn append(
            &self,
            range: &str,
            values: Grid,
        ) -> error_stack::Result<AppendAck, SpreadsheetGatewayError> {
            self.appends
                .lock()
                .unwrap()
                .push((range.to_string(), values));
            self.check_failure()?;
            Ok(AppendAck {
                updated_range: Some(format!("{}1:B1", range)),
                updated_rows: Some(1),
                updated_cells: Some(2),
            })
        }
    }

    fn app(gateway: Arc<RecordingGateway>) -> Router {
        let config = AppConfig {
            default_range: "Sheet1!A:Z".to_string(),
            ..AppConfig::default()
        };
        router(AppState::new(config, gateway))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/sheet")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let gateway = Arc::new(RecordingGateway::default());
        let (status, body) = send(app(gateway.clone()), get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
        assert!(gateway.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_maps_rows_by_header() {
        let gateway = Arc::new(RecordingGateway::with_grid(json!([
            ["Name", "Age"],
            ["Al", "30"],
            ["", ""]
        ])));

        let (status, body) = send(app(gateway.clone()), get_request("/sheet?header_row=1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["range"], json!("Sheet1!A:Z"));
        assert_eq!(body["rows"], json!([{ "Name": "Al", "Age": "30" }]));
        assert_eq!(body["headers"], json!(["Name", "Age"]));
        assert_eq!(
            gateway.reads.lock().unwrap().as_slice(),
            &[(
                "Sheet1!A:Z".to_string(),
                ValueRenderOption::UnformattedValue
            )]
        );
    }

    #[tokio::test]
    async fn test_read_defaults_header_row_to_one() {
        let gateway = Arc::new(RecordingGateway::with_grid(json!([["A"], ["1"]])));

        let (status, body) = send(app(gateway), get_request("/sheet")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"], json!([{ "A": "1" }]));
    }

    #[tokio::test]
    async fn test_read_with_header_row_zero_returns_raw_only() {
        let gateway = Arc::new(RecordingGateway::with_grid(json!([["A", "B"], [1, 2]])));

        let (status, body) = send(
            app(gateway.clone()),
            get_request("/sheet?header_row=0&range=Data!A1:B2&value_render_option=FORMULA"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "range": "Data!A1:B2", "raw": [["A", "B"], [1, 2]] })
        );
        assert_eq!(
            gateway.reads.lock().unwrap().as_slice(),
            &[("Data!A1:B2".to_string(), ValueRenderOption::Formula)]
        );
    }

    #[tokio::test]
    async fn test_read_of_empty_range() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(app(gateway), get_request("/sheet")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "range": "Sheet1!A:Z", "rows": [], "raw": [] }));
    }

    #[tokio::test]
    async fn test_read_rejects_unknown_render_option() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(
            app(gateway.clone()),
            get_request("/sheet?value_render_option=RAW"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detail = body["detail"].as_str().unwrap_or_default();
        assert!(detail.contains("RAW"), "{}", body);
        assert!(gateway.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_rejects_negative_header_row() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(app(gateway.clone()), get_request("/sheet?header_row=-1")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string(), "{}", body);
        assert!(gateway.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_accepts_header_row_past_u32() {
        let gateway = Arc::new(RecordingGateway::with_grid(json!([["A"], ["1"]])));

        let (status, body) = send(app(gateway), get_request("/sheet?header_row=4294967296")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "range": "Sheet1!A:Z", "rows": [], "raw": [["A"], ["1"]] })
        );
    }

    #[tokio::test]
    async fn test_read_provider_error_is_bad_gateway() {
        let gateway = Arc::new(RecordingGateway::failing(
            SpreadsheetGatewayError::Provider("Unable to parse range".to_string()),
        ));

        let (status, body) = send(app(gateway), get_request("/sheet?range=Nope")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({ "detail": "Google Sheets API error: Unable to parse range" })
        );
    }

    #[tokio::test]
    async fn test_read_missing_config_is_internal_error() {
        let gateway = Arc::new(RecordingGateway::failing(
            SpreadsheetGatewayError::MissingConfig("SHEET_ID"),
        ));

        let (status, body) = send(app(gateway), get_request("/sheet")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "SHEET_ID env var is not set" }));
    }

    #[tokio::test]
    async fn test_append_calls_gateway_once() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(
            app(gateway.clone()),
            post_request(json!({ "value": [["x", "y"]] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "Sheet updated successfully", "range": "Sheet1!A:Z" })
        );

        let appends = gateway.appends.lock().unwrap();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0].0, "Sheet1!A:Z");
        assert_eq!(appends[0].1, vec![vec![json!("x"), json!("y")]]);
    }

    #[tokio::test]
    async fn test_append_uses_requested_range() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(
            app(gateway.clone()),
            post_request(json!({ "range": "Leads!A:C", "value": [[1, true, "=SUM(A1:A2)"]] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["range"], json!("Leads!A:C"));
        assert_eq!(
            gateway.appends.lock().unwrap()[0].1,
            vec![vec![json!(1), json!(true), json!("=SUM(A1:A2)")]]
        );
    }

    #[tokio::test]
    async fn test_append_without_value_sends_empty_grid() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, _) = send(app(gateway.clone()), post_request(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        let appends = gateway.appends.lock().unwrap();
        assert_eq!(appends.len(), 1);
        assert!(appends[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_append_timeout_is_gateway_timeout() {
        let gateway = Arc::new(RecordingGateway::failing(SpreadsheetGatewayError::Timeout(
            std::time::Duration::from_secs(30),
        )));

        let (status, body) = send(app(gateway), post_request(json!({ "value": [["x"]] }))).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["detail"].as_str().unwrap().contains("30s"));
    }

    #[tokio::test]
    async fn test_append_rejects_non_grid_value() {
        let gateway = Arc::new(RecordingGateway::default());

        let (status, body) = send(
            app(gateway.clone()),
            post_request(json!({ "value": "not a grid" })),
        )
        .await;

        assert!(status.is_client_error(), "{}", status);
        assert!(body["detail"].is_string(), "{}", body);
        assert!(gateway.appends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let gateway = Arc::new(RecordingGateway::default());
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://example.wixsite.com")
            .body(Body::empty())
            .unwrap();

        let response = app(gateway).oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }
}
