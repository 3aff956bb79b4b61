use std::fmt::Debug;
use std::future::Future;

use error_stack::{report, Report, ResultExt};
use google_sheets4::{
    api::{Scope, ValueRange},
    Error as Sheets4Error, Sheets,
};
use tokio::sync::OnceCell;
use tracing::instrument;

use super::{
    auth,
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::{Grid, ValueRenderOption};
use crate::ports::spreadsheet_gateway::{AppendAck, SpreadsheetGateway, SpreadsheetGatewayError};

type SheetsHub = Sheets<HttpsConnector>;

/// Cells are parsed as if typed into the UI, so numbers, dates and formulas coerce.
pub const APPEND_VALUE_INPUT_OPTION: &str = "USER_ENTERED";
/// Appended rows are inserted, never written over what follows the table.
pub const APPEND_INSERT_DATA_OPTION: &str = "INSERT_ROWS";

/// Google Sheets backed gateway. The hub is authenticated on first use and
/// shared by every request after that.
pub struct SheetsClient {
    config: SpreadsheetConfig,
    hub: OnceCell<SheetsHub>,
}

impl Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SheetsClient {{ config: {:?}, authenticated: {} }}",
            self.config,
            self.hub.initialized()
        )
    }
}

impl SheetsClient {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self {
            config,
            hub: OnceCell::new(),
        }
    }

    fn spreadsheet_id(&self) -> error_stack::Result<&str, SpreadsheetGatewayError> {
        self.config.spreadsheet_id.as_deref().ok_or_else(|| {
            report!(SpreadsheetGatewayError::MissingConfig(
                SpreadsheetConfig::SPREADSHEET_ID_VAR
            ))
        })
    }

    /// A failed initialization leaves the cell empty, so the next call retries.
    async fn hub(&self) -> error_stack::Result<&SheetsHub, SpreadsheetGatewayError> {
        self.hub
            .get_or_try_init(|| async {
                let priv_key_path = self.config.credentials_path.as_deref().ok_or_else(|| {
                    report!(SpreadsheetGatewayError::MissingConfig(
                        SpreadsheetConfig::CREDENTIALS_VAR
                    ))
                })?;

                let secret = auth::service_account_key(priv_key_path).await?;
                let client = http_client::http_client()?;
                let auth = auth::auth(secret, client.clone()).await?;
                tracing::info!("Google Sheets client initialized");

                Ok::<_, Report<SpreadsheetGatewayError>>(Sheets::new(client, auth))
            })
            .await
    }

    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = Result<T, Sheets4Error>>,
    ) -> error_stack::Result<T, SpreadsheetGatewayError> {
        match tokio::time::timeout(self.config.request_timeout, call).await {
            Ok(result) => result.map_err(classify_sheets_error),
            Err(_) => Err(report!(SpreadsheetGatewayError::Timeout(
                self.config.request_timeout
            ))),
        }
    }
}

/// HTTP-level failures are the provider's answer to our request; everything
/// else went wrong on our side.
pub fn classify_sheets_error(err: Sheets4Error) -> Report<SpreadsheetGatewayError> {
    let message = err.to_string();
    match err {
        Sheets4Error::BadRequest(_) | Sheets4Error::Failure(_) | Sheets4Error::HttpError(_) => {
            report!(SpreadsheetGatewayError::Provider(message))
        }
        _ => report!(SpreadsheetGatewayError::Unexpected(message)),
    }
}

#[async_trait::async_trait]
impl SpreadsheetGateway for SheetsClient {
    #[instrument(skip(self))]
    async fn read(
        &self,
        range: &str,
        render_option: ValueRenderOption,
    ) -> error_stack::Result<Grid, SpreadsheetGatewayError> {
        let spreadsheet_id = self.spreadsheet_id()?;
        let hub = self.hub().await?;

        let (_, value_range) = self
            .with_timeout(
                hub.spreadsheets()
                    .values_get(spreadsheet_id, range)
                    .value_render_option(render_option.as_ref())
                    .add_scope(Scope::Spreadsheet)
                    .doit(),
            )
            .await
            .attach_printable_lazy(|| format!("Failed to read range {}", range))?;

        let grid = value_range.into_grid();
        tracing::debug!(rows = grid.len(), "Read range {}", range);
        Ok(grid)
    }

    #[instrument(skip(self, values), fields(rows = values.len()))]
    async fn append(
        &self,
        range: &str,
        values: Grid,
    ) -> error_stack::Result<AppendAck, SpreadsheetGatewayError> {
        let spreadsheet_id = self.spreadsheet_id()?;
        let hub = self.hub().await?;

        let (_, response) = self
            .with_timeout(
                hub.spreadsheets()
                    .values_append(ValueRange::from_rows(values), spreadsheet_id, range)
                    .value_input_option(APPEND_VALUE_INPUT_OPTION)
                    .insert_data_option(APPEND_INSERT_DATA_OPTION)
                    .add_scope(Scope::Spreadsheet)
                    .doit(),
            )
            .await
            .attach_printable_lazy(|| format!("Failed to append to range {}", range))?;

        let ack = AppendAck::from(response);
        tracing::debug!(?ack, "Appended to range {}", range);
        Ok(ack)
    }
}
