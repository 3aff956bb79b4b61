use error_stack::{report, ResultExt};
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use super::http_client::HttpsConnector;
use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

#[instrument]
pub async fn service_account_key(
    priv_key_path: &str,
) -> error_stack::Result<oauth2::ServiceAccountKey, SpreadsheetGatewayError> {
    oauth2::read_service_account_key(priv_key_path)
        .await
        .map_err(|err| {
            report!(SpreadsheetGatewayError::Unexpected(format!(
                "could not read service account key at '{}': {}",
                priv_key_path, err
            )))
        })
}

pub async fn auth(
    secret: oauth2::ServiceAccountKey,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetGatewayError> {
    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context_lazy(|| {
            SpreadsheetGatewayError::Unexpected("could not create an authenticator".to_string())
        })
}
