use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// Fails when the platform's root certificate store cannot be loaded.
pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, SpreadsheetGatewayError>
{
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context_lazy(|| {
            SpreadsheetGatewayError::Unexpected("could not load native root certificates".to_string())
        })?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
