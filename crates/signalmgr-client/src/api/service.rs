//! Service-wide API.

use crate::client::SignalClient;
use crate::error::Result;
use crate::types::{AboutResponse, Configuration, SearchResult};

/// Endpoints that are not tied to an account.
pub struct ServiceApi {
    client: SignalClient,
}

impl ServiceApi {
    pub(crate) fn new(client: SignalClient) -> Self {
        Self { client }
    }

    /// Server version, mode and capabilities.
    pub async fn about(&self) -> Result<AboutResponse> {
        self.client.get("/v1/about").await
    }

    /// Health check.
    ///
    /// The endpoint answers with an empty 204, so only the status matters.
    pub async fn health(&self) -> Result<()> {
        self.client.get_raw("/v1/health").await.map(drop)
    }

    /// Simple connectivity check - returns true if server is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.health().await.is_ok()
    }

    /// List the REST API configuration.
    pub async fn configuration(&self) -> Result<Configuration> {
        self.client.get("/v1/configuration").await
    }

    /// Set the REST API configuration.
    pub async fn set_configuration(&self, configuration: &Configuration) -> Result<()> {
        self.client
            .post_unit("/v1/configuration", Some(configuration))
            .await
    }

    /// Link a new device: returns the QR code PNG for `device_name`.
    pub async fn qrcode_link(&self, device_name: &str) -> Result<Vec<u8>> {
        self.client
            .get_raw_with_query("/v1/qrcodelink", &[("device_name", device_name.to_string())])
            .await
    }

    /// Check whether phone numbers are registered with Signal.
    ///
    /// Each number is sent as its own `numbers` query parameter
    /// (`?numbers=+1555&numbers=+1666`), which is what the server reads. It is
    /// not sent as a JSON array in a `message` parameter.
    pub async fn search(&self, numbers: &[&str]) -> Result<Vec<SearchResult>> {
        let query: Vec<(&str, String)> = numbers
            .iter()
            .map(|number| ("numbers", number.to_string()))
            .collect();
        self.client.get_with_query("/v1/search", &query).await
    }
}
