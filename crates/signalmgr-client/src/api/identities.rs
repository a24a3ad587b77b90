//! Identities API.

use crate::client::SignalClient;
use crate::error::Result;
use crate::types::{Identity, TrustIdentityRequest};

/// Identity keys known to one account.
pub struct IdentitiesApi {
    client: SignalClient,
    number: String,
}

impl IdentitiesApi {
    pub(crate) fn new(client: SignalClient, number: String) -> Self {
        Self { client, number }
    }

    /// List all identities.
    pub async fn list(&self) -> Result<Vec<Identity>> {
        self.client
            .get(&format!("/v1/identities/{}", self.number))
            .await
    }

    /// Trust the identity of `number_to_trust`.
    pub async fn trust(&self, number_to_trust: &str, request: &TrustIdentityRequest) -> Result<()> {
        self.client
            .put(
                &format!("/v1/identities/{}/trust/{}", self.number, number_to_trust),
                Some(request),
            )
            .await
    }
}
