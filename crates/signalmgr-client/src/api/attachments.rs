//! Attachments API.

use crate::client::{SignalClient, NO_BODY};
use crate::error::Result;

/// Attachments downloaded by the server.
pub struct AttachmentsApi {
    client: SignalClient,
}

impl AttachmentsApi {
    pub(crate) fn new(client: SignalClient) -> Self {
        Self { client }
    }

    /// List attachment IDs.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.client.get("/v1/attachments").await
    }

    /// Download an attachment.
    pub async fn get(&self, id: &str) -> Result<Vec<u8>> {
        self.client.get_raw(&format!("/v1/attachments/{}", id)).await
    }

    /// Remove an attachment from the server's filesystem.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/v1/attachments/{}", id), NO_BODY)
            .await
    }
}
