//! Contacts API.

use crate::client::{SignalClient, NO_BODY};
use crate::error::Result;
use crate::types::{Contact, UpdateContactRequest};

/// Contacts of one account.
pub struct ContactsApi {
    client: SignalClient,
    number: String,
}

impl ContactsApi {
    pub(crate) fn new(client: SignalClient, number: String) -> Self {
        Self { client, number }
    }

    /// List all contacts.
    pub async fn list(&self) -> Result<Vec<Contact>> {
        self.client
            .get(&format!("/v1/contacts/{}", self.number))
            .await
    }

    /// Add or update a contact.
    pub async fn update(&self, request: &UpdateContactRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/contacts/{}", self.number), Some(request))
            .await
    }

    /// Push the local contact list to all linked devices.
    ///
    /// Only meaningful on the primary device.
    pub async fn sync(&self) -> Result<()> {
        self.client
            .put(&format!("/v1/contacts/{}/sync", self.number), NO_BODY)
            .await
    }
}
