//! Accounts API.

use crate::client::{SignalClient, NO_BODY};
use crate::error::Result;
use crate::types::{
    Account, AccountSettings, AddStickerPackRequest, LinkDeviceRequest, RateLimitChallengeRequest,
    RegisterRequest, SetUsernameRequest, StickerPack, UnregisterRequest,
    UpdateAccountSettingsRequest, UpdateProfileRequest, UsernameResponse, VerifyRequest,
};

/// Accounts known to the server.
pub struct AccountsApi {
    client: SignalClient,
}

impl AccountsApi {
    pub(crate) fn new(client: SignalClient) -> Self {
        Self { client }
    }

    /// List all accounts linked or registered.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let numbers: Vec<String> = self.client.get("/v1/accounts").await?;
        Ok(numbers.into_iter().map(Account::from).collect())
    }
}

/// Operations on one account.
pub struct AccountApi {
    client: SignalClient,
    number: String,
}

impl AccountApi {
    pub(crate) fn new(client: SignalClient, number: String) -> Self {
        Self { client, number }
    }

    /// The account's phone number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// List account specific settings.
    pub async fn settings(&self) -> Result<AccountSettings> {
        self.client
            .get(&format!("/v1/configuration/{}/settings", self.number))
            .await
    }

    /// Set account specific settings.
    pub async fn set_settings(&self, settings: &AccountSettings) -> Result<()> {
        self.client
            .post_unit(
                &format!("/v1/configuration/{}/settings", self.number),
                Some(settings),
            )
            .await
    }

    /// Link another device to this one. Only works on the primary device.
    pub async fn link_device(&self, uri: impl Into<String>) -> Result<()> {
        let request = LinkDeviceRequest { uri: uri.into() };
        self.client
            .post_unit(&format!("/v1/devices/{}", self.number), Some(&request))
            .await
    }

    /// Register the number with the Signal network.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/register/{}", self.number), Some(request))
            .await
    }

    /// Verify a registered number with the code it received.
    pub async fn verify(&self, token: &str, pin: Option<&str>) -> Result<()> {
        let request = VerifyRequest {
            pin: pin.map(str::to_string),
        };
        self.client
            .post_unit(
                &format!("/v1/register/{}/verify/{}", self.number, token),
                Some(&request),
            )
            .await
    }

    /// Unregister the number.
    ///
    /// With `delete_account` set the account is deleted from the Signal
    /// server, which cannot be undone.
    pub async fn unregister(&self, request: &UnregisterRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/unregister/{}", self.number), Some(request))
            .await
    }

    /// Lift a rate limit by answering a captcha challenge.
    pub async fn lift_rate_limit(&self, request: &RateLimitChallengeRequest) -> Result<()> {
        self.client
            .post_unit(
                &format!("/v1/accounts/{}/rate-limit-challenge", self.number),
                Some(request),
            )
            .await
    }

    /// Update account attributes on the Signal server.
    pub async fn update_settings(&self, request: &UpdateAccountSettingsRequest) -> Result<()> {
        self.client
            .put(
                &format!("/v1/accounts/{}/settings", self.number),
                Some(request),
            )
            .await
    }

    /// Set the username; returns it with its discriminator and link.
    pub async fn set_username(&self, username: impl Into<String>) -> Result<UsernameResponse> {
        let request = SetUsernameRequest {
            username: username.into(),
        };
        self.client
            .post(&format!("/v1/accounts/{}/username", self.number), &request)
            .await
    }

    /// Remove the username.
    pub async fn remove_username(&self) -> Result<()> {
        self.client
            .delete(&format!("/v1/accounts/{}/username", self.number), NO_BODY)
            .await
    }

    /// Set name, about text and avatar.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<()> {
        self.client
            .put(&format!("/v1/profiles/{}", self.number), Some(request))
            .await
    }

    /// List installed sticker packs.
    pub async fn sticker_packs(&self) -> Result<Vec<StickerPack>> {
        self.client
            .get(&format!("/v1/sticker-packs/{}", self.number))
            .await
    }

    /// Install a sticker pack.
    pub async fn add_sticker_pack(&self, request: &AddStickerPackRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/sticker-packs/{}", self.number), Some(request))
            .await
    }
}
