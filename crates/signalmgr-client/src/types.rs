//! Request and response types for the signal-cli REST API.
//!
//! These types mirror the server's JSON schema. Inbound message envelopes live
//! in [`crate::envelope`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

/// Response of `GET /v1/about`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AboutResponse {
    /// Build number.
    #[serde(default)]
    pub build: i64,
    /// Supported capabilities per API version.
    #[serde(default)]
    pub capabilities: HashMap<String, Vec<String>>,
    /// Mode the API runs in (`normal`, `native`, `json-rpc`).
    #[serde(default)]
    pub mode: String,
    /// API version.
    #[serde(default)]
    pub version: String,
    /// Supported API versions.
    #[serde(default)]
    pub versions: Vec<String>,
}

/// REST API configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfiguration,
}

/// Logging section of [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfiguration {
    /// Log level (`debug`, `info`, `warn`, `error`).
    #[serde(rename = "Level", default)]
    pub level: String,
}

/// Registration state of one phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Phone number.
    pub number: String,
    /// Whether the number is registered with Signal.
    #[serde(default)]
    pub registered: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

/// A phone number registered or linked with the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Phone number in E.164 form.
    pub number: String,
}

impl From<String> for Account {
    fn from(number: String) -> Self {
        Self { number }
    }
}

/// Account specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Identity trust mode (`always`, `never`, `on-first-use`).
    #[serde(default)]
    pub trust_mode: String,
}

/// Request to register a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Captcha token, starting with `signalcaptcha://`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
    /// Send the verification code by voice call.
    #[serde(default)]
    pub use_voice: bool,
}

/// Request to verify a registered number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Registration lock PIN, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

/// Request to unregister a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnregisterRequest {
    /// Delete the account from the Signal server. Cannot be undone.
    #[serde(default)]
    pub delete_account: bool,
    /// Delete local account data.
    #[serde(default)]
    pub delete_local_data: bool,
}

/// Request to link another device to this (primary) device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDeviceRequest {
    /// `sgnl://linkdevice?...` URI shown by the new device.
    pub uri: String,
}

/// Captcha answer for a rate limit challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitChallengeRequest {
    /// Captcha result, starting with `signalcaptcha://`.
    pub captcha: String,
    /// Challenge token from the failed send attempt.
    pub challenge_token: String,
}

/// Account attributes stored on the Signal server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountSettingsRequest {
    /// Whether others can find this account by number.
    #[serde(default)]
    pub discoverable_by_number: bool,
    /// Whether the number is shared with contacts.
    #[serde(default)]
    pub share_number: bool,
}

/// Request to set a username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUsernameRequest {
    /// Nickname (`test`) or full username with discriminator (`test.123`).
    pub username: String,
}

/// Response after setting a username.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsernameResponse {
    /// Username with discriminator.
    #[serde(default)]
    pub username: String,
    /// Shareable username link.
    #[serde(default)]
    pub username_link: String,
}

/// Profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Display name.
    pub name: String,
    /// About text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Avatar image, base64 encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_avatar: Option<String>,
}

/// An installed sticker pack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StickerPack {
    /// Pack author.
    #[serde(default)]
    pub author: String,
    /// Whether the pack is installed.
    #[serde(default)]
    pub installed: bool,
    /// Pack ID.
    #[serde(default)]
    pub pack_id: String,
    /// Pack title.
    #[serde(default)]
    pub title: String,
    /// Pack URL.
    #[serde(default)]
    pub url: String,
}

/// Request to install a sticker pack.
///
/// Both values come from a `https://signal.art/addstickers/#pack_id=XXX&pack_key=YYY` link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStickerPackRequest {
    /// Pack ID (`XXX`).
    pub pack_id: String,
    /// Pack key (`YYY`).
    pub pack_key: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Groups
// ─────────────────────────────────────────────────────────────────────────────

/// A Signal group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    /// Group ID as used in API paths.
    #[serde(default)]
    pub id: String,
    /// Internal group ID.
    #[serde(default)]
    pub internal_id: String,
    /// Group name.
    #[serde(default)]
    pub name: String,
    /// Group description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Members.
    #[serde(default)]
    pub members: Vec<String>,
    /// Admins.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Whether the group is blocked.
    #[serde(default)]
    pub blocked: bool,
    /// Invite link.
    #[serde(default)]
    pub invite_link: String,
    /// Pending invites.
    #[serde(default)]
    pub pending_invites: Vec<String>,
    /// Pending join requests.
    #[serde(default)]
    pub pending_requests: Vec<String>,
}

/// Who may perform a group operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupPermissions {
    /// `only-admins` or `every-member`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_members: Option<String>,
    /// `only-admins` or `every-member`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_group: Option<String>,
}

/// Request to create a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Initial members.
    pub members: Vec<String>,
    /// Group description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disappearing message timer in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<u32>,
    /// `disabled`, `enabled` or `enabled-with-approval`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_link: Option<String>,
    /// Permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<GroupPermissions>,
}

impl CreateGroupRequest {
    /// Create a request with a name and members.
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            name: name.into(),
            members,
            ..Default::default()
        }
    }
}

/// Response after creating a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    /// New group ID.
    pub id: String,
}

/// Request to update a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New avatar, base64 encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_avatar: Option<String>,
}

/// Admins to add or remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAdminsRequest {
    /// Admin numbers.
    pub admins: Vec<String>,
}

/// Members to add or remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembersRequest {
    /// Member numbers.
    pub members: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// A mention inside an outgoing message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMention {
    /// Start offset in the text.
    pub start: i64,
    /// Length of the mention.
    pub length: i64,
    /// Mentioned number or UUID.
    pub author: String,
}

/// Request to send a message (`POST /v2/send`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Sending account.
    pub number: String,
    /// Recipient numbers, usernames or group IDs.
    pub recipients: Vec<String>,
    /// Message text.
    pub message: String,
    /// Attachments as base64 or `data:<MIME-TYPE>;base64,<DATA>` URIs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base64_attachments: Vec<String>,
    /// `<pack_id>:<sticker_id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<String>,
    /// Mentions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<MessageMention>,
    /// Timestamp of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_timestamp: Option<i64>,
    /// Author of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_author: Option<String>,
    /// Text of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_message: Option<String>,
    /// Mentions in the quoted message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quote_mentions: Vec<MessageMention>,
    /// `normal` or `styled` (`*italic*`, `**bold**`, `~strike~`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_mode: Option<String>,
    /// Timestamp of the message this one edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_timestamp: Option<i64>,
    /// Also notify the sender's other devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_self: Option<bool>,
}

impl SendMessageRequest {
    /// Create a plain text message.
    pub fn new(
        number: impl Into<String>,
        recipients: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            recipients,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Enable text styling.
    pub fn styled(mut self) -> Self {
        self.text_mode = Some("styled".to_string());
        self
    }

    /// Quote an earlier message.
    pub fn quoting(mut self, timestamp: i64, author: impl Into<String>) -> Self {
        self.quote_timestamp = Some(timestamp);
        self.quote_author = Some(author.into());
        self
    }
}

/// Response after sending a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// Server timestamp of the sent message.
    #[serde(default)]
    pub timestamp: String,
}

/// Typing indicator target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingIndicatorRequest {
    /// Recipient number or group ID.
    pub recipient: String,
}

/// Reaction to send or remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRequest {
    /// Emoji.
    pub reaction: String,
    /// Conversation (number or group ID).
    pub recipient: String,
    /// Author of the message reacted to.
    pub target_author: String,
    /// Timestamp of the message reacted to.
    pub timestamp: i64,
}

/// Receipt kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    /// Message was read.
    Read,
    /// Message was viewed.
    Viewed,
}

/// Read or viewed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRequest {
    /// Receipt kind.
    pub receipt_type: ReceiptType,
    /// Sender of the message.
    pub recipient: String,
    /// Timestamp of the message.
    pub timestamp: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Contacts & identities
// ─────────────────────────────────────────────────────────────────────────────

/// A contact list entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Phone number.
    #[serde(default)]
    pub number: String,
    /// Service UUID.
    #[serde(default)]
    pub uuid: String,
    /// Local contact name.
    #[serde(default)]
    pub name: String,
    /// Name from the contact's profile.
    #[serde(default)]
    pub profile_name: String,
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Conversation color.
    #[serde(default)]
    pub color: String,
    /// Whether the contact is blocked.
    #[serde(default)]
    pub blocked: bool,
    /// Disappearing message timer.
    #[serde(default)]
    pub message_expiration: String,
}

/// Request to add or update a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    /// Contact number.
    pub recipient: String,
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Disappearing message timer in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_in_seconds: Option<u32>,
}

/// A known identity key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    /// Number the identity belongs to.
    #[serde(default)]
    pub number: String,
    /// Trust status.
    #[serde(default)]
    pub status: String,
    /// Key fingerprint.
    #[serde(default)]
    pub fingerprint: String,
    /// Safety number.
    #[serde(default)]
    pub safety_number: String,
    /// When the identity was first seen.
    #[serde(default)]
    pub added: String,
}

/// Request to trust an identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustIdentityRequest {
    /// Trust every known key of the user. Only recommended for testing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_all_known_keys: Option<bool>,
    /// Safety number verified out of band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_safety_number: Option<String>,
}
