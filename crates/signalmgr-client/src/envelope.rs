//! Inbound message envelopes.
//!
//! An envelope is one record from the receive feed. Exactly one of its payload
//! fields is populated per instance; [`MessageEnvelope::kind`] reports which.
//! Every field is optional on the wire, unknown fields are ignored.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One message received from the feed, plus the frame it was decoded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceivedMessage {
    /// The decoded envelope.
    pub envelope: MessageEnvelope,
    /// Account the message was received on.
    pub account: String,
    /// Canonical JSON of the received object, including fields the typed
    /// envelope does not model. Never read from the wire.
    #[serde(skip)]
    pub raw: String,
}

impl ReceivedMessage {
    /// Project a decoded JSON tree into a message, keeping its canonical form.
    ///
    /// The tree is encoded to `raw` before being consumed, so `raw` reflects
    /// exactly what the server sent (modulo whitespace).
    ///
    /// Only objects are messages: an array would otherwise fill the fields by
    /// position.
    pub fn from_tree(tree: Value) -> serde_json::Result<Self> {
        let Value::Object(fields) = &tree else {
            return Err(not_an_object(&tree, "a message object"));
        };
        if let Some(envelope) = fields.get("envelope").filter(|e| !e.is_object()) {
            return Err(not_an_object(envelope, "an envelope object"));
        }

        let raw = serde_json::to_string(&tree)?;
        let mut message: ReceivedMessage = serde_json::from_value(tree)?;
        message.raw = raw;
        Ok(message)
    }

    /// Decode one frame of the receive feed.
    pub fn from_frame(frame: &[u8]) -> serde_json::Result<Self> {
        Self::from_tree(serde_json::from_slice(frame)?)
    }
}

fn not_an_object(tree: &Value, expected: &'static str) -> serde_json::Error {
    let unexpected = match tree {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    serde_json::Error::invalid_type(unexpected, &expected)
}

/// Which payload an envelope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Regular message.
    Data,
    /// Edit of an earlier message.
    Edit,
    /// Story.
    Story,
    /// Sync message from a linked device.
    Sync,
    /// Call signalling.
    Call,
    /// Delivery/read/viewed receipt.
    Receipt,
    /// Typing indicator.
    Typing,
}

/// One inbound message record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageEnvelope {
    /// Deprecated: use `source_number`, `source_uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_device: Option<u32>,
    /// Origination timestamp (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_received_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_delivered_timestamp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_message: Option<DataMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_message: Option<EditMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_message: Option<StoryMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_message: Option<SyncMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_message: Option<CallMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_message: Option<ReceiptMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_message: Option<TypingMessage>,
}

impl MessageEnvelope {
    /// The populated payload, if any.
    pub fn kind(&self) -> Option<PayloadKind> {
        if self.data_message.is_some() {
            Some(PayloadKind::Data)
        } else if self.edit_message.is_some() {
            Some(PayloadKind::Edit)
        } else if self.story_message.is_some() {
            Some(PayloadKind::Story)
        } else if self.sync_message.is_some() {
            Some(PayloadKind::Sync)
        } else if self.call_message.is_some() {
            Some(PayloadKind::Call)
        } else if self.receipt_message.is_some() {
            Some(PayloadKind::Receipt)
        } else if self.typing_message.is_some() {
            Some(PayloadKind::Typing)
        } else {
            None
        }
    }

    /// Best available sender identifier: number, then UUID, then the legacy field.
    pub fn sender(&self) -> Option<&str> {
        self.source_number
            .as_deref()
            .or(self.source_uuid.as_deref())
            .or(self.source.as_deref())
    }

    /// Text of a data message, or of the new version of an edited one.
    pub fn text(&self) -> Option<&str> {
        self.data_message
            .as_ref()
            .or_else(|| self.edit_message.as_ref().and_then(|e| e.data_message.as_ref()))
            .and_then(|m| m.message.as_deref())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data messages
// ─────────────────────────────────────────────────────────────────────────────

/// A regular message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_once: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Reaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<Mention>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<Preview>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_delete: Option<RemoteDelete>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<SharedContact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text_styles: Vec<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_info: Option<GroupInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_context: Option<StoryContext>,
}

/// Edit of an earlier message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sent_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_message: Option<DataMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Base64 encoded receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
    /// `DELIVER`, `UPDATE`, `QUIT`, ...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// `BOLD`, `ITALIC`, `STRIKETHROUGH`, `MONOSPACE`, `SPOILER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteDelete {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sticker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// ID usable with the attachments API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuotedAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Attachment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Attachment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mention {
    /// Deprecated: use `number`, `uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Deprecated: use `author_number`, `author_uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<Mention>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<QuotedAttachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text_styles: Vec<TextStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Deprecated: use `target_author_number`, `target_author_uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_author_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_author_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sent_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_remove: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared contacts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ContactAvatar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone: Vec<ContactDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<ContactDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<ContactAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactAvatar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_profile: Option<bool>,
}

/// Phone number or email address of a shared contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactAddress {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pobox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Stories
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_replies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_attachment: Option<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_attachment: Option<TextAttachment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<BackgroundGradient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundGradient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<i32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync messages
// ─────────────────────────────────────────────────────────────────────────────

/// Message sent by one of the account's other devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_message: Option<SyncDataMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_story_message: Option<SyncStoryMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocked_numbers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocked_group_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub read_messages: Vec<SyncReadMessage>,
    /// Sync request type, e.g. `CONTACTS_SYNC`, `GROUPS_SYNC`, `REQUEST_SYNC`.
    /// Older servers send the numeric code.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
}

/// A message sent from another device, with its destination.
///
/// The data message fields are flattened in, so a bare data message decodes
/// as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncDataMessage {
    /// Deprecated: use `destination_number`, `destination_uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_message: Option<EditMessage>,
    #[serde(flatten)]
    pub data_message: DataMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncStoryMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_message: Option<StoryMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncReadMessage {
    /// Deprecated: use `sender_number`, `sender_uuid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Calls, receipts, typing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_message: Option<CallOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_message: Option<CallAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_message: Option<CallBusy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hangup_message: Option<CallHangup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ice_update_messages: Vec<CallIceUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallBusy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallHangup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallIceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiptMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_viewed: Option<bool>,
    /// Timestamps of the acknowledged messages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timestamps: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingMessage {
    /// `STARTED` or `STOPPED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_keeps_canonical_raw() {
        let frame = br#"{"envelope":{"sourceNumber":"+1555","timestamp":1000}}"#;
        let message = ReceivedMessage::from_frame(frame).unwrap();

        assert_eq!(message.envelope.source_number.as_deref(), Some("+1555"));
        assert_eq!(message.envelope.timestamp, Some(1000));
        assert_eq!(message.account, "");
        assert_eq!(message.raw.as_bytes(), &frame[..]);
        assert_eq!(message.envelope.kind(), None);
    }

    #[test]
    fn test_raw_drops_whitespace_but_keeps_unknown_fields() {
        let frame = br#"{ "account": "+1666",
            "envelope": { "sourceNumber": "+1555", "futureField": {"a": [1, 2]} } }"#;
        let message = ReceivedMessage::from_frame(frame).unwrap();

        assert_eq!(message.account, "+1666");
        assert_eq!(
            message.raw,
            r#"{"account":"+1666","envelope":{"sourceNumber":"+1555","futureField":{"a":[1,2]}}}"#
        );
    }

    #[test]
    fn test_raw_is_not_read_from_the_wire() {
        let frame = br#"{"envelope":{},"raw":"spoofed"}"#;
        let message = ReceivedMessage::from_frame(frame).unwrap();
        assert_eq!(message.raw, r#"{"envelope":{},"raw":"spoofed"}"#);
    }

    #[test]
    fn test_non_object_frame_is_rejected() {
        assert!(ReceivedMessage::from_frame(b"[1,2,3]").is_err());
        assert!(ReceivedMessage::from_frame(b"{not json").is_err());
        assert!(ReceivedMessage::from_frame(b"[]").is_err());
        assert!(ReceivedMessage::from_frame(br#"[{},"x"]"#).is_err());
        assert!(ReceivedMessage::from_frame(br#"[{"timestamp":5},"+1666"]"#).is_err());
        assert!(ReceivedMessage::from_frame(br#""text""#).is_err());
        assert!(ReceivedMessage::from_frame(br#"{"envelope":[{"timestamp":5}]}"#).is_err());

        let err = ReceivedMessage::from_frame(b"[]").unwrap_err();
        assert!(err.to_string().contains("expected a message object"));
    }

    #[test]
    fn test_data_message_envelope() {
        let envelope: MessageEnvelope = serde_json::from_value(json!({
            "source": "+1555",
            "sourceNumber": "+1555",
            "sourceUuid": "a1b2",
            "sourceName": "Alice",
            "sourceDevice": 1,
            "timestamp": 1700000000000i64,
            "serverReceivedTimestamp": 1700000000100i64,
            "serverDeliveredTimestamp": 1700000000200i64,
            "dataMessage": {
                "timestamp": 1700000000000i64,
                "message": "hello",
                "expiresInSeconds": 0,
                "viewOnce": false,
                "mentions": [{"number": "+1666", "start": 0, "length": 1}],
                "attachments": [{"contentType": "image/png", "id": "att1", "size": 42}],
                "groupInfo": {"groupId": "g1", "type": "DELIVER"}
            }
        }))
        .unwrap();

        assert_eq!(envelope.kind(), Some(PayloadKind::Data));
        assert_eq!(envelope.sender(), Some("+1555"));
        assert_eq!(envelope.text(), Some("hello"));
        assert_eq!(envelope.server_delivered_timestamp, Some(1700000000200));

        let data = envelope.data_message.unwrap();
        assert_eq!(data.mentions[0].number.as_deref(), Some("+1666"));
        assert_eq!(data.attachments[0].size, Some(42));
        assert_eq!(data.group_info.unwrap().kind.as_deref(), Some("DELIVER"));
    }

    #[test]
    fn test_payload_kinds() {
        let cases = [
            (json!({"editMessage": {"targetSentTimestamp": 1}}), PayloadKind::Edit),
            (json!({"storyMessage": {"allowsReplies": true}}), PayloadKind::Story),
            (json!({"syncMessage": {"type": "CONTACTS_SYNC"}}), PayloadKind::Sync),
            (json!({"callMessage": {"busyMessage": {"id": 3}}}), PayloadKind::Call),
            (
                json!({"receiptMessage": {"isRead": true, "timestamps": [1, 2]}}),
                PayloadKind::Receipt,
            ),
            (json!({"typingMessage": {"action": "STARTED"}}), PayloadKind::Typing),
        ];

        for (value, expected) in cases {
            let envelope: MessageEnvelope = serde_json::from_value(value).unwrap();
            assert_eq!(envelope.kind(), Some(expected));
        }
    }

    #[test]
    fn test_edit_text_and_sender_fallback() {
        let envelope: MessageEnvelope = serde_json::from_value(json!({
            "sourceUuid": "a1b2",
            "editMessage": {
                "targetSentTimestamp": 5,
                "dataMessage": {"message": "fixed typo"}
            }
        }))
        .unwrap();

        assert_eq!(envelope.sender(), Some("a1b2"));
        assert_eq!(envelope.text(), Some("fixed typo"));
    }

    #[test]
    fn test_sync_sent_message_flattens_data_fields() {
        let envelope: MessageEnvelope = serde_json::from_value(json!({
            "syncMessage": {
                "sentMessage": {
                    "destinationNumber": "+1666",
                    "timestamp": 9,
                    "message": "from my laptop"
                },
                "type": 0
            }
        }))
        .unwrap();

        let sync = envelope.sync_message.unwrap();
        let sent = sync.sent_message.unwrap();
        assert_eq!(sent.destination_number.as_deref(), Some("+1666"));
        assert_eq!(sent.data_message.message.as_deref(), Some("from my laptop"));
        assert_eq!(sync.kind, Some(json!(0)));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let envelope = MessageEnvelope {
            source_number: Some("+1555".to_string()),
            typing_message: Some(TypingMessage {
                action: Some("STOPPED".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"sourceNumber": "+1555", "typingMessage": {"action": "STOPPED"}})
        );
    }
}
