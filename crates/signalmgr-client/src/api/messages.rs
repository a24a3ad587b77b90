//! Messages API.

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::SignalClient;
use crate::envelope::ReceivedMessage;
use crate::error::{Error, Result};
use crate::receiver;
use crate::types::{
    ReactionRequest, ReceiptRequest, SendMessageRequest, SendMessageResponse,
    TypingIndicatorRequest,
};

/// Sending and receiving for one account.
#[derive(Clone)]
pub struct MessagesApi {
    client: SignalClient,
    number: String,
}

impl MessagesApi {
    pub(crate) fn new(client: SignalClient, number: String) -> Self {
        Self { client, number }
    }

    /// Send a message.
    ///
    /// The request's `number` is sent as given; use [`MessagesApi::send_text`]
    /// to send from this account.
    pub async fn send(&self, request: &SendMessageRequest) -> Result<SendMessageResponse> {
        self.client.post("/v2/send", request).await
    }

    /// Send a plain text message from this account.
    pub async fn send_text(
        &self,
        recipients: Vec<String>,
        text: impl Into<String>,
    ) -> Result<SendMessageResponse> {
        self.send(&SendMessageRequest::new(&self.number, recipients, text))
            .await
    }

    /// Fetch pending messages.
    ///
    /// Only works when the server runs in `normal` or `native` mode; in
    /// `json-rpc` mode use [`MessagesApi::receive_socket`].
    pub async fn receive(&self) -> Result<Vec<ReceivedMessage>> {
        let trees: Vec<Value> = self
            .client
            .get(&format!("/v1/receive/{}", self.number))
            .await?;
        trees
            .into_iter()
            .map(ReceivedMessage::from_tree)
            .collect::<serde_json::Result<_>>()
            .map_err(Error::Decoding)
    }

    /// Open the receive socket and forward messages to `messages`.
    ///
    /// Only returns when the socket fails or closes, or a frame is malformed
    /// (`Err`), or the consumer drops its receiver (`Ok`). There is no
    /// reconnect. Only works when the server runs in `json-rpc` mode.
    pub async fn receive_socket(&self, messages: mpsc::Sender<ReceivedMessage>) -> Result<()> {
        let url = self
            .client
            .ws_url(&format!("/v1/receive/{}", self.number))?;
        receiver::receive(url, messages).await
    }

    /// Run [`MessagesApi::receive_socket`] on a background task.
    ///
    /// Returns the message channel (bounded to `capacity`) and the task handle,
    /// which yields the error that stopped the receiver.
    pub fn spawn_receiver(
        &self,
        capacity: usize,
    ) -> (mpsc::Receiver<ReceivedMessage>, JoinHandle<Result<()>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let api = self.clone();
        let task = tokio::spawn(async move { api.receive_socket(tx).await });
        (rx, task)
    }

    /// Show the typing indicator to `recipient`.
    pub async fn show_typing(&self, recipient: impl Into<String>) -> Result<()> {
        let request = TypingIndicatorRequest {
            recipient: recipient.into(),
        };
        self.client
            .put(
                &format!("/v1/typing-indicator/{}", self.number),
                Some(&request),
            )
            .await
    }

    /// Hide the typing indicator from `recipient`.
    pub async fn hide_typing(&self, recipient: impl Into<String>) -> Result<()> {
        let request = TypingIndicatorRequest {
            recipient: recipient.into(),
        };
        self.client
            .delete(
                &format!("/v1/typing-indicator/{}", self.number),
                Some(&request),
            )
            .await
    }

    /// React to a message.
    pub async fn react(&self, request: &ReactionRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/reactions/{}", self.number), Some(request))
            .await
    }

    /// Remove a reaction.
    pub async fn remove_reaction(&self, request: &ReactionRequest) -> Result<()> {
        self.client
            .delete(&format!("/v1/reactions/{}", self.number), Some(request))
            .await
    }

    /// Send a read or viewed receipt.
    pub async fn send_receipt(&self, request: &ReceiptRequest) -> Result<()> {
        self.client
            .post_unit(&format!("/v1/receipts/{}", self.number), Some(request))
            .await
    }
}
