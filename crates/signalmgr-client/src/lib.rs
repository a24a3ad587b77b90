//! Client SDK for the signal-cli REST API.
//!
//! This crate provides a typed client for the HTTP endpoints of
//! [signal-cli-rest-api](https://github.com/bbernhard/signal-cli-rest-api) and
//! a streaming receiver for its message socket.
//!
//! # Example
//!
//! ```no_run
//! use signalmgr_client::{Result, SignalClient};
//!
//! # async fn example() -> Result<()> {
//! let client = SignalClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! let about = client.service().about().await?;
//! println!("API {} in {} mode", about.version, about.mode);
//!
//! let account = "+15550001111";
//! client
//!     .messages(account)
//!     .send_text(vec!["+15550002222".to_string()], "Hello!")
//!     .await?;
//!
//! // Stream incoming messages (json-rpc mode)
//! let (mut messages, task) = client.messages(account).spawn_receiver(64);
//! while let Some(message) = messages.recv().await {
//!     if let Some(text) = message.envelope.text() {
//!         println!("{:?}: {}", message.envelope.sender(), text);
//!     }
//! }
//! let stopped = task.await;
//! println!("receiver stopped: {:?}", stopped);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! The server may report an error in the `error` field of any response, even
//! with a 2xx status. Such responses always fail with [`Error::Server`].
//!
//! # API Coverage
//!
//! - **Service**: about, health, configuration, device link QR code, search
//! - **Attachments**: list, download, delete
//! - **Accounts**: list, settings, registration, username, profile, stickers
//! - **Groups**: CRUD, admins, members, block, join, quit
//! - **Messages**: send, receive (REST and socket), typing, reactions, receipts
//! - **Contacts**: list, update, sync
//! - **Identities**: list, trust

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
mod receiver;
pub mod types;

pub use client::{ClientBuilder, SignalClient, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use envelope::{MessageEnvelope, PayloadKind, ReceivedMessage};
pub use error::{Error, ReadError, Result};
pub use reqwest::Method;
pub use types::*;
