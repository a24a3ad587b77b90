//! API endpoint implementations.

mod accounts;
mod attachments;
mod contacts;
mod groups;
mod identities;
mod messages;
mod service;

pub use accounts::{AccountApi, AccountsApi};
pub use attachments::AttachmentsApi;
pub use contacts::ContactsApi;
pub use groups::GroupsApi;
pub use identities::IdentitiesApi;
pub use messages::MessagesApi;
pub use service::ServiceApi;
