//! Zulip REST API client
//!
//! The examples talk to the server only through [`ZulipApi`], so they can be
//! driven by [`HttpClient`] against a live server or by an in-process mock.

pub mod http;
pub mod params;

pub use http::HttpClient;
pub use params::{
    DeregisterQueue, MessageParams, MessageType, MessagesQuery, NarrowTerm, NewUser, Recipient,
    RegisterQueue, UsersQuery,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::common::Result;

/// Operations the documentation examples call, grouped by resource area
///
/// Every method returns the raw JSON body the server answered with. A
/// response carrying `"result": "error"` is raised as [`Error::Api`] rather
/// than returned, so a failing call aborts the example that made it.
///
/// [`Error::Api`]: crate::common::Error::Api
#[async_trait]
pub trait ZulipApi: Send + Sync {
    // === Messages ===

    /// `POST /messages`
    async fn send_message(&self, params: &MessageParams) -> Result<Value>;

    /// `GET /messages`
    async fn get_messages(&self, query: &MessagesQuery) -> Result<Value>;

    // === Users ===

    /// `POST /users`
    async fn create_user(&self, user: &NewUser) -> Result<Value>;

    /// `GET /users`
    async fn get_users(&self, query: &UsersQuery) -> Result<Value>;

    /// `GET /users/me`
    async fn get_own_user(&self) -> Result<Value>;

    // === Realm ===

    /// `GET /realm/emoji`
    async fn list_custom_emoji(&self) -> Result<Value>;

    // === Event queues ===

    /// `POST /register`
    async fn register_queue(&self, params: &RegisterQueue) -> Result<Value>;

    /// `DELETE /events`
    async fn deregister_queue(&self, params: &DeregisterQueue) -> Result<Value>;

    // === Streams ===

    /// `GET /get_stream_id`
    async fn get_stream_id(&self, stream: &str) -> Result<Value>;

    /// `GET /users/me/{stream_id}/topics`
    async fn get_stream_topics(&self, stream_id: u64) -> Result<Value>;

    /// `GET /users/me/subscriptions`
    async fn get_subscriptions(&self) -> Result<Value>;
}
