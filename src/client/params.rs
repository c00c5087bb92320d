//! Request parameter types
//!
//! Zulip takes parameters as form fields. Scalars are sent as-is, while
//! lists and objects are sent as JSON-encoded strings.

use serde::Serialize;
use serde_json::Value;

use crate::common::Result;

/// Kind of message being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Stream,
    Private,
}

/// Message recipient: a stream name or a list of user IDs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Recipient {
    Stream(String),
    Users(Vec<u64>),
}

/// Parameters for `POST /messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessageParams {
    pub to: Recipient,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub content: String,
}

impl MessageParams {
    /// A message to `topic` in `stream`
    pub fn stream(stream: &str, topic: &str, content: &str) -> Self {
        Self {
            to: Recipient::Stream(stream.to_string()),
            kind: MessageType::Stream,
            topic: Some(topic.to_string()),
            content: content.to_string(),
        }
    }

    /// A private message to the given users
    pub fn private(user_ids: &[u64], content: &str) -> Self {
        Self {
            to: Recipient::Users(user_ids.to_vec()),
            kind: MessageType::Private,
            topic: None,
            content: content.to_string(),
        }
    }
}

/// Parameters for `POST /users`
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub short_name: String,
}

/// Parameters for `POST /register`
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterQueue {
    pub event_types: Vec<String>,
}

/// Parameters for `DELETE /events`
#[derive(Debug, Clone, Serialize)]
pub struct DeregisterQueue {
    pub queue_id: String,
}

/// One term of a message narrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrowTerm {
    pub operator: String,
    pub operand: String,
}

impl NarrowTerm {
    pub fn new(operator: &str, operand: &str) -> Self {
        Self {
            operator: operator.to_string(),
            operand: operand.to_string(),
        }
    }
}

/// Parameters for `GET /messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessagesQuery {
    pub anchor: String,
    pub num_before: u32,
    pub num_after: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub narrow: Vec<NarrowTerm>,
}

/// Parameters for `GET /users`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_gravatar: Option<bool>,
}

/// Flatten a parameter struct into form fields
pub fn form_fields<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)?;
    let mut fields = Vec::new();

    if let Value::Object(map) = value {
        for (key, value) in map {
            let encoded = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => serde_json::to_string(&other)?,
            };
            fields.push((key, encoded));
        }
    }

    Ok(fields)
}
