//! The documented examples
//!
//! Each example runs the same calls as the code sample shown in the API
//! documentation for its endpoint. Parameters here are part of the rendered
//! documentation, so changing them changes the published examples.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{
    DeregisterQueue, MessageParams, MessagesQuery, NarrowTerm, NewUser, RegisterQueue,
    UsersQuery, ZulipApi,
};
use crate::common::{Error, Result};
use crate::registry::{Operation, Outcome, Registry};

/// Build a registry holding every documented example
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry);
    registry
}

/// Register every documented example into `registry`
pub fn register_all(registry: &mut Registry) {
    registry.register("send_message", "/messages:post", 200, SendMessage);
    registry.register("create_user", "/users:post", 200, CreateUser);
    registry.register("get_custom_emoji", "/realm/emoji:get", 200, GetCustomEmoji);
    registry.register("delete_queue", "/events:delete", 200, DeleteQueue);
    registry.register("get_messages", "/messages:get", 200, GetMessages);
    registry.register("get_own_user", "/users/me:get", 200, GetOwnUser);
    registry.register("get_stream_id", "/get_stream_id:get", 200, GetStreamId);
    registry.register(
        "get_stream_topics",
        "/users/me/{stream_id}/topics:get",
        200,
        GetStreamTopics,
    );
    registry.register(
        "get_subscriptions",
        "/users/me/subscriptions:get",
        200,
        GetSubscriptions,
    );
    registry.register("get_users", "/users:get", 200, GetUsers);
    registry.register("register_queue", "/register:post", 200, RegisterEventQueue);
}

fn message_events() -> RegisterQueue {
    RegisterQueue {
        event_types: vec!["message".to_string()],
    }
}

/// Send a stream message, then a private message
pub struct SendMessage;

#[async_trait]
impl Operation for SendMessage {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        let params = MessageParams::stream(
            "social",
            "Castle",
            "I come not, friends, to steal away your hearts.",
        );
        let stream_message = client.send_message(&params).await?;

        let user_id = 9;
        let params = MessageParams::private(
            &[user_id],
            "With mirth and laughter let old wrinkles come.",
        );
        let private_message = client.send_message(&params).await?;

        Ok(Outcome::Multi(vec![stream_message, private_message]))
    }
}

pub struct CreateUser;

#[async_trait]
impl Operation for CreateUser {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        let user = NewUser {
            email: "notnewbie@zulip.com".to_string(),
            password: "temp".to_string(),
            full_name: "New User".to_string(),
            short_name: "newbie".to_string(),
        };
        Ok(Outcome::Single(client.create_user(&user).await?))
    }
}

pub struct GetCustomEmoji;

#[async_trait]
impl Operation for GetCustomEmoji {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.list_custom_emoji().await?))
    }
}

/// Register a queue, then delete it using the returned queue ID
pub struct DeleteQueue;

#[async_trait]
impl Operation for DeleteQueue {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        let registered = client.register_queue(&message_events()).await?;

        let queue_id = registered
            .get("queue_id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected_response("register_queue", "missing queue_id"))?;

        let params = DeregisterQueue {
            queue_id: queue_id.to_string(),
        };
        Ok(Outcome::Single(client.deregister_queue(&params).await?))
    }
}

/// The last 100 messages sent by iago to Verona
pub struct GetMessages;

#[async_trait]
impl Operation for GetMessages {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        let query = MessagesQuery {
            anchor: "newest".to_string(),
            num_before: 100,
            num_after: 0,
            narrow: vec![
                NarrowTerm::new("sender", "iago@zulip.com"),
                NarrowTerm::new("stream", "Verona"),
            ],
        };
        Ok(Outcome::Single(client.get_messages(&query).await?))
    }
}

pub struct GetOwnUser;

#[async_trait]
impl Operation for GetOwnUser {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.get_own_user().await?))
    }
}

pub struct GetStreamId;

#[async_trait]
impl Operation for GetStreamId {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.get_stream_id("Denmark").await?))
    }
}

pub struct GetStreamTopics;

#[async_trait]
impl Operation for GetStreamTopics {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.get_stream_topics(1).await?))
    }
}

pub struct GetSubscriptions;

#[async_trait]
impl Operation for GetSubscriptions {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.get_subscriptions().await?))
    }
}

/// List users, then list them again with gravatar URLs computed client-side
pub struct GetUsers;

#[async_trait]
impl Operation for GetUsers {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        let all_users = client.get_users(&UsersQuery::default()).await?;

        let query = UsersQuery {
            client_gravatar: Some(true),
        };
        let with_gravatar = client.get_users(&query).await?;

        Ok(Outcome::Multi(vec![all_users, with_gravatar]))
    }
}

pub struct RegisterEventQueue;

#[async_trait]
impl Operation for RegisterEventQueue {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome> {
        Ok(Outcome::Single(client.register_queue(&message_events()).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DEFAULT_ORDER;

    #[test]
    fn test_every_default_example_is_registered() {
        let registry = registry();
        assert_eq!(registry.len(), DEFAULT_ORDER.len());
        for name in DEFAULT_ORDER {
            assert!(registry.lookup(name).is_ok(), "missing example {name}");
        }
    }

    #[test]
    fn test_all_examples_document_success() {
        for descriptor in registry().descriptors() {
            assert_eq!(descriptor.status_code, 200, "{}", descriptor.name);
        }
    }
}
