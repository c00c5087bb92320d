//! reqwest-backed implementation of [`ZulipApi`]

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::common::{Credentials, Error, Result};

use super::params::{
    form_fields, DeregisterQueue, MessageParams, MessagesQuery, NewUser, RegisterQueue,
    UsersQuery,
};
use super::ZulipApi;

/// Client for a live Zulip server
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_key: String,
}

impl HttpClient {
    /// Build a client for the server described by `credentials`
    pub fn connect(credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("zulip-doc-examples/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = api_base_url(&credentials.site)?;
        tracing::info!(server = %base_url, email = %credentials.email, "Connected client");

        Ok(Self {
            http,
            base_url,
            email: credentials.email.clone(),
            api_key: credentials.api_key.clone(),
        })
    }

    async fn call<T: Serialize>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        params: Option<&T>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let fields = match params {
            Some(params) => form_fields(params)?,
            None => Vec::new(),
        };

        tracing::debug!(operation, %method, %url, "Sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.email, Some(&self.api_key));

        if !fields.is_empty() {
            request = if method == Method::GET {
                request.query(&fields)
            } else {
                request.form(&fields)
            };
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(operation, status, bytes = body.len(), "Received response");

        check_response(operation, status, &body)
    }

    async fn get(&self, operation: &str, path: &str) -> Result<Value> {
        self.call::<()>(operation, Method::GET, path, None).await
    }
}

#[async_trait]
impl ZulipApi for HttpClient {
    async fn send_message(&self, params: &MessageParams) -> Result<Value> {
        self.call("send_message", Method::POST, "/messages", Some(params))
            .await
    }

    async fn get_messages(&self, query: &MessagesQuery) -> Result<Value> {
        self.call("get_messages", Method::GET, "/messages", Some(query))
            .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<Value> {
        self.call("create_user", Method::POST, "/users", Some(user))
            .await
    }

    async fn get_users(&self, query: &UsersQuery) -> Result<Value> {
        self.call("get_users", Method::GET, "/users", Some(query))
            .await
    }

    async fn get_own_user(&self) -> Result<Value> {
        self.get("get_own_user", "/users/me").await
    }

    async fn list_custom_emoji(&self) -> Result<Value> {
        self.get("list_custom_emoji", "/realm/emoji").await
    }

    async fn register_queue(&self, params: &RegisterQueue) -> Result<Value> {
        self.call("register_queue", Method::POST, "/register", Some(params))
            .await
    }

    async fn deregister_queue(&self, params: &DeregisterQueue) -> Result<Value> {
        self.call("deregister_queue", Method::DELETE, "/events", Some(params))
            .await
    }

    async fn get_stream_id(&self, stream: &str) -> Result<Value> {
        #[derive(Serialize)]
        struct Query<'a> {
            stream: &'a str,
        }
        self.call(
            "get_stream_id",
            Method::GET,
            "/get_stream_id",
            Some(&Query { stream }),
        )
        .await
    }

    async fn get_stream_topics(&self, stream_id: u64) -> Result<Value> {
        let path = format!("/users/me/{}/topics", stream_id);
        self.get("get_stream_topics", &path).await
    }

    async fn get_subscriptions(&self) -> Result<Value> {
        self.get("get_subscriptions", "/users/me/subscriptions")
            .await
    }
}

/// Derive the API base URL from a server address
///
/// `https://chat.example.com/` becomes `https://chat.example.com/api/v1`;
/// an address already ending in `/api` only gets `/v1` appended.
pub fn api_base_url(site: &str) -> Result<String> {
    let site = site.trim().trim_end_matches('/');

    if !(site.starts_with("http://") || site.starts_with("https://")) {
        return Err(Error::Config(format!(
            "server site '{}' must start with http:// or https://",
            site
        )));
    }

    if site.ends_with("/api") {
        Ok(format!("{}/v1", site))
    } else {
        Ok(format!("{}/api/v1", site))
    }
}

/// Turn a raw HTTP response into the JSON body or an error
///
/// Zulip reports failures as `{"result": "error", "msg": ..., "code": ...}`.
pub fn check_response(operation: &str, status: u16, body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::unexpected_response(
            operation,
            &format!("status {} with non-JSON body: {}", status, e),
        )
    })?;

    let is_error = value.get("result").and_then(Value::as_str) == Some("error");
    if is_error || !(200..300).contains(&status) {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        return Err(Error::Api {
            operation: operation.to_string(),
            status,
            code: field("code").unwrap_or_else(|| "UNKNOWN".to_string()),
            message: field("msg").unwrap_or_else(|| "no error message".to_string()),
        });
    }

    Ok(value)
}
