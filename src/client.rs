//! HTTP client for the item API.
//!
//! Every call returns the status and JSON body as received, error statuses
//! included, so callers can show exactly what the server answered.

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use crate::api::payload::ItemPayload;
use crate::store::ItemId;

/// Error type for client calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} answered {status} with a non-JSON body: {body}")]
    NotJson {
        url: String,
        status: u16,
        body: String,
    },
}

/// Status code and JSON body of one API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of an error body.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

pub struct ItemClient {
    client: Client,
    base_url: String,
}

impl ItemClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /items`, optionally with a `simulate` key.
    pub async fn list(&self, simulate: Option<&str>) -> Result<ApiReply, ClientError> {
        let mut request = self.request(Method::GET, "/items");
        if let Some(key) = simulate {
            request = request.query(&[("simulate", key)]);
        }
        self.send(request).await
    }

    /// `POST /items`
    pub async fn create(&self, item: &ItemPayload) -> Result<ApiReply, ClientError> {
        self.send(self.request(Method::POST, "/items").json(item)).await
    }

    /// `PUT /items/{id}`
    pub async fn update(&self, id: ItemId, item: &ItemPayload) -> Result<ApiReply, ClientError> {
        let path = format!("/items/{id}");
        self.send(self.request(Method::PUT, &path).json(item)).await
    }

    /// `DELETE /items/{id}`
    pub async fn delete(&self, id: ItemId) -> Result<ApiReply, ClientError> {
        let path = format!("/items/{id}");
        self.send(self.request(Method::DELETE, &path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiReply, ClientError> {
        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: source.url().map_or_else(|| self.base_url.clone(), ToString::to_string),
            source,
        })?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        match serde_json::from_str(&text) {
            Ok(body) => Ok(ApiReply { status, body }),
            Err(_) => Err(ClientError::NotJson {
                url,
                status,
                body: text,
            }),
        }
    }
}
