//! Response bodies and HTTP error mapping.
//!
//! # Responsibilities
//! - Define the JSON bodies the API and gateway send
//! - Map every error kind to its status code
//!
//! # Design Decisions
//! - Every error body is `{"error": "<message>"}`
//! - Errors never carry state; rendering one has no side effects

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::payload::{ItemPayload, ValidationError};
use crate::api::simulate::SimulatedFailure;
use crate::store::Item;

/// `GET /items` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    pub items: Vec<Item>,
    pub request_examples: RequestExamples,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            request_examples: RequestExamples::default(),
        }
    }
}

/// Sample bodies clients can send to POST and PUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestExamples {
    pub post: ItemPayload,
    pub put: ItemPayload,
}

impl Default for RequestExamples {
    fn default() -> Self {
        Self {
            post: ItemPayload::new("Marker", 3u64),
            put: ItemPayload::new("Updated Marker", 6u64),
        }
    }
}

/// Body of a successful create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMessage {
    pub message: String,
    pub item: Item,
}

impl ItemMessage {
    pub fn new(message: impl Into<String>, item: Item) -> Self {
        Self {
            message: message.into(),
            item,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete body. The message is the per-route example hint.
    #[error("{hint}")]
    Validation {
        reason: ValidationError,
        hint: &'static str,
    },

    #[error("Item not found")]
    NotFound,

    /// Caller-requested canned failure.
    #[error("{}", .0.message)]
    Simulated(SimulatedFailure),

    /// Forwarding target unreachable.
    #[error("Bad gateway: upstream service is unreachable")]
    BadGateway,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Simulated(failure) => failure.status,
            ApiError::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
