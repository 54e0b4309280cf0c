//! Request body and path validation.
//!
//! # Design Decisions
//! - Bodies are parsed as JSON whatever the content type says
//! - Only presence and type are checked: non-empty string name, numeric quantity
//! - Extra fields are ignored

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::store::ItemId;

/// 400 message for `POST /items`.
pub const CREATE_HINT: &str =
    r#"Both name and quantity are required. Example: { "name": "Marker", "quantity": 3 }"#;

/// 400 message for `PUT /items/{id}`.
pub const UPDATE_HINT: &str =
    r#"Both name and quantity are required. Example: { "name": "Updated Marker", "quantity": 6 }"#;

/// A validated create/update body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub quantity: Number,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, quantity: impl Into<Number>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Why a body was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("body is not valid JSON")]
    Malformed,
    #[error("body is not a JSON object")]
    NotAnObject,
    #[error("name must be a non-empty string")]
    InvalidName,
    #[error("quantity must be a number")]
    InvalidQuantity,
}

/// Validate a raw request body.
pub fn validate(body: &[u8]) -> Result<ItemPayload, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::Malformed)?;
    let Value::Object(fields) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => return Err(ValidationError::InvalidName),
    };
    let quantity = match fields.get("quantity") {
        Some(Value::Number(quantity)) => quantity.clone(),
        _ => return Err(ValidationError::InvalidQuantity),
    };

    Ok(ItemPayload { name, quantity })
}

/// Interpret an `{id}` path segment.
///
/// Any finite, non-negative integral number names an item (`"3"` and `"3.0"`
/// are the same id). Everything else matches nothing.
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    let value: f64 = raw.trim().parse().ok()?;
    let integral = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    (integral && value <= u64::MAX as f64).then(|| value as ItemId)
}
