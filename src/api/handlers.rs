//! Axum handlers for the item routes.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use crate::api::payload::{self, parse_item_id, CREATE_HINT, UPDATE_HINT};
use crate::api::simulate::SimulatedFailure;
use crate::http::response::{ApiError, ItemList, ItemMessage};
use crate::http::server::AppState;

/// The first `simulate` value in the query string. Later repeats are ignored.
fn simulate_key(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "simulate")
        .map(|(_, value)| value.as_str())
}

/// `GET /items`
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ItemList>, ApiError> {
    if let Some(failure) = simulate_key(&params).and_then(SimulatedFailure::lookup) {
        tracing::info!(key = failure.key, status = %failure.status, "Simulating failure");
        return Err(ApiError::Simulated(failure));
    }

    Ok(Json(ItemList::new(state.store.list())))
}

/// `POST /items`
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ItemMessage>), ApiError> {
    let payload = payload::validate(&body).map_err(|reason| rejected(reason, CREATE_HINT))?;

    let item = state.store.create(payload.name, payload.quantity);
    tracing::info!(id = item.id, "Item created");

    Ok((StatusCode::CREATED, Json(ItemMessage::new("Item created", item))))
}

/// `PUT /items/{id}`
///
/// The id is checked before the body, so an unknown id with a bad body is a 404.
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<ItemMessage>, ApiError> {
    let id = parse_item_id(&raw_id)
        .filter(|id| state.store.find(*id).is_some())
        .ok_or(ApiError::NotFound)?;

    let payload = payload::validate(&body).map_err(|reason| rejected(reason, UPDATE_HINT))?;

    // The item may have been deleted since the lookup.
    let item = state
        .store
        .update(id, payload.name, payload.quantity)
        .ok_or(ApiError::NotFound)?;
    tracing::info!(id, "Item updated");

    Ok(Json(ItemMessage::new("Item updated", item)))
}

/// `DELETE /items/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItemMessage>, ApiError> {
    let item = parse_item_id(&raw_id)
        .and_then(|id| state.store.delete(id))
        .ok_or(ApiError::NotFound)?;
    tracing::info!(id = item.id, "Item deleted");

    Ok(Json(ItemMessage::new("Item deleted", item)))
}

fn rejected(reason: payload::ValidationError, hint: &'static str) -> ApiError {
    tracing::debug!(%reason, "Rejected item payload");
    ApiError::Validation { reason, hint }
}
