//! HTTP API handlers.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::metrics;
use crate::store::{Item, ItemStore};

/// Body of `GET /items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    /// Every stored item, oldest first.
    pub items: Vec<Item>,
}

/// Body of a successful `POST /items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// The item as stored.
    pub item: Item,
}

/// Body of any rejected request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable reason.
    pub error: String,
}

/// A request body parsed as JSON, if there was one to parse.
///
/// Bodies are only parsed when the request declares a JSON content type;
/// anything else (including an empty body) counts as absent.
#[derive(Debug)]
pub struct ItemPayload(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for ItemPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ItemPayload(None));
        }

        let value = serde_json::from_slice(&bytes)?;
        Ok(ItemPayload(Some(value)))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// JSON type name of a body, for logging without the body itself.
fn json_kind(body: Option<&Value>) -> &'static str {
    match body {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Returns the full collection in insertion order.
pub async fn list_items(State(store): State<ItemStore>) -> Json<ItemsResponse> {
    let items = store.list().await;
    debug!(count = items.len(), "Listing items");
    Json(ItemsResponse { items })
}

/// Appends the posted object and echoes it back with 201.
pub async fn create_item(
    State(store): State<ItemStore>,
    ItemPayload(body): ItemPayload,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = match body {
        Some(Value::Object(item)) => item,
        other => {
            warn!(kind = json_kind(other.as_ref()), "Rejected invalid item");
            metrics::inc_items_rejected();
            return Err(ApiError::InvalidItem);
        }
    };

    let stored = store.append(item.clone()).await;
    metrics::record_item_created(stored);
    debug!(stored, "Item appended");

    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}
