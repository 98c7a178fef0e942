use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, rejection::PathRejection},
    http::{HeaderMap, header},
};
use serde_json::{Map, Value};

use super::ApiError;

pub const CONTENT_TYPE_MESSAGE: &str = "Your request content-type must be application/json";

/// A JSON object request body.
///
/// Rejects anything not sent as `application/json` (or a `+json` subtype)
/// and anything that is not an object at the top level. Fields are left
/// untyped so each handler can report the first missing one by name.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ApiError::validation(CONTENT_TYPE_MESSAGE));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(ApiError::validation("Request body must be a JSON object")),
            Err(e) => Err(ApiError::validation(format!("Invalid JSON body: {e}"))),
        }
    }
}

pub fn has_json_content_type(headers: &HeaderMap) -> bool {
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

/// Checks that every field is present, in order. Values may be anything,
/// including null.
pub fn require_fields(body: &Map<String, Value>, fields: &[&str]) -> Result<(), ApiError> {
    match fields.iter().find(|field| !body.contains_key(**field)) {
        Some(field) => Err(ApiError::validation(format!(
            "{field} must be in request body"
        ))),
        None => Ok(()),
    }
}

pub fn required_text(body: &Map<String, Value>, field: &str) -> Result<String, ApiError> {
    match body.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::validation(format!("{field} must be a string"))),
        None => Err(ApiError::validation(format!(
            "{field} must be in request body"
        ))),
    }
}

/// A nullable string field. Absent and null both read as `None`.
pub fn optional_text(body: &Map<String, Value>, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ApiError::validation(format!(
            "{field} must be a string or null"
        ))),
    }
}

pub fn validate_build_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::validation(e.body_text()))?;
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid build ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}
