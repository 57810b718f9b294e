//! Request extractors that reject with [`Error`]
//!
//! Axum's own `Json` and `Path` reject with plain-text bodies. These
//! wrappers report the same failures in the `{error, code, fields}` shape
//! every other API error uses.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result, ValidationErrors};

/// Reported for a body field whose JSON type is wrong. Every request body
/// field is a string.
pub const INVALID_STRING_MESSAGE: &str = "Not a valid string.";

/// JSON request body.
///
/// The `Content-Type` header is not checked. An empty (or `null`) body
/// yields `T::default()`, so missing fields reach the service validators
/// like any other missing field.
///
/// # Rejections (400)
/// - Malformed JSON or a body that is not an object: `non_field_errors`
/// - A field of the wrong type: that field
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::non_field(rejection.body_text()))?;

        parse_body(&bytes).map(JsonBody)
    }
}

/// Deserializes a request body into `T`.
pub fn parse_body<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.trim_ascii().is_empty() {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::non_field(format!("JSON parse error - {}", e)))?;

    match &value {
        Value::Null => return Ok(T::default()),
        Value::Object(_) => {}
        other => {
            return Err(Error::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(other)
            )));
        }
    }

    T::deserialize(&value).map_err(|error| invalid_fields::<T>(&value, error))
}

/// Finds the fields that fail on their own. Request structs have only
/// optional fields, so a one-field object fails only on a type mismatch.
fn invalid_fields<T: DeserializeOwned>(value: &Value, error: serde_json::Error) -> Error {
    let fields: HashMap<String, String> = value
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(key, field)| {
            let single = Value::Object(Map::from_iter([(key.to_string(), Value::clone(field))]));
            T::deserialize(&single).is_err()
        })
        .map(|(key, _)| (key.clone(), INVALID_STRING_MESSAGE.to_string()))
        .collect();

    if fields.is_empty() {
        Error::non_field(error.to_string())
    } else {
        Error::Validation(ValidationErrors::Multiple { fields })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Integer id taken from the URL path. A segment that is not an integer
/// matches no resource, so it is a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Path id is not an integer");
                Error::NotFound("Not found.".to_string())
            })?;

        Ok(IdPath(id))
    }
}
