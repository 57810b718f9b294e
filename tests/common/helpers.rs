//! Shared test helper functions
//!
//! Common assertions on the JSON error bodies the API returns.

use serde_json::Value;

/// Message reported for `field` in a 400 validation body.
///
/// # Example
/// ```no_run
/// let body: serde_json::Value = response.json().await.unwrap();
/// assert_eq!(field_error(&body, "title"), Some("This field is required."));
/// ```
pub fn field_error<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body["fields"][field].as_str()
}

/// Message reported under `non_field_errors` in a 400 validation body.
pub fn non_field_error(body: &Value) -> Option<&str> {
    field_error(body, "non_field_errors")
}

/// Titles of a movie list response, in order.
pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("response should be a JSON array")
        .iter()
        .map(|movie| movie["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
