//! Response helpers for tool handlers
//!
//! Every tool response is a flat JSON object with a boolean `success`
//! discriminant. Failures additionally carry an `error` string.

use serde_json::{Map, Value};

/// Extra fields merged into a response object
pub type Fields = Map<String, Value>;

/// Create a successful response: `{"success": true, ...fields}`
pub fn success_response<I, K>(fields: I) -> Value
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut response = collect_fields(fields);
    response.insert("success".to_string(), Value::Bool(true));
    Value::Object(response)
}

/// Create an error response: `{"success": false, "error": error, ...fields}`
pub fn error_response<I, K>(error: impl Into<String>, fields: I) -> Value
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut response = collect_fields(fields);
    response.insert("success".to_string(), Value::Bool(false));
    response.insert("error".to_string(), Value::String(error.into()));
    Value::Object(response)
}

/// Create a not found error response, e.g. `"User not found: abc-123"`
pub fn not_found_response(entity_type: &str, entity_id: &str) -> Value {
    error_response(format!("{entity_type} not found: {entity_id}"), Fields::new())
}

fn collect_fields<I, K>(fields: I) -> Fields
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
