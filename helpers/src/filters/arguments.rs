//! Request arguments
//!
//! Arguments are an ordered JSON object of key to supplied value. A key counts
//! as "not filtering" when it is missing or its value is falsy.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::FilterError;

/// Supplied filter values by argument key
pub type Arguments = Map<String, Value>;

/// Maximum size of argument JSON in bytes (64KB)
const MAX_ARGUMENTS_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of argument keys allowed
const MAX_ARGUMENTS: usize = 50;

/// Falsy values are `null`, `false`, zero, `""`, `[]` and `{}`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// The value supplied for `key`, unless missing or falsy
pub fn present_argument<'a>(arguments: &'a Arguments, key: &str) -> Option<&'a Value> {
    arguments.get(key).filter(|value| is_truthy(value))
}

/// Parse arguments from a JSON object (e.g. a `filter=` query parameter)
///
/// Validates JSON size, object shape and key count.
pub fn parse_arguments(json_str: &str) -> Result<Arguments, FilterError> {
    if json_str.len() > MAX_ARGUMENTS_JSON_SIZE {
        return Err(FilterError::ArgumentsTooLarge {
            max_bytes: MAX_ARGUMENTS_JSON_SIZE,
        });
    }

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidArguments(e.to_string()))?;

    let Value::Object(arguments) = value else {
        return Err(FilterError::InvalidArguments(
            "expected a JSON object".to_string(),
        ));
    };

    if arguments.len() > MAX_ARGUMENTS {
        return Err(FilterError::TooManyArguments { max: MAX_ARGUMENTS });
    }

    Ok(arguments)
}

/// Convert a typed argument struct into [`Arguments`]
///
/// `None` fields serialize as `null` and are therefore treated as absent.
pub fn arguments_from<T: Serialize>(value: &T) -> Result<Arguments, FilterError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(_) => Err(FilterError::InvalidArguments(
            "arguments must serialize to an object".to_string(),
        )),
        Err(e) => Err(FilterError::InvalidArguments(e.to_string())),
    }
}
