#![deny(clippy::all, clippy::pedantic)]

pub mod datasources;
pub mod indexers;
pub mod indexes;

use serde_json::Value;

/// Collection responses wrap their items in a `value` array; listings
/// always surface that array, empty when the field is absent.
pub(crate) fn unwrap_value(listing: Value) -> Value {
    match listing {
        Value::Object(mut object) => object
            .remove("value")
            .unwrap_or_else(|| Value::Array(Vec::new())),
        other => other,
    }
}
