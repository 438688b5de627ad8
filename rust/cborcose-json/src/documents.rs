// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde_json::{Map, Value};

/// Top-level key of a device response.
pub const DOCUMENTS_KEY: &str = "documents";

/// Wrap a decoded document as `{"documents": [value]}`.
///
/// A map that already has a `documents` member is returned unchanged.
pub fn wrap_documents(value: Value) -> Value {
    if matches!(&value, Value::Object(map) if map.contains_key(DOCUMENTS_KEY)) {
        return value;
    }
    let mut wrapped = Map::with_capacity(1);
    wrapped.insert(DOCUMENTS_KEY.to_string(), Value::Array(vec![value]));
    Value::Object(wrapped)
}
