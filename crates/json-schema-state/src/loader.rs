//! Schema-loader adapter: invokes the supplied callback and normalizes its
//! result into "produced a schema" or "did not".

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use crate::types::SchemaLoader;

/// Raw outcome of a schema-loader callback.
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderResult {
    /// Explicit success wrapper around a schema document.
    Found(Value),
    /// A bare value; only object-shaped values count as schemas.
    Bare(Value),
    /// No document available for the URI.
    NotFound,
}

/// Invoke `loader` for `uri`, normalizing every failure mode to `None`.
///
/// A loader that panics is indistinguishable from one that has no document.
pub fn load_schema(loader: &SchemaLoader, uri: &str) -> Option<Value> {
    let outcome = catch_unwind(AssertUnwindSafe(|| loader(uri))).ok()?;
    match outcome {
        LoaderResult::Found(schema) => Some(schema),
        LoaderResult::Bare(schema) if schema.is_object() => Some(schema),
        LoaderResult::Bare(_) | LoaderResult::NotFound => None,
    }
}

/// The default loader: every URI is unknown.
pub fn not_found_loader() -> SchemaLoader {
    Arc::new(|_uri: &str| LoaderResult::NotFound)
}

/// A loader backed by an in-memory URI to schema table.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use json_schema_state::loader::{load_schema, map_loader};
/// use serde_json::json;
///
/// let mut schemas = HashMap::new();
/// schemas.insert("http://x.com/s.json".to_string(), json!({"type": "string"}));
/// let loader = map_loader(schemas);
///
/// assert_eq!(load_schema(&loader, "http://x.com/s.json"), Some(json!({"type": "string"})));
/// assert_eq!(load_schema(&loader, "http://x.com/other.json"), None);
/// ```
pub fn map_loader(schemas: HashMap<String, Value>) -> SchemaLoader {
    Arc::new(move |uri: &str| match schemas.get(uri) {
        Some(schema) => LoaderResult::Found(schema.clone()),
        None => LoaderResult::NotFound,
    })
}
