//! The per-run validation state and its construction options.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{default_error_handler, ValidationError};
use crate::loader::not_found_loader;
use crate::pointer::escape_component;
use crate::types::{AllowedErrors, ErrorHandler, PathStep, SchemaLoader};
use crate::uri::combine_id;

/// Dialect assumed when neither the options nor the schema declare one.
pub const DEFAULT_SCHEMA_VERSION: &str = "http://json-schema.org/schema#";

/// Configuration for a validation run.
///
/// ```
/// use json_schema_state::{AllowedErrors, ValidationOptions};
///
/// let options = ValidationOptions::new().with_allowed_errors(AllowedErrors::Unbounded);
/// ```
#[derive(Clone)]
pub struct ValidationOptions {
    pub error_handler: ErrorHandler,
    pub allowed_errors: AllowedErrors,
    pub default_schema_version: Option<String>,
    pub schema_loader: SchemaLoader,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            error_handler: Arc::new(default_error_handler),
            allowed_errors: AllowedErrors::Bounded(0),
            default_schema_version: None,
            schema_loader: not_found_loader(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = handler;
        self
    }

    pub fn with_allowed_errors(mut self, allowed: AllowedErrors) -> Self {
        self.allowed_errors = allowed;
        self
    }

    pub fn with_default_schema_version(mut self, version: impl Into<String>) -> Self {
        self.default_schema_version = Some(version.into());
        self
    }

    pub fn with_schema_loader(mut self, loader: SchemaLoader) -> Self {
        self.schema_loader = loader;
        self
    }
}

/// Traversal state threaded through one validation run.
///
/// Tracks the resolution root, the schema fragment under inspection, the
/// document path, the active base id, and the accumulated errors. Every
/// mutator consumes the state and returns the updated value; the driving
/// engine clones wherever it needs to keep a snapshot.
///
/// One state is created per top-level validation call and discarded when it
/// returns.
#[derive(Clone)]
pub struct ValidationState {
    root_schema: Value,
    current_schema: Value,
    current_path: Vec<PathStep>,
    allowed_errors: AllowedErrors,
    error_list: Vec<ValidationError>,
    error_handler: ErrorHandler,
    default_schema_version: String,
    schema_loader: SchemaLoader,
    id: Option<String>,
}

impl fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationState")
            .field("root_schema", &self.root_schema)
            .field("current_schema", &self.current_schema)
            .field("current_path", &self.current_path)
            .field("allowed_errors", &self.allowed_errors)
            .field("error_list", &self.error_list)
            .field("error_handler", &"<fn>")
            .field("default_schema_version", &self.default_schema_version)
            .field("schema_loader", &"<fn>")
            .field("id", &self.id)
            .finish()
    }
}

impl ValidationState {
    /// Build the initial state for validating against `schema`.
    ///
    /// `current_schema` starts as the root, and the base id is computed from
    /// the schema's own `$id`/`id` declaration if present.
    pub fn new(schema: &Value, options: ValidationOptions) -> Self {
        let default_schema_version = options
            .default_schema_version
            .or_else(|| {
                schema
                    .get("$schema")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string());
        let id = combine_id(None, declared_id(schema));
        ValidationState {
            root_schema: schema.clone(),
            current_schema: schema.clone(),
            current_path: Vec::new(),
            allowed_errors: options.allowed_errors,
            error_list: Vec::new(),
            error_handler: options.error_handler,
            default_schema_version,
            schema_loader: options.schema_loader,
            id,
        }
    }

    /// Push one path segment. Call on entering a document node; pair with
    /// [`ValidationState::remove_last_from_path`] on exit.
    pub fn add_to_path(mut self, step: impl Into<PathStep>) -> Self {
        self.current_path.push(step.into());
        self
    }

    /// Pop the last path segment.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty: an unmatched pop is a bug in the driving
    /// engine, not a data error.
    pub fn remove_last_from_path(mut self) -> Self {
        match self.current_path.pop() {
            Some(_) => self,
            None => panic!("remove_last_from_path called on an empty path"),
        }
    }

    /// Replace the schema fragment under inspection.
    ///
    /// The base id is recomputed from the previous id and the new schema's
    /// `$id`/`id` declaration; a schema without one inherits the previous id
    /// unchanged.
    pub fn set_current_schema(mut self, schema: Value) -> Self {
        self.id = combine_id(self.id.as_deref(), declared_id(&schema));
        self.current_schema = schema;
        self
    }

    pub fn set_allowed_errors(mut self, allowed: AllowedErrors) -> Self {
        self.allowed_errors = allowed;
        self
    }

    pub fn set_error_list(mut self, errors: Vec<ValidationError>) -> Self {
        self.error_list = errors;
        self
    }

    pub fn root_schema(&self) -> &Value {
        &self.root_schema
    }

    pub fn current_schema(&self) -> &Value {
        &self.current_schema
    }

    pub fn current_path(&self) -> &[PathStep] {
        &self.current_path
    }

    pub fn allowed_errors(&self) -> AllowedErrors {
        self.allowed_errors
    }

    pub fn error_list(&self) -> &[ValidationError] {
        &self.error_list
    }

    pub fn error_handler(&self) -> &ErrorHandler {
        &self.error_handler
    }

    pub fn default_schema_version(&self) -> &str {
        &self.default_schema_version
    }

    pub fn schema_loader(&self) -> &SchemaLoader {
        &self.schema_loader
    }

    /// The currently active base id, if any has been declared.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The current document path formatted as a JSON Pointer.
    pub fn path_pointer(&self) -> String {
        let mut out = String::new();
        for step in &self.current_path {
            out.push('/');
            out.push_str(&escape_component(&step.to_string()));
        }
        out
    }

    /// Swap in a new resolution root and base id, as when a remote document
    /// is fetched.
    pub(crate) fn with_new_root(mut self, root: Value, id: Option<String>) -> Self {
        self.root_schema = root;
        self.id = id;
        self
    }

    /// Copy the resolution context (root, current schema, id) from
    /// `original`, keeping every accumulating field of `self`.
    pub(crate) fn restore_context(mut self, original: &ValidationState) -> Self {
        self.root_schema = original.root_schema.clone();
        self.current_schema = original.current_schema.clone();
        self.id = original.id.clone();
        self
    }
}

/// The id declared on a schema value, under either spelling.
fn declared_id(schema: &Value) -> Option<&str> {
    schema
        .get("$id")
        .or_else(|| schema.get("id"))
        .and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_defaults() {
        let schema = json!({"type": "object"});
        let state = ValidationState::new(&schema, ValidationOptions::default());

        assert_eq!(state.root_schema(), &schema);
        assert_eq!(state.current_schema(), &schema);
        assert!(state.current_path().is_empty());
        assert!(state.error_list().is_empty());
        assert_eq!(state.allowed_errors(), AllowedErrors::Bounded(0));
        assert_eq!(state.default_schema_version(), DEFAULT_SCHEMA_VERSION);
        assert_eq!(state.id(), None);
    }

    #[test]
    fn test_new_reads_dialect_from_schema() {
        let schema = json!({"$schema": "http://json-schema.org/draft-06/schema#"});
        let state = ValidationState::new(&schema, ValidationOptions::default());
        assert_eq!(
            state.default_schema_version(),
            "http://json-schema.org/draft-06/schema#"
        );
    }

    #[test]
    fn test_new_option_overrides_schema_dialect() {
        let schema = json!({"$schema": "http://json-schema.org/draft-06/schema#"});
        let options = ValidationOptions::new()
            .with_default_schema_version("http://json-schema.org/draft-04/schema#");
        let state = ValidationState::new(&schema, options);
        assert_eq!(
            state.default_schema_version(),
            "http://json-schema.org/draft-04/schema#"
        );
    }

    #[test]
    fn test_new_computes_id_from_schema() {
        let schema = json!({"$id": "http://x.com/root.json"});
        let state = ValidationState::new(&schema, ValidationOptions::default());
        assert_eq!(state.id(), Some("http://x.com/root.json"));
    }

    #[test]
    fn test_new_accepts_legacy_id_spelling() {
        let schema = json!({"id": "http://x.com/root.json"});
        let state = ValidationState::new(&schema, ValidationOptions::default());
        assert_eq!(state.id(), Some("http://x.com/root.json"));
    }

    #[test]
    fn test_path_push_pop() {
        let schema = json!({});
        let state = ValidationState::new(&schema, ValidationOptions::default());

        let state = state.add_to_path("properties").add_to_path(0usize);
        assert_eq!(
            state.current_path(),
            &[PathStep::Key("properties".to_string()), PathStep::Index(0)]
        );

        let state = state.remove_last_from_path().remove_last_from_path();
        assert!(state.current_path().is_empty());
    }

    #[test]
    #[should_panic(expected = "empty path")]
    fn test_pop_empty_path_panics() {
        let schema = json!({});
        let state = ValidationState::new(&schema, ValidationOptions::default());
        let _ = state.remove_last_from_path();
    }

    #[test]
    fn test_set_current_schema_inherits_id() {
        let schema = json!({"$id": "http://x.com/a/b.json"});
        let state = ValidationState::new(&schema, ValidationOptions::default());

        // No id on the new schema: previous id is inherited unchanged
        let state = state.set_current_schema(json!({"type": "string"}));
        assert_eq!(state.id(), Some("http://x.com/a/b.json"));
    }

    #[test]
    fn test_set_current_schema_combines_relative_id() {
        let schema = json!({"$id": "http://x.com/a/b.json"});
        let state = ValidationState::new(&schema, ValidationOptions::default());

        let state = state.set_current_schema(json!({"$id": "c.json", "type": "string"}));
        assert_eq!(state.id(), Some("http://x.com/a/c.json"));
    }

    #[test]
    fn test_path_pointer() {
        let schema = json!({});
        let state = ValidationState::new(&schema, ValidationOptions::default())
            .add_to_path("definitions")
            .add_to_path(0usize)
            .add_to_path("a/b");
        assert_eq!(state.path_pointer(), "/definitions/0/a~1b");
    }

    #[test]
    fn test_set_error_list_and_allowed_errors() {
        let schema = json!({});
        let state = ValidationState::new(&schema, ValidationOptions::default());

        let errors = vec![ValidationError::new(
            "wrong_type",
            vec![PathStep::Key("count".to_string())],
            json!({"type": "integer"}),
            json!("nope"),
        )];
        let state = state
            .set_error_list(errors.clone())
            .set_allowed_errors(AllowedErrors::Unbounded);

        assert_eq!(state.error_list(), errors.as_slice());
        assert_eq!(state.allowed_errors(), AllowedErrors::Unbounded);
    }
}
