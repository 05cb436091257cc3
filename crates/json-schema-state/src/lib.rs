//! JSON Schema validation state: `$ref` resolution, id scoping, and path
//! tracking for schema validators.
//!
//! This crate implements the traversal state a JSON Schema validation
//! engine threads through its recursive descent: where validation currently
//! is in the document and in the schema, which base `id` is active, and how
//! `$ref` indirection resolves to a concrete schema fragment and back.
//! References may be local (`#/definitions/x`) or remote
//! (`other.json#/foo`, fetched through a caller-supplied loader).
//!
//! The keyword checks themselves (`type`, `minimum`, `pattern`, ...) live in
//! the engine driving this state; so does the I/O behind the loader.
//!
//! # Example
//!
//! ```
//! use json_schema_state::{ValidationOptions, ValidationState};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "definitions": { "pos": { "type": "integer", "minimum": 0 } },
//!     "properties": { "count": { "$ref": "#/definitions/pos" } }
//! });
//!
//! let state = ValidationState::new(&schema, ValidationOptions::default());
//!
//! // Follow the reference, validate against the target, then restore the
//! // pre-reference context for the sibling keywords.
//! let resolved = state.resolve_ref("#/definitions/pos").unwrap();
//! assert_eq!(
//!     resolved.current_schema(),
//!     &json!({ "type": "integer", "minimum": 0 })
//! );
//!
//! let state = resolved.undo_resolve_ref(&state);
//! assert_eq!(state.current_schema(), &schema);
//! ```

pub mod error;
pub mod loader;
pub mod pointer;
pub mod state;
pub mod types;
pub mod uri;

mod resolver;

pub use error::{default_error_handler, ResolveError, ValidationAborted, ValidationError};
pub use loader::{load_schema, map_loader, not_found_loader, LoaderResult};
pub use state::{ValidationOptions, ValidationState, DEFAULT_SCHEMA_VERSION};
pub use types::{
    AllowedErrors, ErrorHandler, ErrorHandlerFn, PathStep, SchemaLoader, SchemaLoaderFn,
};
pub use uri::{canonical_path, combine_id};
