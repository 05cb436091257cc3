//! Shared type definitions for the validation state.

use std::fmt;
use std::sync::Arc;

use crate::error::{ValidationAborted, ValidationError};
use crate::loader::LoaderResult;

/// One step of the document path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A property name in an object.
    Key(String),
    /// An element position in an array.
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, "{}", key),
            PathStep::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// Bound on the number of errors a validation run may accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedErrors {
    /// Stop once this many errors have been recorded. `Bounded(0)` stops at
    /// the first error.
    Bounded(usize),
    /// Never stop on error count.
    Unbounded,
}

impl AllowedErrors {
    /// Whether one more error may be recorded on top of `accumulated`.
    pub fn permits(&self, accumulated: usize) -> bool {
        match self {
            AllowedErrors::Bounded(limit) => accumulated < *limit,
            AllowedErrors::Unbounded => true,
        }
    }
}

/// Error-accumulation policy invoked for every new validation error.
///
/// Receives the new error, the list so far, and the allowed bound; returns
/// the updated list, or [`ValidationAborted`] when validation must stop.
pub type ErrorHandlerFn = dyn Fn(
        ValidationError,
        &[ValidationError],
        AllowedErrors,
    ) -> Result<Vec<ValidationError>, ValidationAborted>
    + Send
    + Sync;

/// Shared handle to an error handler.
pub type ErrorHandler = Arc<ErrorHandlerFn>;

/// Schema retrieval callback: URI in, loader outcome out.
pub type SchemaLoaderFn = dyn Fn(&str) -> LoaderResult + Send + Sync;

/// Shared handle to a schema loader.
pub type SchemaLoader = Arc<SchemaLoaderFn>;
