//! Error records, resolution failures, and the default accumulation policy.

use serde_json::Value;
use thiserror::Error;

use crate::types::{AllowedErrors, PathStep};

/// A single validation failure recorded against the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Machine-readable failure code, e.g. `"wrong_type"`.
    pub kind: String,
    /// Where in the document the failure occurred, in entry order.
    pub path: Vec<PathStep>,
    /// The schema fragment the document failed against.
    pub schema: Value,
    /// The offending document fragment.
    pub data: Value,
}

impl ValidationError {
    pub fn new(
        kind: impl Into<String>,
        path: Vec<PathStep>,
        schema: Value,
        data: Value,
    ) -> Self {
        ValidationError {
            kind: kind.into(),
            path,
            schema,
            data,
        }
    }
}

/// Terminal signal from an error handler: validation must stop.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("validation aborted with {} errors", .errors.len())]
pub struct ValidationAborted {
    /// Every error accumulated, including the one that hit the bound.
    pub errors: Vec<ValidationError>,
}

/// Failure to resolve a `$ref` against the active schema context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference does not lead to a schema object: missing pointer
    /// target, bad array index, non-object target, or a remote document the
    /// loader cannot produce.
    #[error("SCHEMA_INVALID: {0}")]
    SchemaInvalid(String),
}

/// Append `error` to `existing`; abort once the allowed bound is exhausted.
///
/// The abort payload carries the full list, including the error that
/// crossed the bound.
pub fn default_error_handler(
    error: ValidationError,
    existing: &[ValidationError],
    allowed: AllowedErrors,
) -> Result<Vec<ValidationError>, ValidationAborted> {
    let mut errors = existing.to_vec();
    errors.push(error);
    if allowed.permits(existing.len()) {
        Ok(errors)
    } else {
        Err(ValidationAborted { errors })
    }
}
