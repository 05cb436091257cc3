//! `$ref` resolution against the active state, and its inverse.
//!
//! Resolution is a scoped operation: every successful `resolve_ref` must be
//! paired with exactly one `undo_resolve_ref` so that following a reference
//! never leaks its root/id/schema context into validation of sibling
//! keywords.

use crate::error::ResolveError;
use crate::loader::load_schema;
use crate::pointer::walk;
use crate::state::ValidationState;
use crate::uri::combine_reference;

impl ValidationState {
    /// Resolve a raw `$ref` value against the current base id.
    ///
    /// The reference combines with the active id into a canonical target.
    /// A target of the form `#<pointer>` resolves locally against the
    /// current root; anything else is split on its first `#` into a base
    /// URI fetched through the schema loader and an optional pointer walked
    /// against the fetched document, which becomes the new root (with the
    /// base URI as the new id).
    ///
    /// The receiver is left untouched, so a failed resolution loses no
    /// context. On success the caller must restore the pre-reference
    /// context with [`ValidationState::undo_resolve_ref`] once validation
    /// against the target is finished.
    ///
    /// # Errors
    ///
    /// [`ResolveError::SchemaInvalid`] when the pointer names a missing or
    /// non-object target, or when the loader has no document for the base
    /// URI. An unresolvable reference means the schema itself is malformed.
    pub fn resolve_ref(&self, reference: &str) -> Result<ValidationState, ResolveError> {
        let combined = combine_reference(self.id(), reference);
        if let Some(pointer) = combined.strip_prefix('#') {
            let target = walk(self.root_schema(), pointer)
                .ok_or_else(|| ResolveError::SchemaInvalid(combined.clone()))?
                .clone();
            Ok(self.clone().set_current_schema(target))
        } else {
            let (base, pointer) = split_fragment(&combined);
            let root = load_schema(self.schema_loader(), base)
                .ok_or_else(|| ResolveError::SchemaInvalid(combined.clone()))?;
            let target = walk(&root, pointer)
                .ok_or_else(|| ResolveError::SchemaInvalid(combined.clone()))?
                .clone();
            let base_id = Some(base.to_string());
            Ok(self
                .clone()
                .with_new_root(root, base_id)
                .set_current_schema(target))
        }
    }

    /// Restore the resolution context saved in `original`.
    ///
    /// `root_schema`, `current_schema`, and `id` come back from `original`;
    /// the path, error list, and every other accumulating field keep the
    /// values they have in `self`.
    pub fn undo_resolve_ref(self, original: &ValidationState) -> ValidationState {
        self.restore_context(original)
    }
}

/// Split a combined reference on its first `#` into base URI and pointer.
fn split_fragment(combined: &str) -> (&str, &str) {
    match combined.find('#') {
        Some(pos) => (&combined[..pos], &combined[pos + 1..]),
        None => (combined, ""),
    }
}
