//! URI algebra for schema ids: combining a base id with a reference and
//! canonicalizing joined paths.
//!
//! Covers the subset of RFC 3986 §5 that JSON Schema ids exercise: absolute
//! URIs, same-document fragments, and relative path/fragment references
//! against a base that may itself be relative.

use url::Url;

/// Combine the active base id with a reference found in a schema.
///
/// An absent reference leaves the base unchanged. Absolute `http`/`https`/
/// `file` references replace the base wholesale. A fragment-only reference
/// replaces the base's fragment. Any other reference is joined onto the
/// directory portion of the base and canonicalized.
///
/// # Example
///
/// ```
/// use json_schema_state::uri::combine_id;
///
/// assert_eq!(combine_id(None, Some("foo.json")), Some("foo.json".to_string()));
/// assert_eq!(
///     combine_id(Some("http://x.com/a/b.json"), Some("c.json")),
///     Some("http://x.com/a/c.json".to_string())
/// );
/// assert_eq!(
///     combine_id(Some("http://x.com/a/b.json"), Some("#/defs/y")),
///     Some("http://x.com/a/b.json#/defs/y".to_string())
/// );
/// ```
pub fn combine_id(base: Option<&str>, reference: Option<&str>) -> Option<String> {
    match reference {
        None => base.map(str::to_string),
        Some(reference) => Some(combine_reference(base, reference)),
    }
}

/// Combine a (possibly undefined) base with a present reference.
pub(crate) fn combine_reference(base: Option<&str>, reference: &str) -> String {
    if is_absolute_uri(reference) {
        return reference.to_string();
    }
    match base {
        None => reference.to_string(),
        Some(base) if reference.starts_with('#') => {
            format!("{}{}", strip_fragment(base), reference)
        }
        Some(base) => {
            let dir = dirname(strip_fragment(base));
            canonical_path(&format!("{}/{}", dir, reference), base)
        }
    }
}

/// Canonicalize a joined path: drop `.` segments, resolve `..` segments,
/// and re-prefix the scheme taken from the path itself or from `scheme_hint`.
///
/// Bare paths with bare hints stay bare.
///
/// # Panics
///
/// Panics if a `..` segment has no preceding segment to remove; the joined
/// path escapes its base and the schema ids are malformed.
///
/// # Example
///
/// ```
/// use json_schema_state::uri::canonical_path;
///
/// assert_eq!(canonical_path("a/./b/../c", "a/b.json"), "a/c");
/// assert_eq!(
///     canonical_path("http://x.com/a/./c.json", "http://x.com/a/b.json"),
///     "http://x.com/a/c.json"
/// );
/// ```
pub fn canonical_path(path: &str, scheme_hint: &str) -> String {
    if let Some(rest) = path.strip_prefix("file://") {
        format!("file://{}", normalize(rest))
    } else if let Some(rest) = path.strip_prefix("http://") {
        format!("http://{}", normalize(rest))
    } else if let Some(rest) = path.strip_prefix("https://") {
        format!("https://{}", normalize(rest))
    } else if scheme_hint.starts_with("http://") {
        format!("http://{}", normalize(path))
    } else if scheme_hint.starts_with("https://") {
        format!("https://{}", normalize(path))
    } else if scheme_hint.starts_with("file://") {
        format!("file://{}", normalize(path))
    } else {
        normalize(path)
    }
}

/// Whether `reference` parses as an absolute http, https, or file URI.
fn is_absolute_uri(reference: &str) -> bool {
    match Url::parse(reference) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "file"),
        Err(_) => false,
    }
}

/// The portion of `id` before its fragment, or all of it.
fn strip_fragment(id: &str) -> &str {
    match id.find('#') {
        Some(pos) => &id[..pos],
        None => id,
    }
}

/// The directory portion of a path: everything before the last `/`.
///
/// `"."` when the path has no separator at all.
fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(pos) => &path[..pos],
        None => ".",
    }
}

/// Tokenize on `/`, drop `.` and empty tokens, resolve `..` against the
/// preceding token. A leading `/` survives normalization.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for token in path.split('/') {
        match token {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    panic!("path escapes its base: {:?}", path);
                }
            }
            token => parts.push(token),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_absent_reference() {
        assert_eq!(combine_id(None, None), None);
        assert_eq!(
            combine_id(Some("http://x.com/a.json"), None),
            Some("http://x.com/a.json".to_string())
        );
    }

    #[test]
    fn test_combine_undefined_base() {
        assert_eq!(combine_id(None, Some("foo.json")), Some("foo.json".to_string()));
        assert_eq!(
            combine_id(None, Some("#/definitions/pos")),
            Some("#/definitions/pos".to_string())
        );
    }

    #[test]
    fn test_combine_absolute_reference_wins() {
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json"), Some("http://y.org/s.json")),
            Some("http://y.org/s.json".to_string())
        );
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json"), Some("file:///etc/s.json")),
            Some("file:///etc/s.json".to_string())
        );
        assert_eq!(
            combine_id(Some("foo/bar.json"), Some("https://y.org/s.json")),
            Some("https://y.org/s.json".to_string())
        );
    }

    #[test]
    fn test_combine_relative_path() {
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json"), Some("c.json")),
            Some("http://x.com/a/c.json".to_string())
        );
    }

    #[test]
    fn test_combine_fragment_only() {
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json"), Some("#/defs/y")),
            Some("http://x.com/a/b.json#/defs/y".to_string())
        );
        // An existing fragment on the base is replaced
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json#/old"), Some("#/new")),
            Some("http://x.com/a/b.json#/new".to_string())
        );
    }

    #[test]
    fn test_combine_relative_base() {
        assert_eq!(
            combine_id(Some("a/b.json"), Some("c.json")),
            Some("a/c.json".to_string())
        );
        assert_eq!(
            combine_id(Some("b.json"), Some("c.json")),
            Some("c.json".to_string())
        );
    }

    #[test]
    fn test_combine_parent_directory() {
        assert_eq!(
            combine_id(Some("http://x.com/a/b/s.json"), Some("../c.json")),
            Some("http://x.com/a/c.json".to_string())
        );
    }

    #[test]
    fn test_combine_reference_with_fragment() {
        assert_eq!(
            combine_id(Some("http://x.com/a/b.json"), Some("c.json#/defs/p")),
            Some("http://x.com/a/c.json#/defs/p".to_string())
        );
    }

    #[test]
    fn test_combine_file_base() {
        assert_eq!(
            combine_id(Some("file:///schemas/a/b.json"), Some("c.json")),
            Some("file:///schemas/a/c.json".to_string())
        );
    }

    #[test]
    fn test_canonical_path_dot_segments() {
        assert_eq!(canonical_path("a/./b/../c", "a/b.json"), "a/c");
    }

    #[test]
    fn test_canonical_path_scheme_preserved() {
        assert_eq!(
            canonical_path("http://x.com/a/./b/../c.json", "http://x.com/a/b.json"),
            "http://x.com/a/c.json"
        );
        assert_eq!(
            canonical_path("file:///a/./b.json", "file:///a/x.json"),
            "file:///a/b.json"
        );
    }

    #[test]
    fn test_canonical_path_scheme_from_hint() {
        assert_eq!(
            canonical_path("x.com/a/c.json", "https://x.com/a/b.json"),
            "https://x.com/a/c.json"
        );
    }

    #[test]
    fn test_canonical_path_collapses_double_separators() {
        assert_eq!(canonical_path("a//b/c", "a/b.json"), "a/b/c");
    }

    #[test]
    #[should_panic(expected = "path escapes its base")]
    fn test_canonical_path_parent_underflow() {
        canonical_path("../c.json", "b.json");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("http://x.com/a/b.json"), "http://x.com/a");
        assert_eq!(dirname("a/b.json"), "a");
        assert_eq!(dirname("b.json"), ".");
        assert_eq!(dirname("/b.json"), "/");
    }
}
