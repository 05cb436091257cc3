//! Fragment pointers: RFC 6901 component escaping, parsing, and the walk
//! from a schema root to a referenced fragment.

use serde_json::Value;

/// Unescapes a pointer component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_schema_state::pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use json_schema_state::pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse the pointer part of a reference fragment into unescaped components.
///
/// The empty pointer addresses the whole document. A leading `/` is
/// stripped; components are unescaped.
///
/// # Example
///
/// ```
/// use json_schema_state::pointer::parse_pointer;
///
/// assert_eq!(parse_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_pointer("/definitions/pos"), vec!["definitions", "pos"]);
/// assert_eq!(parse_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(unescape_component).collect()
}

/// Check if a string is a valid non-negative array index.
///
/// No sign, no fraction, no leading zeros (except `"0"` itself).
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Walk `root` along `pointer`, requiring an object-shaped endpoint.
///
/// Object steps look up a key; array steps require a valid index. Any miss
/// (absent key, non-numeric or out-of-range index, stepping into a scalar,
/// or a non-object target) returns `None`.
pub fn walk<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    let mut current = root;
    for component in parse_pointer(pointer) {
        match current {
            Value::Object(map) => {
                current = map.get(&component)?;
            }
            Value::Array(items) => {
                if !is_valid_index(&component) {
                    return None;
                }
                let index: usize = component.parse().ok()?;
                current = items.get(index)?;
            }
            _ => return None,
        }
    }
    if current.is_object() {
        Some(current)
    } else {
        None
    }
}
