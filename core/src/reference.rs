#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Reference ids are `"{origin}#{json-pointer}"`. These helpers build them,
//! resolve `$ref` values against the origin of the document they appear in,
//! and walk JSON Pointers inside parsed roots.
//!
//! No external documents are fetched here: resolving only computes ids.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value as JsonValue;
use std::path::Path;
use url::Url;

/// Splits a reference id into its document part and optional fragment.
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        Some((document, fragment)) => (document, Some(fragment)),
        None => (reference, None),
    }
}

/// The reference id of a document's root (`"{origin}#"`).
pub fn root_reference(origin: &str) -> String {
    format!("{}#", origin)
}

/// Appends pointer segments to a reference id, escaping each one.
///
/// e.g. `child_reference("a.yaml#", &["components", "schemas", "Pet"])`
/// -> `a.yaml#/components/schemas/Pet`
pub fn child_reference(reference: &str, segments: &[&str]) -> String {
    let mut out = reference.to_string();
    for segment in segments {
        out.push('/');
        out.push_str(&escape_pointer_segment(segment));
    }
    out
}

/// Bytes percent-encoded inside pointer segments, so that decoding gives the key back.
const POINTER_SEGMENT: &AsciiSet = &CONTROLS.add(b'%');

/// Escapes a JSON Pointer segment (`%` and control bytes percent-encoded,
/// `~` -> `~0`, `/` -> `~1`). The inverse of [`decode_pointer_segment`].
pub fn escape_pointer_segment(segment: &str) -> String {
    utf8_percent_encode(segment, POINTER_SEGMENT)
        .to_string()
        .replace('~', "~0")
        .replace('/', "~1")
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Resolves a `$ref` value found in the document at `origin` into a reference id.
///
/// - `#/components/schemas/Pet` -> `{origin}#/components/schemas/Pet`
/// - `https://host/other.yaml#/X` stays as written
/// - `other.yaml#/X` is joined against the origin (URL or filesystem path)
pub fn resolve_reference(origin: &str, ref_str: &str) -> String {
    if ref_str.starts_with('#') {
        return format!("{}{}", origin, ref_str);
    }

    if Url::parse(ref_str).is_ok() {
        return ensure_fragment(ref_str.to_string());
    }

    let (document, fragment) = split_reference(ref_str);
    let base = if let Ok(origin_url) = Url::parse(origin) {
        match origin_url.join(document) {
            Ok(joined) => joined.to_string(),
            Err(_) => document.to_string(),
        }
    } else {
        let origin_path = Path::new(split_reference(origin).0);
        match origin_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                dir.join(document).to_string_lossy().into_owned()
            }
            _ => document.to_string(),
        }
    };

    format!("{}#{}", base, fragment.unwrap_or(""))
}

fn ensure_fragment(reference: String) -> String {
    if reference.contains('#') {
        reference
    } else {
        format!("{}#", reference)
    }
}

/// Looks up the node a fragment points at inside `root`.
///
/// An empty fragment (or `/`) is the root itself.
pub fn resolve_pointer<'a>(root: &'a JsonValue, fragment: &str) -> Option<&'a JsonValue> {
    if fragment.is_empty() || fragment == "/" {
        return Some(root);
    }
    if !fragment.starts_with('/') {
        return None;
    }
    let mut current = root;
    for raw in fragment.trim_start_matches('/').split('/') {
        let segment = decode_pointer_segment(raw);
        current = match current {
            JsonValue::Object(map) => map.get(&segment)?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// The last pointer segment of a reference id, decoded.
///
/// e.g. `a.yaml#/components/schemas/Pet` -> `Pet`
pub fn reference_name(reference: &str) -> Option<String> {
    let (_, fragment) = split_reference(reference);
    let last = fragment?.rsplit('/').next()?;
    if last.is_empty() {
        None
    } else {
        Some(decode_pointer_segment(last))
    }
}

/// Collects every `$ref` string under `node`, depth first, in document order.
pub fn collect_refs<'a>(node: &'a JsonValue, out: &mut Vec<&'a str>) {
    match node {
        JsonValue::Object(map) => {
            for (key, value) in map {
                if key == "$ref" {
                    if let Some(target) = value.as_str() {
                        out.push(target);
                    }
                } else {
                    collect_refs(value, out);
                }
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                collect_refs(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_local_reference() {
        assert_eq!(
            resolve_reference("specs/pets.yaml", "#/components/schemas/Pet"),
            "specs/pets.yaml#/components/schemas/Pet"
        );
    }

    #[test]
    fn test_resolve_relative_file_reference() {
        assert_eq!(
            resolve_reference("specs/pets.yaml", "common.yaml#/Error"),
            "specs/common.yaml#/Error"
        );
        assert_eq!(
            resolve_reference("pets.yaml", "common.yaml#/Error"),
            "common.yaml#/Error"
        );
    }

    #[test]
    fn test_resolve_relative_url_reference() {
        assert_eq!(
            resolve_reference("https://example.com/api/pets.yaml", "common.yaml#/Error"),
            "https://example.com/api/common.yaml#/Error"
        );
        assert_eq!(
            resolve_reference("pets.yaml", "https://example.com/schema.json"),
            "https://example.com/schema.json#"
        );
    }

    #[test]
    fn test_child_reference_escapes_segments() {
        assert_eq!(
            child_reference("d#", &["paths", "/pets/{id}", "get"]),
            "d#/paths/~1pets~1{id}/get"
        );
    }

    #[test]
    fn test_escaped_segments_resolve_to_their_keys() {
        let root = json!({"definitions": {"a%20b": {"x": 1}, "~1/%": {"y": 2}}});
        for key in ["a%20b", "~1/%"] {
            let reference = child_reference("d#", &["definitions", key]);
            let (_, fragment) = split_reference(&reference);
            assert_eq!(
                resolve_pointer(&root, fragment.unwrap_or_default()),
                root["definitions"].get(key)
            );
            assert_eq!(reference_name(&reference).as_deref(), Some(key));
        }
        assert_eq!(escape_pointer_segment("a%20b"), "a%2520b");
    }

    #[test]
    fn test_resolve_pointer() {
        let root = json!({"paths": {"/pets": {"get": {"tags": ["a", "b"]}}}});
        assert_eq!(
            resolve_pointer(&root, "/paths/~1pets/get/tags/1"),
            Some(&json!("b"))
        );
        assert_eq!(resolve_pointer(&root, ""), Some(&root));
        assert_eq!(resolve_pointer(&root, "/missing"), None);
    }

    #[test]
    fn test_reference_name() {
        assert_eq!(
            reference_name("d#/components/schemas/Pet~1Owner").as_deref(),
            Some("Pet/Owner")
        );
        assert_eq!(reference_name("d#"), None);
    }

    #[test]
    fn test_collect_refs_in_order() {
        let node = json!({
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/A"}}}},
            "responses": {"200": {"schema": {"type": "array", "items": {"$ref": "#/B"}}}}
        });
        let mut refs = Vec::new();
        collect_refs(&node, &mut refs);
        assert_eq!(refs, vec!["#/A", "#/B"]);
    }
}
