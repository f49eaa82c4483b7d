//! Canonical hashing.
//!
//! Documents are hashed as `hex(BLAKE3(JCS(document_json)))`, where JCS is the
//! JSON Canonicalization Scheme (RFC 8785): sorted object keys, no whitespace,
//! minimal string escaping. Two structurally equal documents always hash the
//! same, which is how repeated generation runs are compared.

use serde::Serialize;

use crate::descriptor::InventoryDescriptor;
use crate::error::SpecError;

/// Computes the canonical BLAKE3 hash of a descriptor.
///
/// # Example
/// ```
/// use satchel_spec::{InventoryDescriptor, InventorySlot};
/// use satchel_spec::hash::canonical_descriptor_hash;
///
/// let descriptor = InventoryDescriptor::builder("0123456789abcdef0123456789abcdef")
///     .slot(InventorySlot::new("Hat"))
///     .build();
///
/// let hash = canonical_descriptor_hash(&descriptor).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_descriptor_hash(descriptor: &InventoryDescriptor) -> Result<String, SpecError> {
    canonical_document_hash(descriptor)
}

/// Computes the canonical BLAKE3 hash of any serializable document.
pub fn canonical_document_hash<T: Serialize + ?Sized>(document: &T) -> Result<String, SpecError> {
    let value = serde_json::to_value(document)?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    blake3_hash_str(&canonicalize_json(value))
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_nan() || f.is_infinite() => "null".to_string(),
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => {
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') && !s.contains('E') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        None => "null".to_string(),
    }
}

fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Computes a BLAKE3 hash of arbitrary data as 64 lowercase hex characters.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Computes a BLAKE3 hash of a string.
pub fn blake3_hash_str(s: &str) -> String {
    blake3_hash(s.as_bytes())
}
