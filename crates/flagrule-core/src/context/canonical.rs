//! Canonical serialization and hashing of context data
//!
//! The canonical form is compact JSON with object keys sorted by their
//! UTF-8 bytes at every depth. Strings and numbers are rendered by
//! `serde_json`, arrays keep their order. The identity is the first 16
//! bytes of the SHA-256 digest of that text, read big-endian.

use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Render a context mapping in canonical form
pub fn canonical_json(data: &BTreeMap<String, JsonValue>) -> String {
    let mut out = String::new();
    write_object(&mut out, data.iter());
    out
}

/// Hash canonical bytes into a 128-bit identity
pub fn identity_of(canonical: &str) -> u128 {
    let digest = Sha256::digest(canonical.as_bytes());
    let mut head = [0u8; 16];
    head.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(head)
}

fn write_object<'a, I>(out: &mut String, entries: I)
where
    I: Iterator<Item = (&'a String, &'a JsonValue)>,
{
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}

fn write_value(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&n.to_string()),
        JsonValue::String(s) => write_string(out, s),
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        JsonValue::Object(map) => write_object(out, map.iter()),
    }
}

fn write_string(out: &mut String, s: &str) {
    // Serializing a str cannot fail
    let quoted = JsonValue::String(s.to_string()).to_string();
    out.push_str(&quoted);
}
