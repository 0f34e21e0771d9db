//! Canonical JSON encoding for deterministic serialization.
//!
//! Sign documents are digested by the network independently, so the same
//! document must produce identical bytes on every platform:
//! - Object keys sorted lexicographically by UTF-8 byte comparison
//! - No insignificant whitespace
//! - Integers only (floats are rejected)
//!
//! String escaping follows serde_json's standard JSON output.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Serialize a value to canonical JSON bytes.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(value).map_err(|e| CoreError::Canonical(e.to_string()))?;
    let mut out = String::new();
    write_value(&mut out, &value)?;
    Ok(out.into_bytes())
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CoreError::Canonical(
                    "floats not supported in canonical encoding".into(),
                ));
            }
            out.push_str(&n.to_string());
        }
        Value::String(s) => {
            let escaped =
                serde_json::to_string(s).map_err(|e| CoreError::Canonical(e.to_string()))?;
            out.push_str(&escaped);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            // serde_json's map preserves insertion order; sort here.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let escaped =
                    serde_json::to_string(key).map_err(|e| CoreError::Canonical(e.to_string()))?;
                out.push_str(&escaped);
                out.push(':');
                write_value(out, &map[key.as_str()])?;
            }
            out.push('}');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_sorted() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}});
        let bytes = canonical_json(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"alpha":2,"mid":{"a":2,"b":1},"zeta":1}"#
        );
    }

    #[test]
    fn test_deterministic() {
        let value = json!({"b": [1, 2, 3], "a": "text", "c": null});
        let b1 = canonical_json(&value).unwrap();
        let b2 = canonical_json(&value).unwrap();
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_no_whitespace() {
        let value = json!({"a": [1, {"b": "c"}]});
        let bytes = canonical_json(&value).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":[1,{"b":"c"}]}"#);
    }

    #[test]
    fn test_floats_rejected() {
        let value = json!({"x": 1.5});
        assert!(matches!(
            canonical_json(&value),
            Err(CoreError::Canonical(_))
        ));
    }

    #[test]
    fn test_string_escaping() {
        let value = json!({"s": "line\nbreak \"quoted\""});
        let bytes = canonical_json(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"s":"line\nbreak \"quoted\""}"#
        );
    }
}
