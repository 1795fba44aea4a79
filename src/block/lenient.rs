//! Forgiving field decoders for editor payloads.
//!
//! Documents written by older editor versions store numbers as strings,
//! flags as `"true"`, and `null` almost anywhere. These helpers map all of
//! that onto a usable value instead of failing the block.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `12`, `12.4`, `"12"` → `Some(12)`; negatives, junk and `null` → `None`.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_f64)
        .filter(|f| *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f.round() as u32))
}

/// Like [`opt_u32`] for millisecond timestamps.
pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) if n.is_u64() => n.as_u64(),
        other => other
            .as_ref()
            .and_then(value_as_f64)
            .filter(|f| *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f.round() as u64),
    })
}

/// Any finite number, as stored: `12.5` stays `12.5`, `"-4"` is `-4`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// `true`, `"true"`, non-zero numbers → `true`; everything else → `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

/// Strings as-is, numbers and booleans in their JSON form, anything else
/// (`null`, arrays, objects) empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_string).unwrap_or_default())
}

/// Same as [`string`], with `None` in place of the empty fallback.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_string))
}

/// A sequence, with `null` or a non-array read as empty. Elements that do
/// not decode are dropped; the rest are kept in order.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(index, error = %err, "dropping malformed list element");
                None
            }
        })
        .collect())
}

fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "super::opt_u32")]
        n: Option<u32>,
        #[serde(deserialize_with = "super::opt_u64")]
        t: Option<u64>,
        #[serde(deserialize_with = "super::opt_f64")]
        x: Option<f64>,
        #[serde(deserialize_with = "super::flag")]
        f: bool,
        #[serde(deserialize_with = "super::string")]
        s: String,
        #[serde(deserialize_with = "super::opt_string")]
        o: Option<String>,
        #[serde(deserialize_with = "super::seq")]
        v: Vec<u8>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(probe(r#"{"n": 12}"#).n, Some(12));
        assert_eq!(probe(r#"{"n": 12.4}"#).n, Some(12));
        assert_eq!(probe(r#"{"n": " 48 "}"#).n, Some(48));
        assert_eq!(probe(r#"{"n": -3}"#).n, None);
        assert_eq!(probe(r#"{"n": "tall"}"#).n, None);
        assert_eq!(probe(r#"{"n": null}"#).n, None);
        assert_eq!(probe("{}").n, None);

        assert_eq!(probe(r#"{"t": 1700000000000}"#).t, Some(1_700_000_000_000));
        assert_eq!(probe(r#"{"t": "soon"}"#).t, None);
    }

    #[test]
    fn test_floats_kept_as_stored() {
        assert_eq!(probe(r#"{"x": 12.5}"#).x, Some(12.5));
        assert_eq!(probe(r#"{"x": -4}"#).x, Some(-4.0));
        assert_eq!(probe(r#"{"x": "7.25"}"#).x, Some(7.25));
        assert_eq!(probe(r#"{"x": [1]}"#).x, None);
    }

    #[test]
    fn test_flags() {
        assert!(probe(r#"{"f": true}"#).f);
        assert!(probe(r#"{"f": "TRUE"}"#).f);
        assert!(probe(r#"{"f": 1}"#).f);
        assert!(!probe(r#"{"f": 0}"#).f);
        assert!(!probe(r#"{"f": null}"#).f);
        assert!(!probe("{}").f);
    }

    #[test]
    fn test_strings() {
        assert_eq!(probe(r#"{"s": "a.png"}"#).s, "a.png");
        assert_eq!(probe(r#"{"s": null}"#).s, "");
        assert_eq!(probe(r#"{"s": 3}"#).s, "3");
        assert_eq!(probe(r#"{"s": false}"#).s, "false");
        assert_eq!(probe(r#"{"s": {"url": "x"}}"#).s, "");

        assert_eq!(probe(r#"{"o": "center"}"#).o.as_deref(), Some("center"));
        assert_eq!(probe(r#"{"o": 1}"#).o.as_deref(), Some("1"));
        assert_eq!(probe(r#"{"o": null}"#).o, None);
        assert_eq!(probe(r#"{"o": []}"#).o, None);
    }

    #[test]
    fn test_sequences() {
        assert!(probe(r#"{"v": null}"#).v.is_empty());
        assert!(probe(r#"{"v": "nope"}"#).v.is_empty());
        assert_eq!(probe(r#"{"v": [1, 2]}"#).v, vec![1, 2]);
        assert_eq!(probe(r#"{"v": [1, "x", 300, 3]}"#).v, vec![1, 3]);
    }
}
