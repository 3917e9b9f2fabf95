//! Tolerant field decoders for game records.
//!
//! Records arrive from scrapers and enrichment passes with loose typing. A field
//! holding the wrong JSON type decodes as absent (with a warning) instead of
//! failing the whole batch.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            tracing::warn!("Ignoring non-scalar text field: {other}");
            String::new()
        }
    })
}

pub(crate) fn genre<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(crate::models::genre_from_value(Some(&value)))
}

pub(crate) fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn string_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

pub(crate) fn opt_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(value_to_f64(&value))
}

pub(crate) fn f64_or_zero<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_f64(d).map(|v| v.unwrap_or(0.0))
}

pub(crate) fn opt_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(value_to_u64(&value))
}

pub(crate) fn u64_or_zero<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_u64(d).map(|v| v.unwrap_or(0))
}

pub(crate) fn bool_or_true<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Null => true,
        other => {
            tracing::warn!("Ignoring non-boolean 'free' flag: {other}");
            true
        }
    })
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Some(f),
            _ => {
                tracing::warn!("Ignoring non-numeric value {s:?}");
                None
            }
        },
        other => {
            tracing::warn!("Ignoring non-numeric value {other}");
            None
        }
    }
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => match s.trim().parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring non-integer value {s:?}");
                None
            }
        },
        Value::Null => None,
        other => {
            tracing::warn!("Ignoring non-integer value {other}");
            None
        }
    }
}
