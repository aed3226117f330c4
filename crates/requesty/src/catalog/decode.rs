//! Decoding and validation of the raw catalog document.
//!
//! The upstream may send the array directly or as a JSON string containing the
//! array. Prices may arrive as numbers or numeric strings.

use serde::Deserialize;
use serde_json::Value;

use super::entry::{ModelEntry, sort_entries};
use super::error::{CatalogError, MalformedCatalog};

#[derive(Deserialize)]
struct RawEntry {
    provider: String,
    model: String,
    // Kept as raw JSON so numbers beyond f64 range reach validation.
    input_price: Value,
    output_price: Value,
    updated_at: String,
}

fn normalize_price(field: &str, value: &Value) -> Result<f64, String> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(format!("{field} is {}, not a price", json_kind(other))),
    };
    let price: f64 = text
        .parse()
        .map_err(|_| format!("{field} {value} is not numeric"))?;
    if !price.is_finite() {
        return Err(format!("{field} {value} is not finite"));
    }
    if price < 0.0 {
        return Err(format!("{field} {price} is negative"));
    }
    Ok(price)
}

/// Decode a catalog body into sorted, normalized entries.
///
/// Any invalid element fails the whole document.
pub(crate) fn decode_catalog(body: &str) -> Result<Vec<ModelEntry>, CatalogError> {
    let document: Value = serde_json::from_str(body).map_err(MalformedCatalog::InvalidJson)?;

    // One extra decode for a double-encoded body, no more.
    let document = match document {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(MalformedCatalog::InvalidInnerJson)?
        }
        other => other,
    };

    let items = match document {
        Value::Array(items) => items,
        other => return Err(MalformedCatalog::NotAnArray(json_kind(&other)).into()),
    };

    let mut entries = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            normalize_entry(item).map_err(|reason| CatalogError::InvalidEntry { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_entries(&mut entries);
    Ok(entries)
}

fn normalize_entry(item: Value) -> Result<ModelEntry, String> {
    let raw: RawEntry = serde_json::from_value(item).map_err(|e| e.to_string())?;

    if raw.provider.is_empty() {
        return Err("provider is empty".to_string());
    }
    if raw.model.is_empty() {
        return Err("model is empty".to_string());
    }

    Ok(ModelEntry {
        input_price_per_million: normalize_price("input_price", &raw.input_price)?,
        output_price_per_million: normalize_price("output_price", &raw.output_price)?,
        provider: raw.provider,
        model: raw.model,
        updated_at: raw.updated_at,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
