use crate::color::{ColorClassifier, ColorToken};
use crate::model::{DotColors, NormalizedRecord, RawItem};
use crate::{Error, Result};
use serde_json::Value;

pub fn normalize_item(item: &RawItem, classifier: &dyn ColorClassifier) -> NormalizedRecord {
    let low = item.lower_bound().unwrap_or(0.0);
    let high = item.upper_bound().unwrap_or(0.0);
    let mid = (low + high) / 2.0;

    NormalizedRecord {
        name: item.name.clone(),
        low,
        mid,
        high,
        track_color: ColorToken::for_interval(low, high),
        dot_colors: DotColors {
            low: classifier.color_for(low),
            mid: classifier.color_for(mid),
            high: classifier.color_for(high),
        },
    }
}

/// Maps raw items to canonical records, preserving input order. Never fails.
pub fn normalize(items: &[RawItem], classifier: &dyn ColorClassifier) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = items
        .iter()
        .map(|item| normalize_item(item, classifier))
        .collect();
    tracing::debug!(
        items = items.len(),
        visible = records.iter().filter(|r| r.is_visible()).count(),
        "normalized dot plot items"
    );
    records
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses a JSON array of raw items.
///
/// Only the outer shape is strict. Entries that are not objects are skipped, and numeric
/// fields inside entries are read leniently.
pub fn parse_items(text: &str) -> Result<Vec<RawItem>> {
    let value: Value = serde_json::from_str(text)?;
    let found = json_type_name(&value);
    let Value::Array(entries) = value else {
        return Err(Error::NotAnArray { found });
    };

    let mut out = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::debug!(index = idx, "skipping non-object item entry");
            continue;
        }
        out.push(serde_json::from_value(entry)?);
    }
    Ok(out)
}
