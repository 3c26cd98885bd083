use crate::color::ColorToken;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One named item as supplied by a host view.
///
/// Every numeric field is optional. Absent, `null`, non-numeric and non-finite values all read
/// as `None` and later normalize to `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        rename = "confidentialInternal",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_bounds"
    )]
    pub confidential_internal: Option<RawBounds>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBounds {
    #[serde(
        rename = "lowerBound",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_f64"
    )]
    pub lower_bound: Option<f64>,
    #[serde(
        rename = "upperBound",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_f64"
    )]
    pub upper_bound: Option<f64>,
    /// Reported change for the item. Carried through for hosts; the plotted midpoint is always
    /// the mean of the bounds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_f64"
    )]
    pub changes: Option<f64>,
}

impl RawItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidential_internal: None,
        }
    }

    pub fn with_bounds(name: impl Into<String>, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            name: name.into(),
            confidential_internal: Some(RawBounds {
                lower_bound: Some(lower_bound),
                upper_bound: Some(upper_bound),
                changes: None,
            }),
        }
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.confidential_internal
            .as_ref()
            .and_then(|b| b.lower_bound)
            .filter(|v| v.is_finite())
    }

    pub fn upper_bound(&self) -> Option<f64> {
        self.confidential_internal
            .as_ref()
            .and_then(|b| b.upper_bound)
            .filter(|v| v.is_finite())
    }
}

fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
        .filter(|n| n.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(json_f64))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_bounds<'de, D>(deserializer: D) -> Result<Option<RawBounds>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        Some(v @ Value::Object(_)) => Ok(RawBounds::deserialize(v).ok()),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotColors {
    pub low: ColorToken,
    pub mid: ColorToken,
    pub high: ColorToken,
}

/// Canonical per-item record consumed by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub low: f64,
    pub mid: f64,
    pub high: f64,
    #[serde(rename = "trackColor")]
    pub track_color: ColorToken,
    #[serde(rename = "dotColors")]
    pub dot_colors: DotColors,
}

impl NormalizedRecord {
    /// Width of the interval; tracks are drawn only when this is positive.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_visible(&self) -> bool {
        self.span() > 0.0
    }
}
