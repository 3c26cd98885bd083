use crate::config::DotPlotConfig;
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result};
use dotplot_core::NormalizedRecord;
use serde::{Deserialize, Serialize};

/// Value extent across all records. Always contains zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for GlobalExtent {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    #[serde(rename = "marginLeft")]
    pub margin_left: f64,
    #[serde(rename = "marginTop")]
    pub margin_top: f64,
    #[serde(rename = "marginRight")]
    pub margin_right: f64,
    #[serde(rename = "marginBottom")]
    pub margin_bottom: f64,
    /// Plot area width, excluding margins.
    pub width: f64,
    /// Plot area height, excluding margins.
    pub height: f64,
    #[serde(rename = "labelWidth")]
    pub label_width: f64,
}

impl LayoutPlan {
    pub fn outer_width(&self) -> f64 {
        self.width + self.margin_left + self.margin_right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margin_top + self.margin_bottom
    }
}

pub fn global_extent(records: &[NormalizedRecord]) -> GlobalExtent {
    records
        .iter()
        .fold(GlobalExtent::default(), |acc, r| GlobalExtent {
            min: acc.min.min(r.low),
            max: acc.max.max(r.high),
        })
}

/// Longest name by character count; the earliest one wins a tie.
pub fn longest_label(records: &[NormalizedRecord]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for r in records {
        let len = r.name.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((r.name.as_str(), len));
        }
    }
    best.map(|(name, _)| name)
}

/// Computes the value extent and the chart box for `records` inside a container of
/// `container_width` pixels.
///
/// Only the longest label is measured. Character count stands in for rendered width when
/// picking it, which keeps measurement to one probe per pass.
pub fn plan_layout(
    records: &[NormalizedRecord],
    container_width: f64,
    config: &DotPlotConfig,
    measurer: &dyn TextMeasurer,
) -> Result<(GlobalExtent, LayoutPlan)> {
    if !container_width.is_finite() || container_width < 0.0 {
        return Err(Error::InvalidContainerWidth {
            width: container_width,
        });
    }

    let extent = global_extent(records);

    let label_width = match longest_label(records) {
        Some(label) => {
            let style = TextStyle::with_font_size(config.label_font_size);
            let metrics = measurer.measure(label, &style)?;
            tracing::debug!(label, width = metrics.width, "measured longest label");
            metrics.width.max(0.0)
        }
        None => 0.0,
    };

    let margin_left = label_width + config.label_padding;
    let width = container_width - margin_left - config.margin_right;
    let height = (records.len() as f64 * config.row_height
        - config.margin_top
        - config.margin_bottom)
        .max(0.0);

    let plan = LayoutPlan {
        margin_left,
        margin_top: config.margin_top,
        margin_right: config.margin_right,
        margin_bottom: config.margin_bottom,
        width,
        height,
        label_width,
    };
    tracing::debug!(
        records = records.len(),
        min = extent.min,
        max = extent.max,
        width = plan.width,
        height = plan.height,
        "planned dot plot layout"
    );
    Ok((extent, plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use dotplot_core::{RawItem, SignColorClassifier, normalize};

    fn records(items: &[(&str, f64, f64)]) -> Vec<NormalizedRecord> {
        let raw: Vec<RawItem> = items
            .iter()
            .map(|(n, lo, hi)| RawItem::with_bounds(*n, *lo, *hi))
            .collect();
        normalize(&raw, &SignColorClassifier)
    }

    #[test]
    fn extent_is_seeded_at_zero() {
        assert_eq!(
            global_extent(&records(&[("a", 2.0, 5.0), ("b", 1.0, 3.0)])),
            GlobalExtent { min: 0.0, max: 5.0 }
        );
        assert_eq!(
            global_extent(&records(&[("a", -5.0, -1.0)])),
            GlobalExtent {
                min: -5.0,
                max: 0.0
            }
        );
        assert_eq!(global_extent(&[]), GlobalExtent::default());
    }

    #[test]
    fn longest_label_prefers_first_on_ties() {
        let rs = records(&[("ab", 0.0, 1.0), ("xyz", 0.0, 1.0), ("uvw", 0.0, 1.0)]);
        assert_eq!(longest_label(&rs), Some("xyz"));
        assert_eq!(longest_label(&[]), None);
    }

    #[test]
    fn longest_label_counts_characters_not_bytes() {
        let rs = records(&[("ééé", 0.0, 1.0), ("abcd", 0.0, 1.0)]);
        assert_eq!(longest_label(&rs), Some("abcd"));
    }

    #[test]
    fn plan_uses_label_width_and_row_height() {
        let rs = records(&[("A", -2.0, 4.0), ("Bbbb", 1.0, 2.0), ("C", 0.0, 0.0)]);
        let (extent, plan) = plan_layout(
            &rs,
            800.0,
            &DotPlotConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
        .unwrap();
        assert_eq!(extent, GlobalExtent { min: -2.0, max: 4.0 });
        // "Bbbb": 4 columns * 12px * 0.6
        assert!((plan.label_width - 28.8).abs() < 1e-9);
        assert!((plan.margin_left - 48.8).abs() < 1e-9);
        assert!((plan.width - (800.0 - 48.8 - 30.0)).abs() < 1e-9);
        assert_eq!(plan.height, 90.0);
        assert_eq!(plan.outer_height(), 150.0);
        assert!((plan.outer_width() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn empty_plan_skips_measurement_and_clamps_height() {
        struct Panics;
        impl TextMeasurer for Panics {
            fn measure(
                &self,
                _text: &str,
                _style: &TextStyle,
            ) -> Result<crate::text::TextMetrics> {
                panic!("nothing to measure");
            }
        }
        let (extent, plan) = plan_layout(&[], 400.0, &DotPlotConfig::default(), &Panics).unwrap();
        assert_eq!(extent, GlobalExtent::default());
        assert_eq!(plan.label_width, 0.0);
        assert_eq!(plan.margin_left, 20.0);
        assert_eq!(plan.height, 0.0);
    }

    #[test]
    fn measurement_failure_aborts_the_pass() {
        struct Unavailable;
        impl TextMeasurer for Unavailable {
            fn measure(
                &self,
                _text: &str,
                _style: &TextStyle,
            ) -> Result<crate::text::TextMetrics> {
                Err(Error::measurement("host detached"))
            }
        }
        let rs = records(&[("A", -2.0, 4.0), ("B", 1.0, 2.0)]);
        let err =
            plan_layout(&rs, 600.0, &DotPlotConfig::default(), &Unavailable).unwrap_err();
        match err {
            Error::Measurement { message } => assert_eq!(message, "host detached"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_finite_container_width() {
        let err = plan_layout(
            &[],
            f64::NAN,
            &DotPlotConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidContainerWidth { .. }));
    }
}
