use dotplot_core::ColorPalette;

/// Largest `tickCount` accepted from an effective config.
pub const MAX_TICK_COUNT: usize = 1000;
use serde_json::Value;

/// Fixed sizes and colors of a dot plot. Everything except the left margin, which follows the
/// widest label, comes from here.
#[derive(Debug, Clone, PartialEq)]
pub struct DotPlotConfig {
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    /// Gap between the widest label and the plot area.
    pub label_padding: f64,
    pub row_height: f64,
    pub label_font_size: f64,
    pub axis_font_size: f64,
    pub stroke_width: f64,
    pub dot_radius: f64,
    pub tick_count: usize,
    pub y_tick_size: f64,
    pub tick_padding: f64,
    pub axis_color: String,
    pub palette: ColorPalette,
}

impl Default for DotPlotConfig {
    fn default() -> Self {
        Self {
            margin_top: 30.0,
            margin_right: 30.0,
            margin_bottom: 30.0,
            label_padding: 20.0,
            row_height: 50.0,
            label_font_size: 12.0,
            axis_font_size: 10.0,
            stroke_width: 4.0,
            dot_radius: 5.0,
            tick_count: 10,
            y_tick_size: 6.0,
            tick_padding: 3.0,
            axis_color: "currentColor".to_string(),
            palette: ColorPalette::default(),
        }
    }
}

fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
}

fn config_value<'a>(cfg: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    config_value(cfg, path)
        .and_then(json_f64)
        .filter(|v| v.is_finite())
}

fn config_non_negative(cfg: &Value, path: &[&str]) -> Option<f64> {
    config_f64(cfg, path).filter(|v| *v >= 0.0)
}

fn config_string(cfg: &Value, path: &[&str]) -> Option<String> {
    config_value(cfg, path)
        .and_then(Value::as_str)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

impl DotPlotConfig {
    /// Reads overrides from the `dotPlot` section of an effective config. Missing, negative or
    /// wrongly typed values keep their defaults.
    pub fn from_effective_config(effective_config: &Value) -> Self {
        let base = Self::default();
        let Some(section) = effective_config.get("dotPlot") else {
            return base;
        };
        if !section.is_object() {
            return base;
        }

        let cfg = effective_config;
        let palette = ColorPalette {
            negative: config_string(cfg, &["dotPlot", "palette", "negative"])
                .unwrap_or(base.palette.negative.clone()),
            neutral: config_string(cfg, &["dotPlot", "palette", "neutral"])
                .unwrap_or(base.palette.neutral.clone()),
            positive: config_string(cfg, &["dotPlot", "palette", "positive"])
                .unwrap_or(base.palette.positive.clone()),
        };

        Self {
            margin_top: config_non_negative(cfg, &["dotPlot", "marginTop"])
                .unwrap_or(base.margin_top),
            margin_right: config_non_negative(cfg, &["dotPlot", "marginRight"])
                .unwrap_or(base.margin_right),
            margin_bottom: config_non_negative(cfg, &["dotPlot", "marginBottom"])
                .unwrap_or(base.margin_bottom),
            label_padding: config_non_negative(cfg, &["dotPlot", "labelPadding"])
                .unwrap_or(base.label_padding),
            row_height: config_non_negative(cfg, &["dotPlot", "rowHeight"])
                .unwrap_or(base.row_height),
            label_font_size: config_f64(cfg, &["dotPlot", "labelFontSize"])
                .filter(|v| *v > 0.0)
                .unwrap_or(base.label_font_size),
            axis_font_size: config_f64(cfg, &["dotPlot", "axisFontSize"])
                .filter(|v| *v > 0.0)
                .unwrap_or(base.axis_font_size),
            stroke_width: config_non_negative(cfg, &["dotPlot", "strokeWidth"])
                .unwrap_or(base.stroke_width),
            dot_radius: config_non_negative(cfg, &["dotPlot", "dotRadius"])
                .unwrap_or(base.dot_radius),
            tick_count: config_f64(cfg, &["dotPlot", "tickCount"])
                .filter(|v| (1.0..=MAX_TICK_COUNT as f64).contains(v))
                .map(|v| v as usize)
                .unwrap_or(base.tick_count),
            y_tick_size: config_non_negative(cfg, &["dotPlot", "yTickSize"])
                .unwrap_or(base.y_tick_size),
            tick_padding: config_non_negative(cfg, &["dotPlot", "tickPadding"])
                .unwrap_or(base.tick_padding),
            axis_color: config_string(cfg, &["dotPlot", "axisColor"]).unwrap_or(base.axis_color),
            palette,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_section_keeps_defaults() {
        assert_eq!(
            DotPlotConfig::from_effective_config(&json!({})),
            DotPlotConfig::default()
        );
        assert_eq!(
            DotPlotConfig::from_effective_config(&json!({"dotPlot": 3})),
            DotPlotConfig::default()
        );
    }

    #[test]
    fn overrides_are_read_from_camel_case_keys() {
        let cfg = DotPlotConfig::from_effective_config(&json!({
            "dotPlot": {
                "rowHeight": 40,
                "labelPadding": 12.5,
                "tickCount": 5,
                "palette": { "negative": "crimson" }
            }
        }));
        assert_eq!(cfg.row_height, 40.0);
        assert_eq!(cfg.label_padding, 12.5);
        assert_eq!(cfg.tick_count, 5);
        assert_eq!(cfg.palette.negative, "crimson");
        assert_eq!(cfg.palette.positive, "#239126");
        assert_eq!(cfg.margin_top, 30.0);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = DotPlotConfig::from_effective_config(&json!({
            "dotPlot": {
                "rowHeight": -5,
                "labelFontSize": 0,
                "strokeWidth": "wide",
                "tickCount": 0,
                "axisColor": "   "
            }
        }));
        assert_eq!(cfg, DotPlotConfig::default());
    }

    #[test]
    fn tick_count_is_capped() {
        let cfg = DotPlotConfig::from_effective_config(&json!({
            "dotPlot": { "tickCount": 1e12 }
        }));
        assert_eq!(cfg.tick_count, 10);

        let cfg = DotPlotConfig::from_effective_config(&json!({
            "dotPlot": { "tickCount": 1000 }
        }));
        assert_eq!(cfg.tick_count, 1000);
    }
}
