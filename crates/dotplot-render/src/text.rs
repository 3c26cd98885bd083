use crate::Result;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

mod probe;

pub use probe::{MeasurementHost, ProbeBox, ProbeTextMeasurer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { font_size: 12.0 }
    }
}

impl TextStyle {
    pub fn with_font_size(font_size: f64) -> Self {
        Self { font_size }
    }

    /// CSS `font-size` value, e.g. `12px`.
    pub fn css_font_size(&self) -> String {
        format!("{}px", self.font_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures rendered text. Host-backed implementations may fail; the failure aborts the
/// current layout pass.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics>;
}

/// Font-free measurer: every display column is `font_size * char_width_factor` wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    /// Splits on `\n`, dropping a trailing `\r` per line. Always yields at least one line.
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n')
            .map(|s| s.trim_end_matches('\r'))
            .collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics> {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let mut max_cols = 0usize;
        for line in &lines {
            max_cols = max_cols.max(line.width());
        }

        let width = max_cols as f64 * font_size * char_width_factor;
        let height = lines.len() as f64 * font_size * line_height_factor;
        Ok(TextMetrics {
            width,
            height,
            line_count: lines.len(),
        })
    }
}
