use serde::{Deserialize, Serialize};

/// Three-way sign classification used for tracks and dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Negative,
    Neutral,
    Positive,
}

impl ColorToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Negative => "negative",
            ColorToken::Neutral => "neutral",
            ColorToken::Positive => "positive",
        }
    }

    /// Track color for an interval: negative only when both bounds are below zero, positive
    /// only when both are above it.
    pub fn for_interval(low: f64, high: f64) -> Self {
        if low < 0.0 && high < 0.0 {
            ColorToken::Negative
        } else if low > 0.0 && high > 0.0 {
            ColorToken::Positive
        } else {
            ColorToken::Neutral
        }
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a single signed value to a display token. Implementations must be total.
pub trait ColorClassifier {
    fn color_for(&self, value: f64) -> ColorToken;
}

impl<F> ColorClassifier for F
where
    F: Fn(f64) -> ColorToken,
{
    fn color_for(&self, value: f64) -> ColorToken {
        self(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignColorClassifier;

impl ColorClassifier for SignColorClassifier {
    fn color_for(&self, value: f64) -> ColorToken {
        if value < 0.0 {
            ColorToken::Negative
        } else if value > 0.0 {
            ColorToken::Positive
        } else {
            // zero and NaN
            ColorToken::Neutral
        }
    }
}

/// CSS colors for each token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub negative: String,
    pub neutral: String,
    pub positive: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            negative: "#f00".to_string(),
            neutral: "#a0a0a0".to_string(),
            positive: "#239126".to_string(),
        }
    }
}

impl ColorPalette {
    pub fn css(&self, token: ColorToken) -> &str {
        match token {
            ColorToken::Negative => &self.negative,
            ColorToken::Neutral => &self.neutral,
            ColorToken::Positive => &self.positive,
        }
    }
}
