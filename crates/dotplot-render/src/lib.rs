#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for bounded-interval dot plots.
//!
//! The pipeline is: normalized records -> [`plan::plan_layout`] -> [`geometry::build_geometry`]
//! -> [`model::DotPlotLayout`] -> [`svg::render_dot_plot_svg`].

pub mod config;
pub mod geometry;
pub mod model;
pub mod plan;
pub mod scale;
pub mod svg;
pub mod text;

use crate::config::DotPlotConfig;
use crate::model::DotPlotLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use dotplot_core::{ColorClassifier, NormalizedRecord, RawItem};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("text measurement failed: {message}")]
    Measurement { message: String },
    #[error("invalid container width: {width}")]
    InvalidContainerWidth { width: f64 },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn measurement(message: impl Into<String>) -> Self {
        Self::Measurement {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: DotPlotConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: DotPlotConfig::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    pub fn with_config(mut self, config: DotPlotConfig) -> Self {
        self.config = config;
        self
    }
}

/// Lays out already normalized records inside a container `container_width` pixels wide.
pub fn layout_records(
    records: &[NormalizedRecord],
    container_width: f64,
    options: &LayoutOptions,
) -> Result<DotPlotLayout> {
    let config = &options.config;
    let (extent, plan) = plan::plan_layout(
        records,
        container_width,
        config,
        options.text_measurer.as_ref(),
    )?;
    let geometry = geometry::build_geometry(records, &extent, &plan, config);
    let x_ticks = geometry::x_axis_ticks(&geometry.scales, config);
    let y_ticks = geometry::y_axis_ticks(&geometry.scales);
    let drawables = geometry::drawables(&geometry, &x_ticks, &y_ticks, &plan, config);

    Ok(DotPlotLayout {
        width: plan.outer_width(),
        height: plan.outer_height(),
        plan,
        extent,
        x_domain: geometry.scales.x.domain(),
        x_ticks,
        y_ticks,
        tracks: geometry.tracks,
        drawables,
    })
}

/// Normalizes `items` with `classifier` and lays them out.
pub fn layout_dot_plot(
    items: &[RawItem],
    container_width: f64,
    classifier: &dyn ColorClassifier,
    options: &LayoutOptions,
) -> Result<DotPlotLayout> {
    let records = dotplot_core::normalize(items, classifier);
    layout_records(&records, container_width, options)
}
