//! Serializable scene produced by layout.
//!
//! All coordinates of tracks and drawables are relative to the plot area, whose origin sits at
//! `(plan.margin_left, plan.margin_top)` inside the outer `width` x `height` box.

use crate::plan::{GlobalExtent, LayoutPlan};
use dotplot_core::ColorToken;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: String,
    pub token: ColorToken,
}

/// Geometry of one visible track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub name: String,
    #[serde(rename = "segmentLowMid")]
    pub segment_low_mid: Segment,
    #[serde(rename = "segmentMidHigh")]
    pub segment_mid_high: Segment,
    #[serde(rename = "dotLow")]
    pub dot_low: Dot,
    #[serde(rename = "dotMid")]
    pub dot_mid: Dot,
    #[serde(rename = "dotHigh")]
    pub dot_high: Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    /// Pixel position along the axis, including the half-pixel crisp-edge offset.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotLineData {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotCircleData {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotTextData {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dy: String,
    pub fill: String,
    #[serde(rename = "fontSize")]
    pub font_size: f64,
    #[serde(rename = "textAnchor")]
    pub text_anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotPathData {
    pub path: String,
    #[serde(default)]
    pub fill: Option<String>,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

/// One group of primitives. Later groups paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DotPlotDrawableElem {
    #[serde(rename = "line")]
    Line {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<DotPlotLineData>,
    },
    #[serde(rename = "circle")]
    Circle {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<DotPlotCircleData>,
    },
    #[serde(rename = "text")]
    Text {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<DotPlotTextData>,
    },
    #[serde(rename = "path")]
    Path {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<DotPlotPathData>,
    },
}

impl DotPlotDrawableElem {
    pub fn group_texts(&self) -> &[String] {
        match self {
            DotPlotDrawableElem::Line { group_texts, .. }
            | DotPlotDrawableElem::Circle { group_texts, .. }
            | DotPlotDrawableElem::Text { group_texts, .. }
            | DotPlotDrawableElem::Path { group_texts, .. } => group_texts,
        }
    }

    /// Dash-joined group names, used as the SVG class.
    pub fn group_class(&self) -> String {
        self.group_texts().join("-")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotLayout {
    /// Outer width including margins.
    pub width: f64,
    /// Outer height including margins.
    pub height: f64,
    pub plan: LayoutPlan,
    pub extent: GlobalExtent,
    /// X domain after nice rounding.
    #[serde(rename = "xDomain")]
    pub x_domain: (f64, f64),
    #[serde(rename = "xTicks")]
    pub x_ticks: Vec<AxisTick>,
    #[serde(rename = "yTicks")]
    pub y_ticks: Vec<AxisTick>,
    pub tracks: Vec<TrackGeometry>,
    #[serde(default)]
    pub drawables: Vec<DotPlotDrawableElem>,
}
