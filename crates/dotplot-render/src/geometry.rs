use crate::config::DotPlotConfig;
use crate::model::{
    AxisTick, Dot, DotPlotCircleData, DotPlotDrawableElem, DotPlotLineData, DotPlotPathData,
    DotPlotTextData, Segment, TrackGeometry,
};
use crate::plan::{GlobalExtent, LayoutPlan};
use crate::scale::{BandScale, LinearScale, format_tick};
use dotplot_core::geom::{Point, point, vector};
use dotplot_core::{ColorToken, NormalizedRecord};

/// Crisp-edge offset for 1px axis strokes.
const AXIS_OFFSET: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct DotPlotScales {
    pub x: LinearScale,
    pub y: BandScale,
}

#[derive(Debug, Clone)]
pub struct DotPlotGeometry {
    pub scales: DotPlotScales,
    pub tracks: Vec<TrackGeometry>,
}

pub fn build_scales(
    records: &[NormalizedRecord],
    extent: &GlobalExtent,
    plan: &LayoutPlan,
    config: &DotPlotConfig,
) -> DotPlotScales {
    let x = LinearScale::new((extent.min, extent.max), (0.0, plan.width)).nice(config.tick_count);
    let y = BandScale::new(records.iter().map(|r| r.name.as_str()), (0.0, plan.height))
        .padding(1.0);
    DotPlotScales { x, y }
}

fn dot(center: Point, config: &DotPlotConfig, token: ColorToken) -> Dot {
    Dot {
        x: center.x,
        y: center.y,
        r: config.dot_radius,
        fill: config.palette.css(token).to_string(),
        token,
    }
}

fn track_geometry(
    record: &NormalizedRecord,
    scales: &DotPlotScales,
    config: &DotPlotConfig,
) -> Option<TrackGeometry> {
    if !record.is_visible() {
        return None;
    }
    let y = scales.y.position(&record.name)? + scales.y.bandwidth() / 2.0;
    let low = point(scales.x.scale(record.low), y);
    let mid = point(scales.x.scale(record.mid), y);
    let high = point(scales.x.scale(record.high), y);

    let stroke = config.palette.css(record.track_color).to_string();
    let segment = |from: Point, to: Point| Segment {
        x1: from.x,
        x2: to.x,
        y,
        stroke: stroke.clone(),
        stroke_width: config.stroke_width,
    };

    Some(TrackGeometry {
        name: record.name.clone(),
        segment_low_mid: segment(low, mid),
        segment_mid_high: segment(mid, high),
        dot_low: dot(low, config, record.dot_colors.low),
        dot_mid: dot(mid, config, record.dot_colors.mid),
        dot_high: dot(high, config, record.dot_colors.high),
    })
}

/// Builds both scales and the geometry of every record with a positive span. Zero-width and
/// inverted intervals still occupy their band slot but draw nothing.
pub fn build_geometry(
    records: &[NormalizedRecord],
    extent: &GlobalExtent,
    plan: &LayoutPlan,
    config: &DotPlotConfig,
) -> DotPlotGeometry {
    let scales = build_scales(records, extent, plan, config);
    let tracks: Vec<TrackGeometry> = records
        .iter()
        .filter_map(|r| track_geometry(r, &scales, config))
        .collect();
    tracing::debug!(
        records = records.len(),
        rows = scales.y.len(),
        tracks = tracks.len(),
        x_domain = ?scales.x.domain(),
        "built dot plot geometry"
    );
    DotPlotGeometry { scales, tracks }
}

pub fn x_axis_ticks(scales: &DotPlotScales, config: &DotPlotConfig) -> Vec<AxisTick> {
    scales
        .x
        .ticks(config.tick_count)
        .into_iter()
        .map(|v| AxisTick {
            label: format_tick(v),
            position: scales.x.scale(v) + AXIS_OFFSET,
        })
        .collect()
}

pub fn y_axis_ticks(scales: &DotPlotScales) -> Vec<AxisTick> {
    let half_band = scales.y.bandwidth() / 2.0;
    scales
        .y
        .domain()
        .filter_map(|name| {
            let pos = scales.y.position(name)?;
            Some(AxisTick {
                label: name.to_string(),
                position: pos + half_band + AXIS_OFFSET,
            })
        })
        .collect()
}

/// Top axis whose ticks extend down across the plot as grid lines.
fn x_axis_drawables(
    ticks: &[AxisTick],
    plan: &LayoutPlan,
    config: &DotPlotConfig,
) -> Vec<DotPlotDrawableElem> {
    let grid_len = plan.height;
    let label_offset = vector(0.0, -config.tick_padding);
    let domain = format!(
        "M{r0},{h}V{o}H{r1}V{h}",
        r0 = format_tick(AXIS_OFFSET),
        r1 = format_tick(plan.width + AXIS_OFFSET),
        o = format_tick(AXIS_OFFSET),
        h = format_tick(grid_len),
    );

    vec![
        DotPlotDrawableElem::Path {
            group_texts: vec!["x-axis".to_string(), "domain".to_string()],
            data: vec![DotPlotPathData {
                path: domain,
                fill: None,
                stroke: config.axis_color.clone(),
                stroke_width: 1.0,
            }],
        },
        DotPlotDrawableElem::Line {
            group_texts: vec!["x-axis".to_string(), "grid".to_string()],
            data: ticks
                .iter()
                .map(|t| DotPlotLineData {
                    x1: t.position,
                    y1: 0.0,
                    x2: t.position,
                    y2: grid_len,
                    stroke: config.axis_color.clone(),
                    stroke_width: 1.0,
                })
                .collect(),
        },
        DotPlotDrawableElem::Text {
            group_texts: vec!["x-axis".to_string(), "label".to_string()],
            data: ticks
                .iter()
                .map(|t| {
                    let at = point(t.position, 0.0) + label_offset;
                    DotPlotTextData {
                        text: t.label.clone(),
                        x: at.x,
                        y: at.y,
                        dy: "0em".to_string(),
                        fill: config.axis_color.clone(),
                        font_size: config.axis_font_size,
                        text_anchor: "middle".to_string(),
                    }
                })
                .collect(),
        },
    ]
}

/// Left axis carrying the item names.
fn y_axis_drawables(
    ticks: &[AxisTick],
    plan: &LayoutPlan,
    config: &DotPlotConfig,
) -> Vec<DotPlotDrawableElem> {
    let tick_len = config.y_tick_size;
    let label_offset = vector(-(tick_len + config.tick_padding), 0.0);
    let domain = format!(
        "M{t},{r0}H{o}V{r1}H{t}",
        t = format_tick(-tick_len),
        r0 = format_tick(AXIS_OFFSET),
        r1 = format_tick(plan.height + AXIS_OFFSET),
        o = format_tick(AXIS_OFFSET),
    );

    vec![
        DotPlotDrawableElem::Path {
            group_texts: vec!["y-axis".to_string(), "domain".to_string()],
            data: vec![DotPlotPathData {
                path: domain,
                fill: None,
                stroke: config.axis_color.clone(),
                stroke_width: 1.0,
            }],
        },
        DotPlotDrawableElem::Line {
            group_texts: vec!["y-axis".to_string(), "ticks".to_string()],
            data: ticks
                .iter()
                .map(|t| DotPlotLineData {
                    x1: 0.0,
                    y1: t.position,
                    x2: -tick_len,
                    y2: t.position,
                    stroke: config.axis_color.clone(),
                    stroke_width: 1.0,
                })
                .collect(),
        },
        DotPlotDrawableElem::Text {
            group_texts: vec!["y-axis".to_string(), "label".to_string()],
            data: ticks
                .iter()
                .map(|t| {
                    let at = point(0.0, t.position) + label_offset;
                    DotPlotTextData {
                        text: t.label.clone(),
                        x: at.x,
                        y: at.y,
                        dy: "0.32em".to_string(),
                        fill: config.axis_color.clone(),
                        font_size: config.label_font_size,
                        text_anchor: "end".to_string(),
                    }
                })
                .collect(),
        },
    ]
}

fn segment_line(s: &Segment) -> DotPlotLineData {
    DotPlotLineData {
        x1: s.x1,
        y1: s.y,
        x2: s.x2,
        y2: s.y,
        stroke: s.stroke.clone(),
        stroke_width: s.stroke_width,
    }
}

fn dot_circle(d: &Dot) -> DotPlotCircleData {
    DotPlotCircleData {
        cx: d.x,
        cy: d.y,
        r: d.r,
        fill: d.fill.clone(),
    }
}

fn track_lines(
    tracks: &[TrackGeometry],
    kind: &str,
    pick: fn(&TrackGeometry) -> &Segment,
) -> DotPlotDrawableElem {
    DotPlotDrawableElem::Line {
        group_texts: vec!["tracks".to_string(), kind.to_string()],
        data: tracks.iter().map(|t| segment_line(pick(t))).collect(),
    }
}

fn track_dots(
    tracks: &[TrackGeometry],
    kind: &str,
    pick: fn(&TrackGeometry) -> &Dot,
) -> DotPlotDrawableElem {
    DotPlotDrawableElem::Circle {
        group_texts: vec!["dots".to_string(), kind.to_string()],
        data: tracks.iter().map(|t| dot_circle(pick(t))).collect(),
    }
}

/// Every primitive of the chart in paint order: x axis and grid, y axis, all low-mid segments,
/// all mid-high segments, then low, mid and high dots.
pub fn drawables(
    geometry: &DotPlotGeometry,
    x_ticks: &[AxisTick],
    y_ticks: &[AxisTick],
    plan: &LayoutPlan,
    config: &DotPlotConfig,
) -> Vec<DotPlotDrawableElem> {
    let tracks = &geometry.tracks;
    let mut out = Vec::with_capacity(11);
    out.extend(x_axis_drawables(x_ticks, plan, config));
    out.extend(y_axis_drawables(y_ticks, plan, config));

    out.push(track_lines(tracks, "low-mid", |t| &t.segment_low_mid));
    out.push(track_lines(tracks, "mid-high", |t| &t.segment_mid_high));
    out.push(track_dots(tracks, "low", |t| &t.dot_low));
    out.push(track_dots(tracks, "mid", |t| &t.dot_mid));
    out.push(track_dots(tracks, "high", |t| &t.dot_high));
    out
}
