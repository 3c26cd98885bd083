use crate::Result;
use crate::model::{DotPlotDrawableElem, DotPlotLayout};
use std::fmt::Write as _;

mod util;

use util::{escape_xml, escape_xml_into, fmt, sanitize_svg_id, write_attr};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`; sanitized before use.
    pub diagram_id: Option<String>,
    /// Optional CSS background color for the root element.
    pub background: Option<String>,
    /// Font family applied to all axis text.
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: None,
            font_family: "sans-serif".to_string(),
        }
    }
}

fn write_group_open(out: &mut String, elem: &DotPlotDrawableElem) {
    let _ = write!(
        out,
        r#"<g class="{}">"#,
        escape_xml(&elem.group_class())
    );
}

fn write_elem(out: &mut String, elem: &DotPlotDrawableElem) {
    write_group_open(out, elem);
    match elem {
        DotPlotDrawableElem::Line { data, .. } => {
            for l in data {
                out.push_str("<line");
                write_attr(out, "x1", l.x1);
                write_attr(out, "y1", l.y1);
                write_attr(out, "x2", l.x2);
                write_attr(out, "y2", l.y2);
                out.push_str(r#" stroke=""#);
                escape_xml_into(out, &l.stroke);
                out.push('"');
                write_attr(out, "stroke-width", l.stroke_width);
                out.push_str("/>");
            }
        }
        DotPlotDrawableElem::Circle { data, .. } => {
            for c in data {
                out.push_str("<circle");
                write_attr(out, "cx", c.cx);
                write_attr(out, "cy", c.cy);
                write_attr(out, "r", c.r);
                out.push_str(r#" fill=""#);
                escape_xml_into(out, &c.fill);
                out.push_str(r#""/>"#);
            }
        }
        DotPlotDrawableElem::Text { data, .. } => {
            for t in data {
                out.push_str("<text");
                write_attr(out, "x", t.x);
                write_attr(out, "y", t.y);
                let _ = write!(
                    out,
                    r#" dy="{dy}" fill="{fill}" font-size="{size}" text-anchor="{anchor}">"#,
                    dy = escape_xml(&t.dy),
                    fill = escape_xml(&t.fill),
                    size = fmt(t.font_size),
                    anchor = escape_xml(&t.text_anchor),
                );
                escape_xml_into(out, &t.text);
                out.push_str("</text>");
            }
        }
        DotPlotDrawableElem::Path { data, .. } => {
            for p in data {
                let _ = write!(
                    out,
                    r#"<path d="{d}" fill="{fill}" stroke="{stroke}""#,
                    d = escape_xml(&p.path),
                    fill = escape_xml(p.fill.as_deref().unwrap_or("none")),
                    stroke = escape_xml(&p.stroke),
                );
                write_attr(out, "stroke-width", p.stroke_width);
                out.push_str("/>");
            }
        }
    }
    out.push_str("</g>");
}

/// Writes a standalone SVG document for a laid-out dot plot.
///
/// Drawables are emitted in layout order inside one group translated to the plot origin, so
/// dots paint over segments and segments over the grid.
pub fn render_dot_plot_svg(layout: &DotPlotLayout, options: &SvgRenderOptions) -> Result<String> {
    let id = sanitize_svg_id(options.diagram_id.as_deref().unwrap_or("dotplot"));
    let width = layout.width.max(0.0);
    let height = layout.height.max(0.0);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}""#,
        id = escape_xml(&id),
        w = fmt(width),
        h = fmt(height),
        font = escape_xml(&options.font_family),
    );
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(&mut out, r#" style="background-color: {};""#, escape_xml(bg));
    }
    out.push_str(r#" role="graphics-document document" aria-roledescription="dotplot">"#);

    let _ = write!(
        &mut out,
        r#"<g transform="translate({x},{y})">"#,
        x = fmt(layout.plan.margin_left),
        y = fmt(layout.plan.margin_top),
    );
    for elem in &layout.drawables {
        write_elem(&mut out, elem);
    }
    out.push_str("</g></svg>\n");
    Ok(out)
}
