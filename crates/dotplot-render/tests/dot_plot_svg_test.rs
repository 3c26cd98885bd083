use dotplot_core::{RawItem, SignColorClassifier, parse_items};
use dotplot_render::model::DotPlotLayout;
use dotplot_render::svg::{SvgRenderOptions, render_dot_plot_svg};
use dotplot_render::{LayoutOptions, layout_dot_plot};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture_layout(name: &str, width: f64) -> DotPlotLayout {
    let path = workspace_root().join("fixtures").join("dotplot").join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    let items = parse_items(&text).expect("items");
    layout_dot_plot(&items, width, &SignColorClassifier, &LayoutOptions::default())
        .expect("layout ok")
}

/// Body of the first `<g class="{class}">` group.
fn group<'a>(svg: &'a str, class: &str) -> &'a str {
    let open = format!(r#"<g class="{class}">"#);
    let start = svg.find(&open).expect("group present") + open.len();
    let len = svg[start..].find("</g>").expect("group closed");
    &svg[start..start + len]
}

#[test]
fn svg_has_one_primitive_per_segment_and_dot() {
    let layout = fixture_layout("basic.json", 800.0);
    let svg = render_dot_plot_svg(&layout, &SvgRenderOptions::default()).unwrap();
    let visible = layout.tracks.len();
    assert_eq!(visible, 4);

    for class in ["tracks-low-mid", "tracks-mid-high"] {
        assert_eq!(group(&svg, class).matches("<line").count(), visible);
    }
    for class in ["dots-low", "dots-mid", "dots-high"] {
        assert_eq!(group(&svg, class).matches("<circle").count(), visible);
    }
    assert_eq!(svg.matches("<circle").count(), visible * 3);
}

#[test]
fn svg_groups_follow_draw_order() {
    let layout = fixture_layout("basic.json", 800.0);
    let svg = render_dot_plot_svg(&layout, &SvgRenderOptions::default()).unwrap();
    let order = [
        "x-axis-grid",
        "y-axis-label",
        "tracks-low-mid",
        "tracks-mid-high",
        "dots-low",
        "dots-mid",
        "dots-high",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|c| svg.find(&format!(r#"class="{c}""#)).expect("group present"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn svg_root_covers_outer_box_and_translates_plot() {
    let items = vec![RawItem::with_bounds("A", -2.0, 4.0), RawItem::with_bounds("B", 1.0, 2.0)];
    let layout =
        layout_dot_plot(&items, 600.0, &SignColorClassifier, &LayoutOptions::default()).unwrap();
    let svg = render_dot_plot_svg(&layout, &SvgRenderOptions::default()).unwrap();

    // 2 rows * 50 - 60 = 40px plot height, plus 30px top and bottom margins.
    assert!(svg.starts_with(r#"<svg id="dotplot""#));
    assert!(svg.contains(r#"width="600" height="100" viewBox="0 0 600 100""#));
    // One column label at 12px: 0.6 * 12 = 7.2px, plus 20px padding.
    assert!(svg.contains(r#"<g transform="translate(27.2,30)">"#));
    assert!(svg.ends_with("</g></svg>\n"));
}

#[test]
fn labels_are_escaped() {
    let layout = fixture_layout("labels.json", 500.0);
    let svg = render_dot_plot_svg(&layout, &SvgRenderOptions::default()).unwrap();
    let labels = group(&svg, "y-axis-label");
    assert!(labels.contains("R&amp;D &lt;core&gt;"));
    assert!(labels.contains("&quot;Quoted&quot;"));
    assert!(!svg.contains("<core>"));
}

#[test]
fn options_set_id_and_background() {
    let layout = fixture_layout("labels.json", 500.0);
    let svg = render_dot_plot_svg(
        &layout,
        &SvgRenderOptions {
            diagram_id: Some("quarter 3".to_string()),
            background: Some("white".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(svg.starts_with(r#"<svg id="quarter-3""#));
    assert!(svg.contains(r#"style="background-color: white;""#));
}

#[test]
fn rendering_is_deterministic() {
    let a = render_dot_plot_svg(&fixture_layout("basic.json", 700.0), &SvgRenderOptions::default())
        .unwrap();
    let b = render_dot_plot_svg(&fixture_layout("basic.json", 700.0), &SvgRenderOptions::default())
        .unwrap();
    assert_eq!(a, b);
}
