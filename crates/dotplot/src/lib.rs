#![forbid(unsafe_code)]

//! `dotplot` draws named value intervals as horizontal dot plots without a browser.
//!
//! Each item becomes one row: a segment from its lower bound through the midpoint to its upper
//! bound, with a dot at each of the three points colored by sign.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`dotplot::render`)

pub use dotplot_core::*;

#[cfg(feature = "render")]
pub mod render {
    use dotplot_core::{ColorClassifier, RawItem, SignColorClassifier};
    use std::sync::Arc;

    pub use dotplot_render::config::DotPlotConfig;
    pub use dotplot_render::model::DotPlotLayout;
    pub use dotplot_render::svg::{SvgRenderOptions, render_dot_plot_svg};
    pub use dotplot_render::text::{
        DeterministicTextMeasurer, MeasurementHost, ProbeBox, ProbeTextMeasurer, TextMeasurer,
        TextStyle,
    };
    pub use dotplot_render::{LayoutOptions, layout_dot_plot, layout_records};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] dotplot_core::Error),
        #[error(transparent)]
        Render(#[from] dotplot_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Lays out `items` with sign-based coloring.
    pub fn layout_items(
        items: &[RawItem],
        container_width: f64,
        options: &LayoutOptions,
    ) -> Result<DotPlotLayout> {
        Ok(layout_dot_plot(
            items,
            container_width,
            &SignColorClassifier,
            options,
        )?)
    }

    /// Parses a JSON array of items and lays it out.
    pub fn layout_json(
        text: &str,
        container_width: f64,
        options: &LayoutOptions,
    ) -> Result<DotPlotLayout> {
        let items = dotplot_core::parse_items(text)?;
        layout_items(&items, container_width, options)
    }

    pub fn render_svg(
        items: &[RawItem],
        container_width: f64,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_items(items, container_width, layout_options)?;
        Ok(render_dot_plot_svg(&layout, svg_options)?)
    }

    /// Bundles the classifier and options used for every render.
    #[derive(Clone)]
    pub struct HeadlessRenderer {
        pub classifier: Arc<dyn ColorClassifier + Send + Sync>,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                classifier: Arc::new(SignColorClassifier),
                layout: LayoutOptions::default(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_classifier(mut self, classifier: Arc<dyn ColorClassifier + Send + Sync>) -> Self {
            self.classifier = classifier;
            self
        }

        pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
            self.layout.text_measurer = measurer;
            self
        }

        pub fn with_config(mut self, config: DotPlotConfig) -> Self {
            self.layout.config = config;
            self
        }

        pub fn with_diagram_id(mut self, diagram_id: impl Into<String>) -> Self {
            self.svg.diagram_id = Some(diagram_id.into());
            self
        }

        pub fn layout(&self, items: &[RawItem], container_width: f64) -> Result<DotPlotLayout> {
            Ok(layout_dot_plot(
                items,
                container_width,
                self.classifier.as_ref(),
                &self.layout,
            )?)
        }

        pub fn render_svg(&self, items: &[RawItem], container_width: f64) -> Result<String> {
            let layout = self.layout(items, container_width)?;
            Ok(render_dot_plot_svg(&layout, &self.svg)?)
        }

        pub fn render_json_svg(&self, text: &str, container_width: f64) -> Result<String> {
            let items = dotplot_core::parse_items(text)?;
            self.render_svg(&items, container_width)
        }
    }

}
