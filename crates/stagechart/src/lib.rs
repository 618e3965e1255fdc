#![forbid(unsafe_code)]

//! `stagechart` renders a vertical flowchart of pipeline stages, headlessly.
//!
//! # Features
//!
//! - `render`: enable SVG rendering (`stagechart::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use stagechart_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use stagechart_render::canvas::{Canvas, RecordingCanvas, Scene};
    pub use stagechart_render::figure::{AxesRect, Figure};
    pub use stagechart_render::svg::{SvgCanvas, SvgRenderOptions};
    pub use stagechart_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use stagechart_render::{RenderOptions, render_diagram};

    use stagechart_core::DiagramConfig;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] stagechart_core::Error),
        #[error(transparent)]
        Render(#[from] stagechart_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Turns a user-supplied name into a root `id` for the SVG.
    ///
    /// Runs of anything other than ASCII alphanumerics, `_` and `.` become one `-`. Ids that would
    /// not start with a letter get a `stagechart-` prefix; an empty result becomes `stagechart`.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let mut id = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.') {
                id.push(ch);
            } else if !id.is_empty() && !id.ends_with('-') {
                id.push('-');
            }
        }
        let id = id.trim_end_matches('-');
        match id.chars().next() {
            None => "stagechart".to_string(),
            Some(first) if first.is_ascii_alphabetic() => id.to_string(),
            Some(_) => format!("stagechart-{id}"),
        }
    }

    /// Records the diagram into a backend-independent [`Scene`].
    pub fn render_scene(config: &DiagramConfig, options: &RenderOptions) -> Result<Scene> {
        Ok(render_diagram(config, RecordingCanvas::new(), options)?)
    }

    pub fn render_svg(
        config: &DiagramConfig,
        options: &RenderOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        Ok(render_diagram(
            config,
            SvgCanvas::new(svg_options.clone()),
            options,
        )?)
    }

    /// Bundles a diagram with its render options.
    #[derive(Clone)]
    pub struct HeadlessRenderer {
        pub config: DiagramConfig,
        pub render: RenderOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                config: DiagramConfig::predictive_maintenance(),
                render: RenderOptions::default(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new(config: DiagramConfig) -> Self {
            Self {
                config,
                ..Self::default()
            }
        }

        pub fn layout(&self) -> Result<stagechart_core::DiagramLayout> {
            Ok(stagechart_core::layout_diagram(&self.config)?)
        }

        pub fn render_scene(&self) -> Result<Scene> {
            render_scene(&self.config, &self.render)
        }

        pub fn render_svg(&self) -> Result<String> {
            render_svg(&self.config, &self.render, &self.svg)
        }

        /// Sets the SVG root `id`, sanitized with [`sanitize_svg_id`].
        pub fn with_diagram_id(mut self, raw: &str) -> Self {
            self.svg.diagram_id = Some(sanitize_svg_id(raw));
            self
        }

        #[cfg(feature = "raster")]
        pub fn render_png(&self, raster: &raster::RasterOptions) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg()?, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg(&self, raster: &raster::RasterOptions) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg()?, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf(&self) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg()?)
        }
    }

}
