#![forbid(unsafe_code)]

pub mod canvas;
pub mod draw;
pub mod figure;
pub mod svg;
pub mod text;

use crate::canvas::Canvas;
use crate::figure::Figure;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use stagechart_core::layout::{BoxLayout, layout_diagram};
use stagechart_core::style::TextStyle;
use stagechart_core::{DiagramConfig, geom::Bounds};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] stagechart_core::Error),
    #[error("nothing to render: the scene has no bounds and no content")]
    EmptyScene,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct RenderOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Used to check label fit in pixels; does not affect geometry.
    pub figure: Figure,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::bold()),
            figure: Figure::default(),
        }
    }
}

/// Draws the whole diagram onto `canvas` and finishes it.
///
/// The layout is computed (and validated) before the first draw call, so a failing
/// configuration never leaves a partially drawn canvas behind.
pub fn render_diagram<C: Canvas>(
    config: &DiagramConfig,
    mut canvas: C,
    options: &RenderOptions,
) -> Result<C::Output> {
    let layout = layout_diagram(config)?;

    for b in &layout.boxes {
        tracing::debug!(index = b.index, y = b.y, fill = %b.fill.to_hex(), "drawing stage");
        check_label_fit(b, &layout.bounds, options);
        draw::draw_stage_box(&mut canvas, b);
    }
    for c in &layout.connectors {
        draw::draw_connector(&mut canvas, c);
    }
    draw::finalize(&mut canvas, &layout.title, layout.bounds);

    canvas.finish()
}

fn check_label_fit(b: &BoxLayout, bounds: &Bounds, options: &RenderOptions) {
    let fig = &options.figure;
    let (sx, sy) = fig.scale(bounds);
    let style = TextStyle::LABEL;
    let metrics = options.text_measurer.measure(
        &b.label,
        fig.pt_to_px(style.font_size_pt),
        style.line_spacing,
    );
    let (box_w, box_h) = (b.width * sx, b.height * sy);
    if metrics.width > box_w || metrics.height > box_h {
        tracing::warn!(
            index = b.index,
            label_width = metrics.width,
            label_height = metrics.height,
            box_width = box_w,
            box_height = box_h,
            "stage label overflows its box"
        );
    }
}
