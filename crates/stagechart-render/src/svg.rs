use crate::canvas::{
    ArrowShape, Canvas, DrawCommand, RoundedBoxShape, Scene, TextAnnotation, TextRole,
};
use crate::figure::Figure;
use crate::{Error, Result};
use stagechart_core::Rgb;
use stagechart_core::geom::{Bounds, Transform, point, vector};
use stagechart_core::style::{FontWeight, VerticalAnchor};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    pub figure: Figure,
    /// Optional root `id` attribute.
    pub diagram_id: Option<String>,
    pub figure_background: Rgb,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            figure: Figure::default(),
            diagram_id: None,
            figure_background: Rgb::WHITE,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
        }
    }
}

/// Buffers draw calls in data coordinates and lays them out in pixels on [`Canvas::finish`],
/// since the data bounds are only known once the canvas is finalized.
#[derive(Debug, Clone, Default)]
pub struct SvgCanvas {
    scene: Scene,
    options: SvgRenderOptions,
}

impl SvgCanvas {
    pub fn new(options: SvgRenderOptions) -> Self {
        Self {
            scene: Scene::default(),
            options,
        }
    }
}

impl Canvas for SvgCanvas {
    type Output = String;

    fn draw_rounded_box(&mut self, shape: RoundedBoxShape) {
        self.scene.commands.push(DrawCommand::RoundedBox(shape));
    }

    fn draw_text(&mut self, text: TextAnnotation) {
        self.scene.commands.push(DrawCommand::Text(text));
    }

    fn draw_arrow(&mut self, arrow: ArrowShape) {
        self.scene.commands.push(DrawCommand::Arrow(arrow));
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.scene.bounds = Some(bounds);
    }

    fn set_axes_visible(&mut self, visible: bool) {
        self.scene.axes_visible = visible;
    }

    fn finish(self) -> Result<String> {
        render_scene_svg(&self.scene, &self.options)
    }
}

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> Result<String> {
    let bounds = match scene.bounds.or_else(|| scene.content_bounds()) {
        Some(b) if b.width() > 0.0 && b.height() > 0.0 => b,
        _ => return Err(Error::EmptyScene),
    };

    let fig = &options.figure;
    let w = fig.width_px();
    let h = fig.height_px();
    let transform = fig.data_transform(&bounds);
    let (sx, sy) = fig.scale(&bounds);

    let mut out = String::new();
    let id_attr = match options.diagram_id.as_deref() {
        Some(id) => format!(r#" id="{}""#, escape_xml(id)),
        None => String::new(),
    };
    let _ = write!(
        &mut out,
        r#"<svg{id_attr} width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="stagechart">"#,
        id_attr = id_attr,
        w = fmt(w),
        h = fmt(h)
    );
    let _ = write!(
        &mut out,
        r#"<rect class="figure-background" x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
        w = fmt(w),
        h = fmt(h),
        fill = options.figure_background.to_hex()
    );

    if scene.axes_visible {
        let axes = fig.axes_px();
        let _ = write!(
            &mut out,
            r##"<rect class="axes-frame" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}" stroke="#000000" stroke-width="{sw}"/>"##,
            x = fmt(axes.origin.x),
            y = fmt(axes.origin.y),
            w = fmt(axes.size.width),
            h = fmt(axes.size.height),
            fill = scene.axes_face.to_hex(),
            sw = fmt(fig.pt_to_px(0.8))
        );
    }

    out.push_str(r#"<g class="diagram">"#);
    for command in &scene.commands {
        match command {
            DrawCommand::RoundedBox(b) => render_box(&mut out, b, &transform, sx, sy, fig),
            DrawCommand::Text(t) => render_text(&mut out, t, &transform, fig, options),
            DrawCommand::Arrow(a) => render_arrow(&mut out, a, &transform, fig),
        }
    }
    out.push_str("</g></svg>\n");
    Ok(out)
}

fn render_box(
    out: &mut String,
    shape: &RoundedBoxShape,
    transform: &Transform,
    sx: f64,
    sy: f64,
    fig: &Figure,
) {
    let b = shape.padded_bounds();
    let top_left = transform.transform_point(point(b.min_x, b.max_y));
    let _ = write!(
        out,
        r#"<rect class="stage-box" x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" ry="{ry}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#,
        x = fmt(top_left.x),
        y = fmt(top_left.y),
        w = fmt(b.width() * sx),
        h = fmt(b.height() * sy),
        rx = fmt(shape.style.rounding_size * sx),
        ry = fmt(shape.style.rounding_size * sy),
        fill = shape.fill.to_hex(),
        stroke = shape.style.edge_color.to_hex(),
        sw = fmt(fig.pt_to_px(shape.style.line_width_pt))
    );
}

fn render_text(
    out: &mut String,
    text: &TextAnnotation,
    transform: &Transform,
    fig: &Figure,
    options: &SvgRenderOptions,
) {
    let anchor = transform.transform_point(point(text.x, text.y));
    let font_px = fig.pt_to_px(text.style.font_size_pt);
    let line_advance = font_px * text.style.line_spacing;
    let lines: Vec<&str> = text.text.split('\n').collect();
    let extra_lines = (lines.len() - 1) as f64;

    let (baseline, first_dy) = match text.style.anchor {
        VerticalAnchor::Center => ("central", -extra_lines * line_advance / 2.0),
        VerticalAnchor::Bottom => ("text-after-edge", -extra_lines * line_advance),
    };
    let class = match text.role {
        TextRole::Label => "stage-label",
        TextRole::Title => "diagram-title",
    };
    let weight = match text.style.weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    };

    let _ = write!(
        out,
        r#"<text class="{class}" x="{x}" y="{y}" text-anchor="middle" dominant-baseline="{baseline}" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="{fill}">"#,
        x = fmt(anchor.x),
        y = fmt(anchor.y),
        family = escape_xml(&options.font_family),
        size = fmt(font_px),
        fill = text.style.color.to_hex()
    );
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { first_dy } else { line_advance };
        let _ = write!(
            out,
            r#"<tspan x="{x}" dy="{dy}">{text}</tspan>"#,
            x = fmt(anchor.x),
            dy = fmt(dy),
            text = escape_xml(line)
        );
    }
    out.push_str("</text>");
}

fn render_arrow(out: &mut String, arrow: &ArrowShape, transform: &Transform, fig: &Figure) {
    let start = transform.transform_point(arrow.start);
    let end = transform.transform_point(arrow.end);
    let delta = end - start;
    let len = delta.length();
    // Zero-length connectors (adjacent boxes touching) still point down the stack.
    let dir = if len.is_finite() && len > f64::EPSILON {
        delta / len
    } else {
        vector(0.0, 1.0)
    };
    let mut shrink = fig.pt_to_px(arrow.style.shrink_pt);
    if !len.is_finite() || len <= 2.0 * shrink {
        tracing::debug!(len, shrink, "connector shorter than its end shrink");
        shrink = 0.0;
    }

    let perp = vector(-dir.y, dir.x);
    let tail = start + dir * shrink;
    let tip = end - dir * shrink;
    let head_len = fig.pt_to_px(arrow.style.head_length_pt());
    let head_half = fig.pt_to_px(arrow.style.head_half_width_pt());
    let base = tip - dir * head_len;
    let left = base + perp * head_half;
    let right = base - perp * head_half;

    let color = arrow.style.color.to_hex();
    let sw = fmt(fig.pt_to_px(arrow.style.line_width_pt));
    let _ = write!(
        out,
        r#"<g class="connector" fill="none" stroke="{color}" stroke-width="{sw}" stroke-linejoin="round">"#
    );
    let _ = write!(
        out,
        r#"<path class="connector-shaft" d="M{x0},{y0}L{x1},{y1}"/>"#,
        x0 = fmt(tail.x),
        y0 = fmt(tail.y),
        x1 = fmt(tip.x),
        y1 = fmt(tip.y)
    );
    let _ = write!(
        out,
        r#"<path class="connector-head" d="M{lx},{ly}L{tx},{ty}L{rx},{ry}"/>"#,
        lx = fmt(left.x),
        ly = fmt(left.y),
        tx = fmt(tip.x),
        ty = fmt(tip.y),
        rx = fmt(right.x),
        ry = fmt(right.y)
    );
    out.push_str("</g>");
}

fn fmt(v: f64) -> String {
    // Round to 1/1000 px and drop trailing zeros; avoid `-0` and float noise.
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
