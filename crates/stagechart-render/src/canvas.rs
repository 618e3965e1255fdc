use serde::Serialize;
use stagechart_core::Rgb;
use stagechart_core::geom::{Bounds, Point};
use stagechart_core::style::{ArrowStyle, BoxStyle, TextStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundedBoxShape {
    /// Lower-left corner before padding, in data units.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub style: BoxStyle,
}

impl RoundedBoxShape {
    /// The rectangle actually stroked: grown by `style.pad` on every side.
    pub fn padded_bounds(&self) -> Bounds {
        let pad = self.style.pad;
        Bounds {
            min_x: self.x - pad,
            min_y: self.y - pad,
            max_x: self.x + self.width + pad,
            max_y: self.y + self.height + pad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Label,
    Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnnotation {
    pub text: String,
    /// Horizontal center of the text.
    pub x: f64,
    /// Vertical anchor point, interpreted per `style.anchor`.
    pub y: f64,
    pub role: TextRole,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowShape {
    pub start: Point,
    pub end: Point,
    pub style: ArrowStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    RoundedBox(RoundedBoxShape),
    Text(TextAnnotation),
    Arrow(ArrowShape),
}

/// A 2D drawing surface. Drawing is append-only; [`Canvas::finish`] consumes the canvas.
pub trait Canvas {
    type Output;

    fn draw_rounded_box(&mut self, shape: RoundedBoxShape);
    fn draw_text(&mut self, text: TextAnnotation);
    fn draw_arrow(&mut self, arrow: ArrowShape);
    fn set_bounds(&mut self, bounds: Bounds);
    fn set_axes_visible(&mut self, visible: bool);
    fn finish(self) -> crate::Result<Self::Output>;
}

/// Backend-independent record of everything drawn on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    pub bounds: Option<Bounds>,
    pub axes_visible: bool,
    pub axes_face: Rgb,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            bounds: None,
            axes_visible: true,
            axes_face: Rgb::new(0.98, 0.98, 0.98),
        }
    }
}

impl Scene {
    pub fn boxes(&self) -> impl Iterator<Item = &RoundedBoxShape> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::RoundedBox(b) => Some(b),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextAnnotation> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &ArrowShape> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Arrow(a) => Some(a),
            _ => None,
        })
    }

    /// Extent of all drawn geometry; text contributes only its anchor point.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let mut points = Vec::new();
        for c in &self.commands {
            match c {
                DrawCommand::RoundedBox(b) => {
                    let p = b.padded_bounds();
                    points.push((p.min_x, p.min_y));
                    points.push((p.max_x, p.max_y));
                }
                DrawCommand::Text(t) => points.push((t.x, t.y)),
                DrawCommand::Arrow(a) => {
                    points.push((a.start.x, a.start.y));
                    points.push((a.end.x, a.end.y));
                }
            }
        }
        Bounds::from_points(points)
    }
}

/// Records draw calls into a [`Scene`]. Used for tests and JSON dumps.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    scene: Scene,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Canvas for RecordingCanvas {
    type Output = Scene;

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

    fn finish(self) -> crate::Result<Scene> {
        Ok(self.scene)
    }
}
