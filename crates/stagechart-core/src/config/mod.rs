use crate::color::Rgb;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

mod preset;

/// One labeled pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// May contain embedded `\n` line breaks.
    pub label: String,
    pub fill: Rgb,
}

impl Stage {
    pub fn new(label: impl Into<String>, fill: impl Into<Rgb>) -> Self {
        Self {
            label: label.into(),
            fill: fill.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.label.split('\n')
    }
}

/// Fixed geometry constants, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub box_width: f64,
    pub box_height: f64,
    /// Left edge of every box.
    pub origin_x: f64,
    pub vertical_gap: f64,
    /// Distance from the top of the stack to the title anchor.
    pub title_offset: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub canvas_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 7.0,
            box_height: 1.2,
            origin_x: 0.5,
            vertical_gap: 0.7,
            title_offset: 1.0,
            top_margin: 2.0,
            bottom_margin: 0.5,
            canvas_width: 9.0,
        }
    }
}

impl LayoutConfig {
    /// Vertical distance between the lower-left corners of two adjacent boxes.
    pub fn pitch(&self) -> f64 {
        self.box_height + self.vertical_gap
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("origin_x", self.origin_x),
            ("vertical_gap", self.vertical_gap),
            ("title_offset", self.title_offset),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("canvas_width", self.canvas_width),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::invalid(format!("{name} must be finite, got {v}")));
        }
        if self.box_width <= 0.0 {
            return Err(Error::invalid(format!(
                "box_width must be positive, got {}",
                self.box_width
            )));
        }
        if self.box_height <= 0.0 {
            return Err(Error::invalid(format!(
                "box_height must be positive, got {}",
                self.box_height
            )));
        }
        let offsets = [
            ("vertical_gap", self.vertical_gap),
            ("title_offset", self.title_offset),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("origin_x", self.origin_x),
        ];
        if let Some((name, v)) = offsets.iter().find(|(_, v)| *v < 0.0) {
            return Err(Error::invalid(format!("{name} must not be negative, got {v}")));
        }
        if self.canvas_width <= 0.0 {
            return Err(Error::invalid(format!(
                "canvas_width must be positive, got {}",
                self.canvas_width
            )));
        }
        let right = self.origin_x + self.box_width;
        if right > self.canvas_width {
            return Err(Error::invalid(format!(
                "boxes span x [{}, {right}] but the canvas is only {} wide",
                self.origin_x, self.canvas_width
            )));
        }
        Ok(())
    }
}

/// Everything a render needs. Validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramConfig {
    title: String,
    stages: Vec<Stage>,
    layout: LayoutConfig,
}

impl DiagramConfig {
    pub fn new(
        title: impl Into<String>,
        stages: Vec<Stage>,
        layout: LayoutConfig,
    ) -> Result<Self> {
        if stages.is_empty() {
            return Err(Error::invalid("at least one stage is required"));
        }
        for (i, stage) in stages.iter().enumerate() {
            stage.fill.validate().map_err(|err| match err {
                Error::InvalidConfiguration { message } => {
                    Error::invalid(format!("stage {}: {message}", i + 1))
                }
            })?;
        }
        layout.validate()?;
        Ok(Self {
            title: title.into(),
            stages,
            layout,
        })
    }

    /// Builds a config from parallel label and color lists.
    ///
    /// The lists must have the same length; they are never truncated or cycled.
    pub fn from_parallel<L, C>(
        title: impl Into<String>,
        labels: impl IntoIterator<Item = L>,
        colors: impl IntoIterator<Item = C>,
        layout: LayoutConfig,
    ) -> Result<Self>
    where
        L: Into<String>,
        C: Into<Rgb>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let colors: Vec<Rgb> = colors.into_iter().map(Into::into).collect();
        if labels.len() != colors.len() {
            return Err(Error::invalid(format!(
                "stage count ({}) != color count ({})",
                labels.len(),
                colors.len()
            )));
        }
        let stages = labels
            .into_iter()
            .zip(colors)
            .map(|(label, fill)| Stage { label, fill })
            .collect();
        Self::new(title, stages, layout)
    }

    /// The built-in predictive-maintenance pipeline.
    pub fn predictive_maintenance() -> Self {
        Self {
            title: preset::TITLE.to_string(),
            stages: preset::STAGES
                .iter()
                .map(|(label, (r, g, b))| Stage::new(*label, Rgb::new(*r, *g, *b)))
                .collect(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self::predictive_maintenance()
    }
}
