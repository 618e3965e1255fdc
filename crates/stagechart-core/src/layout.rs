use crate::color::Rgb;
use crate::config::DiagramConfig;
use crate::geom::{Bounds, Point, point};
use crate::{Error, Result};
use serde::Serialize;

/// Lower-left y coordinate of each box, topmost first.
///
/// `y[i] = n * pitch - (i + 1) * pitch` where `pitch = box_height + vertical_gap`, so adjacent
/// boxes are separated by exactly `vertical_gap` and the last box sits on `y = 0`.
pub fn stack_positions(stage_count: usize, box_height: f64, vertical_gap: f64) -> Result<Vec<f64>> {
    if stage_count == 0 {
        return Err(Error::invalid("stage_count must be at least 1"));
    }
    if !box_height.is_finite() || box_height <= 0.0 {
        return Err(Error::invalid(format!(
            "box_height must be positive, got {box_height}"
        )));
    }
    if !vertical_gap.is_finite() || vertical_gap < 0.0 {
        return Err(Error::invalid(format!(
            "vertical_gap must not be negative, got {vertical_gap}"
        )));
    }

    let pitch = box_height + vertical_gap;
    let top = stack_top(stage_count, box_height, vertical_gap);
    Ok((0..stage_count)
        .map(|i| top - (i + 1) as f64 * pitch)
        .collect())
}

/// Upper bound of the stack; the topmost box's top edge plus `vertical_gap`.
pub fn stack_top(stage_count: usize, box_height: f64, vertical_gap: f64) -> f64 {
    stage_count as f64 * (box_height + vertical_gap)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxLayout {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub label: String,
}

impl BoxLayout {
    pub fn center(&self) -> Point {
        point(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_center(&self) -> Point {
        point(self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn bottom_center(&self) -> Point {
        point(self.x + self.width / 2.0, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x + self.width,
            max_y: self.y + self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorLayout {
    pub from: usize,
    pub to: usize,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramLayout {
    pub title: TitleLayout,
    pub boxes: Vec<BoxLayout>,
    pub connectors: Vec<ConnectorLayout>,
    pub bounds: Bounds,
    pub y_top_bound: f64,
}

pub fn layout_diagram(config: &DiagramConfig) -> Result<DiagramLayout> {
    let layout = config.layout();
    let n = config.stage_count();
    let ys = stack_positions(n, layout.box_height, layout.vertical_gap)?;
    let y_top_bound = stack_top(n, layout.box_height, layout.vertical_gap);

    let boxes: Vec<BoxLayout> = config
        .stages()
        .iter()
        .zip(ys)
        .enumerate()
        .map(|(index, (stage, y))| BoxLayout {
            index,
            x: layout.origin_x,
            y,
            width: layout.box_width,
            height: layout.box_height,
            fill: stage.fill,
            label: stage.label.clone(),
        })
        .collect();

    let connectors = boxes
        .windows(2)
        .map(|pair| ConnectorLayout {
            from: pair[0].index,
            to: pair[1].index,
            start: pair[0].bottom_center(),
            end: pair[1].top_center(),
        })
        .collect();

    let title = TitleLayout {
        text: config.title().to_string(),
        x: layout.origin_x + layout.box_width / 2.0,
        y: y_top_bound + layout.title_offset,
    };

    let bounds = Bounds {
        min_x: 0.0,
        min_y: -layout.bottom_margin,
        max_x: layout.canvas_width,
        max_y: y_top_bound + layout.top_margin,
    };

    tracing::debug!(stages = n, y_top_bound, "computed stack layout");

    Ok(DiagramLayout {
        title,
        boxes,
        connectors,
        bounds,
        y_top_bound,
    })
}
