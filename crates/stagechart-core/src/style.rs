//! Fixed drawing styles. Lengths marked `_pt` are typographic points; everything else is in data
//! units.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_pt: f64,
    pub weight: FontWeight,
    pub color: Rgb,
    pub anchor: VerticalAnchor,
    /// Line advance as a multiple of the font size.
    pub line_spacing: f64,
}

impl TextStyle {
    pub const LABEL: TextStyle = TextStyle {
        font_size_pt: 10.0,
        weight: FontWeight::Bold,
        color: Rgb::BLACK,
        anchor: VerticalAnchor::Center,
        line_spacing: 1.2,
    };

    pub const TITLE: TextStyle = TextStyle {
        font_size_pt: 16.0,
        weight: FontWeight::Bold,
        color: Rgb::BLACK,
        anchor: VerticalAnchor::Bottom,
        line_spacing: 1.2,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Grows the drawn rectangle on every side.
    pub pad: f64,
    pub rounding_size: f64,
    pub line_width_pt: f64,
    pub edge_color: Rgb,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            pad: 0.02,
            rounding_size: 0.05,
            line_width_pt: 1.5,
            edge_color: Rgb::BLACK,
        }
    }
}

/// An open `->` arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub mutation_scale: f64,
    pub head_length: f64,
    pub head_width: f64,
    pub line_width_pt: f64,
    pub color: Rgb,
    /// Both ends are pulled in by this many points.
    pub shrink_pt: f64,
}

impl ArrowStyle {
    pub fn head_length_pt(&self) -> f64 {
        self.head_length * self.mutation_scale
    }

    pub fn head_half_width_pt(&self) -> f64 {
        self.head_width * self.mutation_scale
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            mutation_scale: 15.0,
            head_length: 0.4,
            head_width: 0.2,
            line_width_pt: 1.5,
            color: Rgb::GRAY,
            shrink_pt: 2.0,
        }
    }
}
