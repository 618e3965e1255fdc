#![forbid(unsafe_code)]

//! Stage model and vertical layout for pipeline flowcharts (headless).
//!
//! Design goals:
//! - the renderer is a pure function of an immutable [`DiagramConfig`]
//! - invalid configuration is rejected before anything is drawn
//! - deterministic geometry, testable without a display

pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod layout;
pub mod style;

pub use color::Rgb;
pub use config::{DiagramConfig, LayoutConfig, Stage};
pub use error::{Error, Result};
pub use layout::{
    BoxLayout, ConnectorLayout, DiagramLayout, TitleLayout, layout_diagram, stack_positions,
};

#[cfg(test)]
mod tests;
