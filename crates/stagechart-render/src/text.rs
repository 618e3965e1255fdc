use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    /// Measures `text` in pixels. `font_size` is in pixels as well.
    fn measure(&self, text: &str, font_size: f64, line_spacing: f64) -> TextMetrics;
}

/// Font-independent estimate based on terminal column widths.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    /// Width of one column in ems; `0.0` means the default (`0.6`).
    pub char_width_factor: f64,
    /// Extra width factor for bold faces; `0.0` means none.
    pub bold_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn bold() -> Self {
        Self {
            char_width_factor: 0.0,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64, line_spacing: f64) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let bold_factor = if self.bold_factor == 0.0 {
            1.0
        } else {
            self.bold_factor
        };

        let font_size = font_size.max(1.0);
        let lines: Vec<&str> = text.split('\n').collect();
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor * bold_factor,
            height: lines.len() as f64 * font_size * line_spacing,
            line_count: lines.len(),
        }
    }
}
