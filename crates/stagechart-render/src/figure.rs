use serde::{Deserialize, Serialize};
use stagechart_core::geom::{Bounds, Rect, Size, Transform, data_to_pixel_transform, point};

/// Axes placement as fractions of the figure (origin at the bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesRect {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Default for AxesRect {
    fn default() -> Self {
        Self {
            left: 0.125,
            bottom: 0.11,
            right: 0.9,
            top: 0.88,
        }
    }
}

impl AxesRect {
    pub fn full() -> Self {
        Self {
            left: 0.0,
            bottom: 0.0,
            right: 1.0,
            top: 1.0,
        }
    }
}

/// Physical figure size and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub axes: AxesRect,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width_in: 9.0,
            height_in: 12.0,
            dpi: 100.0,
            axes: AxesRect::default(),
        }
    }
}

impl Figure {
    pub fn width_px(&self) -> f64 {
        self.width_in * self.dpi
    }

    pub fn height_px(&self) -> f64 {
        self.height_in * self.dpi
    }

    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// The axes area in pixels, origin at the top-left of the figure.
    pub fn axes_px(&self) -> Rect {
        let w = self.width_px();
        let h = self.height_px();
        Rect::new(
            point(self.axes.left * w, (1.0 - self.axes.top) * h),
            Size::new(
                (self.axes.right - self.axes.left) * w,
                (self.axes.top - self.axes.bottom) * h,
            ),
        )
    }

    pub fn data_transform(&self, bounds: &Bounds) -> Transform {
        data_to_pixel_transform(bounds, &self.axes_px())
    }

    /// Pixels per data unit along x and y.
    pub fn scale(&self, bounds: &Bounds) -> (f64, f64) {
        let axes = self.axes_px();
        (
            axes.size.width / bounds.width(),
            axes.size.height / bounds.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flips_y_into_axes_rect() {
        let fig = Figure {
            axes: AxesRect::full(),
            ..Figure::default()
        };
        let bounds = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 9.0,
            max_y: 12.0,
        };
        let t = fig.data_transform(&bounds);
        let top_left = t.transform_point(point(0.0, 12.0));
        let bottom_right = t.transform_point(point(9.0, 0.0));
        assert!((top_left.x - 0.0).abs() < 1e-9 && (top_left.y - 0.0).abs() < 1e-9);
        assert!((bottom_right.x - 900.0).abs() < 1e-9);
        assert!((bottom_right.y - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn default_axes_leave_subplot_margins() {
        let axes = Figure::default().axes_px();
        assert!((axes.origin.x - 112.5).abs() < 1e-9);
        assert!((axes.origin.y - 144.0).abs() < 1e-9);
        assert!((axes.size.width - 697.5).abs() < 1e-9);
        assert!((axes.size.height - 924.0).abs() < 1e-9);
    }

    #[test]
    fn points_scale_with_dpi() {
        let fig = Figure {
            dpi: 72.0,
            ..Figure::default()
        };
        assert_eq!(fig.pt_to_px(10.0), 10.0);
    }
}
