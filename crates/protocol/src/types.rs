use serde::{Deserialize, Serialize};

/// A point in plot space. `y` grows upward: list coordinates are negated
/// before they reach the protocol, so the top of the list sits at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Upper edge in plot space.
    pub fn top(&self) -> f64 {
        self.y + self.h
    }
}

/// Visible coordinate range of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_top_is_origin_plus_height() {
        let rect = Rect::new(0.0, -150.0, 100.0, 30.0);
        assert_eq!(rect.top(), -120.0);
    }

    #[test]
    fn bounds_extent() {
        let bounds = Bounds {
            x_min: -40.0,
            x_max: 140.0,
            y_min: -500.0,
            y_max: 100.0,
        };
        assert_eq!(bounds.width(), 180.0);
        assert_eq!(bounds.height(), 600.0);
    }
}
