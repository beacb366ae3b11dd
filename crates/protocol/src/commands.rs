use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Bounds, Point, Rect};

/// A single, stateless render instruction.
///
/// A retained surface snapshots its primitives as a `Vec<RenderCommand>`.
/// Renderers consume this list sequentially — each command carries all the
/// data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Declare the plot-space range the following commands live in.
    SetBounds { bounds: Bounds },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        dashed: bool,
    },

    /// Draw a rectangle. `fill: None` draws only the outline.
    DrawRect {
        rect: Rect,
        fill: Option<ThemeToken>,
        stroke: Option<ThemeToken>,
        dashed: bool,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        align: TextAlign,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
