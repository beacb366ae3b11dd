use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    // Per-item primitives
    ItemBoundary,
    ItemLabel,
    EdgeIndicator,

    // Highlight regions
    SourceHighlight,
    GapHighlight,

    // Frame-wide primitives
    FloatIndicator,
    TouchIndicator,
    ViewBoundary,
}
