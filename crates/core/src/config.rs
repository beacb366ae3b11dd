use serde::{Deserialize, Serialize};

/// Plot geometry and navigation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Horizontal extent of every item row, in list units.
    pub width: f64,
    /// Horizontal margin on each side of the list.
    pub x_buffer: f64,
    /// Vertical margin above and below the list.
    pub y_buffer: f64,
    /// Frames skipped by a page-forward / page-backward event.
    pub page_size: usize,
}

impl ViewConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            x_buffer: 40.0,
            y_buffer: 100.0,
            page_size: 30,
        }
    }
}
