pub mod commands;
pub mod surface;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use surface::{PrimitiveId, Surface};
pub use theme::ThemeToken;
pub use types::{Bounds, Point, Rect};
