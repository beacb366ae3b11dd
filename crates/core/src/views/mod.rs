pub mod frame_view;
pub mod item_view;
pub mod pool;

pub use frame_view::{FrameView, ReconcileStats};
pub use item_view::{
    Highlight, HighlightKind, ItemNotInFrameError, ItemView, ReassignOutcome, highlight_for,
};
pub use pool::{ItemPool, SlotHandle};
