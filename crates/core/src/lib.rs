//! Frame-by-frame inspection of recorded drag-sort list traces.
//!
//! ```text
//!   trace.xml ─▶ parsers ─▶ FrameRecord[] ─▶ NavigationController
//!                                                  │ current frame
//!                                                  ▼
//!                      Surface ◀── ItemView* ◀── FrameView (reconcile)
//!                   (Scene, …)
//! ```

pub mod config;
pub mod model;
pub mod navigation;
pub mod parsers;
pub mod scene;
pub mod session;
pub mod svg;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ViewConfig;
pub use model::{FrameRecord, ItemId};
pub use navigation::{Boundary, NavEvent, Navigation, NavigationController};
pub use parsers::{MalformedTraceError, parse_trace};
pub use scene::Scene;
pub use session::{Session, SessionError};
