pub mod frame;

pub use frame::{FrameFields, FrameRecord, ItemGeometry, ItemId, Target};
