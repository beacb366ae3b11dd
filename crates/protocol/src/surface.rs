use serde::{Deserialize, Serialize};

use crate::commands::RenderCommand;
use crate::types::Bounds;

/// Handle to a primitive owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub u64);

/// A retained 2D drawing capability.
///
/// Primitives are `DrawLine`/`DrawRect`/`DrawText` commands kept alive until
/// removed. Changes accumulate until `flush`, which presents them as one
/// batch.
pub trait Surface {
    /// Set the visible plot-space range.
    fn set_bounds(&mut self, bounds: Bounds);

    /// Add a primitive and return its handle.
    fn insert(&mut self, primitive: RenderCommand) -> PrimitiveId;

    /// Replace the primitive behind `id` in place.
    fn replace(&mut self, id: PrimitiveId, primitive: RenderCommand);

    /// Remove a primitive. Unknown ids are ignored.
    fn remove(&mut self, id: PrimitiveId);

    /// Present all pending changes.
    fn flush(&mut self);
}
