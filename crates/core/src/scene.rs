//! Retained in-memory drawing surface.

use std::collections::BTreeMap;

use dslv_viz_protocol::{Bounds, PrimitiveId, RenderCommand, Surface};

/// A [`Surface`] that keeps every live primitive in insertion order and
/// snapshots them as render commands for stateless renderers.
#[derive(Debug, Default)]
pub struct Scene {
    bounds: Option<Bounds>,
    primitives: BTreeMap<PrimitiveId, RenderCommand>,
    next_id: u64,
    inserted: usize,
    removed: usize,
    flushes: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&RenderCommand> {
        self.primitives.get(&id)
    }

    /// Number of live primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Total primitives ever inserted.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Total primitives ever removed.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Number of presented batches.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Snapshot: `SetBounds` (if any) followed by primitives, oldest first.
    pub fn commands(&self) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(self.primitives.len() + 1);
        if let Some(bounds) = self.bounds {
            commands.push(RenderCommand::SetBounds { bounds });
        }
        commands.extend(self.primitives.values().cloned());
        commands
    }
}

impl Surface for Scene {
    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn insert(&mut self, primitive: RenderCommand) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.inserted += 1;
        self.primitives.insert(id, primitive);
        id
    }

    fn replace(&mut self, id: PrimitiveId, primitive: RenderCommand) {
        if let Some(slot) = self.primitives.get_mut(&id) {
            *slot = primitive;
        }
    }

    fn remove(&mut self, id: PrimitiveId) {
        if self.primitives.remove(&id).is_some() {
            self.removed += 1;
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
