use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of a list item (its adapter position).
pub type ItemId = i32;

/// A candidate drop slot and the blank gap opened in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: ItemId,
    pub gap_height: i32,
}

/// Vertical extent and drop edge of one visible item, in list coordinates
/// (`y` grows downward, `top <= bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub top: i32,
    pub bottom: i32,
    pub edge: i32,
}

/// Raw field values for one frame, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameFields {
    pub positions: Vec<ItemId>,
    pub tops: Vec<i32>,
    pub bottoms: Vec<i32>,
    pub edges: Vec<i32>,
    pub source: Option<ItemId>,
    pub source_height: Option<i32>,
    pub first_target: Option<Target>,
    pub second_target: Option<Target>,
    pub view_height: i32,
    pub float_y: i32,
    pub touch_y: Option<i32>,
}

/// Why a set of [`FrameFields`] cannot form a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameInvariant {
    /// A parallel sequence has a different length than `positions`.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// An identifier occurs twice in `positions`.
    DuplicateItem(ItemId),
}

/// One recorded snapshot of the list during a drag gesture.
///
/// Immutable once built. Per-item sequences are indexed by position in
/// `positions`, not by identifier value; `index_of` resolves one to the
/// other through a map built at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    fields: FrameFields,
    index: HashMap<ItemId, usize>,
}

impl FrameRecord {
    pub fn new(fields: FrameFields) -> Result<Self, FrameInvariant> {
        let expected = fields.positions.len();
        for (field, found) in [
            ("tops", fields.tops.len()),
            ("bottoms", fields.bottoms.len()),
            ("edges", fields.edges.len()),
        ] {
            if found != expected {
                return Err(FrameInvariant::LengthMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }

        let mut index = HashMap::with_capacity(expected);
        for (i, &id) in fields.positions.iter().enumerate() {
            if index.insert(id, i).is_some() {
                return Err(FrameInvariant::DuplicateItem(id));
            }
        }

        Ok(Self { fields, index })
    }

    pub fn positions(&self) -> &[ItemId] {
        &self.fields.positions
    }

    pub fn len(&self) -> usize {
        self.fields.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.positions.is_empty()
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn geometry(&self, id: ItemId) -> Option<ItemGeometry> {
        let i = self.index_of(id)?;
        Some(ItemGeometry {
            top: self.fields.tops[i],
            bottom: self.fields.bottoms[i],
            edge: self.fields.edges[i],
        })
    }

    /// The item being dragged, if any.
    pub fn source(&self) -> Option<ItemId> {
        self.fields.source
    }

    /// Height of the floating drag shadow, when the trace records it.
    pub fn source_height(&self) -> Option<i32> {
        self.fields.source_height
    }

    pub fn first_target(&self) -> Option<Target> {
        self.fields.first_target
    }

    pub fn second_target(&self) -> Option<Target> {
        self.fields.second_target
    }

    pub fn view_height(&self) -> i32 {
        self.fields.view_height
    }

    pub fn float_y(&self) -> i32 {
        self.fields.float_y
    }

    /// Last raw touch position, when the trace records it.
    pub fn touch_y(&self) -> Option<i32> {
        self.fields.touch_y
    }

    /// Targets whose slot is not among the visible items.
    pub fn offscreen_targets(&self) -> impl Iterator<Item = Target> + '_ {
        [self.fields.first_target, self.fields.second_target]
            .into_iter()
            .flatten()
            .filter(|t| !self.contains(t.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FrameFields {
        FrameFields {
            positions: vec![4, 5, 6],
            tops: vec![0, 40, 80],
            bottoms: vec![40, 80, 120],
            edges: vec![0, 40, 80],
            view_height: 400,
            float_y: 60,
            ..FrameFields::default()
        }
    }

    #[test]
    fn geometry_is_indexed_by_position_not_id() {
        let frame = FrameRecord::new(fields()).unwrap();
        assert_eq!(frame.index_of(5), Some(1));
        assert_eq!(
            frame.geometry(6),
            Some(ItemGeometry {
                top: 80,
                bottom: 120,
                edge: 80
            })
        );
        assert_eq!(frame.geometry(0), None);
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut f = fields();
        f.edges.pop();
        assert_eq!(
            FrameRecord::new(f),
            Err(FrameInvariant::LengthMismatch {
                field: "edges",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut f = fields();
        f.positions = vec![4, 5, 4];
        assert_eq!(FrameRecord::new(f), Err(FrameInvariant::DuplicateItem(4)));
    }

    #[test]
    fn reports_offscreen_targets() {
        let mut f = fields();
        f.first_target = Some(Target {
            id: 5,
            gap_height: 10,
        });
        f.second_target = Some(Target {
            id: 9,
            gap_height: 3,
        });
        let frame = FrameRecord::new(f).unwrap();
        let offscreen: Vec<_> = frame.offscreen_targets().map(|t| t.id).collect();
        assert_eq!(offscreen, vec![9]);
    }

    #[test]
    fn empty_frame_is_valid() {
        let frame = FrameRecord::new(FrameFields::default()).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
    }
}
