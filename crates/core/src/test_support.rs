use crate::model::{FrameFields, FrameRecord, ItemId, Target};

/// `(id, top, bottom)` rows stacked back to back, `height` units each.
pub(crate) fn rows(ids: &[ItemId], height: i32) -> Vec<(ItemId, i32, i32)> {
    ids.iter()
        .zip(0..)
        .map(|(&id, i)| (id, i * height, (i + 1) * height))
        .collect()
}

pub(crate) struct FrameBuilder {
    fields: FrameFields,
}

impl FrameBuilder {
    pub(crate) fn new(rows: Vec<(ItemId, i32, i32)>) -> Self {
        let fields = FrameFields {
            positions: rows.iter().map(|r| r.0).collect(),
            tops: rows.iter().map(|r| r.1).collect(),
            bottoms: rows.iter().map(|r| r.2).collect(),
            edges: rows.iter().map(|r| r.1).collect(),
            view_height: 400,
            ..FrameFields::default()
        };
        Self { fields }
    }

    pub(crate) fn edges(mut self, edges: &[i32]) -> Self {
        self.fields.edges = edges.to_vec();
        self
    }

    pub(crate) fn source(mut self, id: ItemId) -> Self {
        self.fields.source = Some(id);
        self
    }

    pub(crate) fn first_target(mut self, id: ItemId, gap_height: i32) -> Self {
        self.fields.first_target = Some(Target { id, gap_height });
        self
    }

    pub(crate) fn second_target(mut self, id: ItemId, gap_height: i32) -> Self {
        self.fields.second_target = Some(Target { id, gap_height });
        self
    }

    pub(crate) fn float_y(mut self, y: i32) -> Self {
        self.fields.float_y = y;
        self
    }

    pub(crate) fn touch_y(mut self, y: i32) -> Self {
        self.fields.touch_y = Some(y);
        self
    }

    pub(crate) fn build(self) -> FrameRecord {
        FrameRecord::new(self.fields).unwrap()
    }
}
