//! Property-based invariant tests for frame reconciliation.
//!
//! 1. After a reconcile the live identifiers equal the frame's positions
//! 2. Reconciling the same frame twice is a no-op
//! 3. Views are recycled before any are created
//! 4. Highlight exclusivity: a source highlight iff the item is the source
//! 5. The surface holds exactly the primitives the views own

use std::collections::BTreeSet;

use dslv_viz_core::model::{FrameFields, FrameRecord, ItemId, Target};
use dslv_viz_core::views::{FrameView, HighlightKind};
use dslv_viz_core::{Scene, ViewConfig};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct FrameSpec {
    ids: Vec<ItemId>,
    row_height: i32,
    source: Option<usize>,
    target: Option<(usize, i32)>,
    float_y: i32,
}

fn frame_strategy() -> impl Strategy<Value = FrameSpec> {
    (
        prop::collection::btree_set(0i32..24, 0..10),
        1i32..60,
        prop::option::of(0usize..10),
        prop::option::of((0usize..10, 0i32..60)),
        0i32..400,
    )
        .prop_map(|(ids, row_height, source, target, float_y)| FrameSpec {
            ids: ids.into_iter().collect(),
            row_height,
            source,
            target,
            float_y,
        })
}

fn build(spec: &FrameSpec) -> FrameRecord {
    let n = spec.ids.len();
    let pick = |i: usize| (n > 0).then(|| spec.ids[i % n]);
    let tops: Vec<i32> = (0..n as i32).map(|i| i * spec.row_height).collect();
    let fields = FrameFields {
        positions: spec.ids.clone(),
        bottoms: tops.iter().map(|t| t + spec.row_height).collect(),
        edges: tops.clone(),
        tops,
        source: spec.source.and_then(pick),
        first_target: spec
            .target
            .and_then(|(i, gap_height)| pick(i).map(|id| Target { id, gap_height })),
        view_height: 600,
        float_y: spec.float_y,
        ..FrameFields::default()
    };
    FrameRecord::new(fields).unwrap()
}

fn id_set(view: &FrameView) -> BTreeSet<ItemId> {
    view.ids().collect()
}

fn position_set(frame: &FrameRecord) -> BTreeSet<ItemId> {
    frame.positions().iter().copied().collect()
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn live_ids_match_positions(specs in prop::collection::vec(frame_strategy(), 1..8)) {
        let frames: Vec<FrameRecord> = specs.iter().map(build).collect();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &frames[0], ViewConfig::default()).unwrap();
        prop_assert_eq!(id_set(&view), position_set(&frames[0]));

        for frame in &frames[1..] {
            view.reconcile(&mut scene, frame).unwrap();
            prop_assert_eq!(id_set(&view), position_set(frame));
            prop_assert_eq!(view.len(), frame.len());
        }
    }

    #[test]
    fn second_reconcile_is_idempotent(a in frame_strategy(), b in frame_strategy()) {
        let (a, b) = (build(&a), build(&b));
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &a, ViewConfig::default()).unwrap();
        view.reconcile(&mut scene, &b).unwrap();
        let snapshot = scene.commands();
        let inserted = scene.inserted();

        let stats = view.reconcile(&mut scene, &b).unwrap();
        prop_assert_eq!(stats.updated, b.len());
        prop_assert_eq!(stats.recycled + stats.created + stats.destroyed, 0);
        prop_assert_eq!(scene.commands(), snapshot);
        prop_assert_eq!(scene.inserted(), inserted);
    }

    #[test]
    fn recycles_before_creating(a in frame_strategy(), b in frame_strategy()) {
        let (a, b) = (build(&a), build(&b));
        let (before, after) = (position_set(&a), position_set(&b));
        let added = after.difference(&before).count();
        let removed = before.difference(&after).count();

        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &a, ViewConfig::default()).unwrap();
        let stats = view.reconcile(&mut scene, &b).unwrap();

        prop_assert_eq!(stats.updated, before.intersection(&after).count());
        prop_assert_eq!(stats.recycled, added.min(removed));
        prop_assert_eq!(stats.created, added.saturating_sub(removed));
        prop_assert_eq!(stats.destroyed, removed.saturating_sub(added));
    }

    #[test]
    fn highlights_are_exclusive(specs in prop::collection::vec(frame_strategy(), 1..6)) {
        let frames: Vec<FrameRecord> = specs.iter().map(build).collect();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &frames[0], ViewConfig::default()).unwrap();

        for frame in &frames {
            view.reconcile(&mut scene, frame).unwrap();
            let mut highlighted = 0;
            for item in view.items() {
                let kind = item.highlight().map(|h| h.kind);
                prop_assert_eq!(
                    kind == Some(HighlightKind::Source),
                    frame.source() == Some(item.id())
                );
                highlighted += usize::from(kind.is_some());
            }
            // float line + boundary box + four per item + one per highlight
            prop_assert_eq!(scene.len(), 2 + 4 * frame.len() + highlighted);
        }
    }
}
