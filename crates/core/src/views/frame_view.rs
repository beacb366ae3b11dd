use std::collections::{BTreeMap, HashSet};

use dslv_viz_protocol::{Bounds, Point, PrimitiveId, Rect, RenderCommand, Surface, ThemeToken};
use log::debug;

use super::item_view::{ItemNotInFrameError, ItemView};
use super::pool::{ItemPool, SlotHandle};
use crate::config::ViewConfig;
use crate::model::{FrameRecord, ItemId};

/// How a reconcile pass treated the item views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Views whose item stayed in the frame.
    pub updated: usize,
    /// Views handed over to an item that just appeared.
    pub recycled: usize,
    /// Views built from scratch.
    pub created: usize,
    /// Views torn down because nothing needed them.
    pub destroyed: usize,
}

/// The whole-canvas picture of the displayed frame.
///
/// Owns the float indicator, the optional touch indicator, the dashed
/// view boundary and, through its [`ItemPool`], one [`ItemView`] per
/// visible item.
#[derive(Debug)]
pub struct FrameView {
    config: ViewConfig,
    float_y: i32,
    float_line: PrimitiveId,
    touch: Option<(i32, PrimitiveId)>,
    boundary: PrimitiveId,
    pool: ItemPool,
    live: BTreeMap<ItemId, SlotHandle>,
    reconciles: usize,
}

impl FrameView {
    /// Set up the canvas for `frame` and build a view for each of its items.
    pub fn initialize<S: Surface + ?Sized>(
        surface: &mut S,
        frame: &FrameRecord,
        config: ViewConfig,
    ) -> Result<Self, ItemNotInFrameError> {
        let view_height = f64::from(frame.view_height());
        surface.set_bounds(Bounds {
            x_min: -config.x_buffer,
            x_max: config.width + config.x_buffer,
            y_min: -config.y_buffer - view_height,
            y_max: config.y_buffer,
        });

        let float_line = surface.insert(indicator(frame.float_y(), &config, ThemeToken::FloatIndicator, 2.0));
        let boundary = surface.insert(RenderCommand::DrawRect {
            rect: Rect::new(0.0, -view_height, config.width, view_height),
            fill: None,
            stroke: Some(ThemeToken::ViewBoundary),
            dashed: true,
        });
        let touch = frame.touch_y().map(|y| {
            (y, surface.insert(indicator(y, &config, ThemeToken::TouchIndicator, 1.0)))
        });

        let mut view = Self {
            config,
            float_y: frame.float_y(),
            float_line,
            touch,
            boundary,
            pool: ItemPool::new(),
            live: BTreeMap::new(),
            reconciles: 0,
        };
        view.reconcile(surface, frame)?;
        Ok(view)
    }

    /// Bring the canvas in line with `frame`.
    ///
    /// Views whose item is still visible are updated in place. Views whose
    /// item left are handed to newly visible items before anything new is
    /// built; leftovers are destroyed. The surface is flushed once at the
    /// end.
    pub fn reconcile<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &FrameRecord,
    ) -> Result<ReconcileStats, ItemNotInFrameError> {
        self.update_indicators(surface, frame);

        let mut stats = ReconcileStats::default();
        let mut updated = HashSet::with_capacity(frame.len());
        let mut recyclable = Vec::new();

        for (id, handle) in std::mem::take(&mut self.live) {
            let Some(view) = self.pool.get_mut(handle) else {
                continue;
            };
            if view.present_in(frame) {
                view.reassign(surface, id, frame)?;
                updated.insert(id);
                self.live.insert(id, handle);
                stats.updated += 1;
            } else {
                recyclable.push(handle);
            }
        }

        for &id in frame.positions() {
            if updated.contains(&id) {
                continue;
            }
            let handle = match recyclable.pop() {
                Some(handle) => {
                    if let Some(view) = self.pool.get_mut(handle) {
                        view.reassign(surface, id, frame)?;
                    }
                    stats.recycled += 1;
                    handle
                }
                None => {
                    let view = ItemView::create(surface, id, frame, &self.config)?;
                    stats.created += 1;
                    self.pool.checkin(view)
                }
            };
            self.live.insert(id, handle);
        }

        for handle in recyclable {
            if let Some(view) = self.pool.release(handle) {
                view.destroy(surface);
                stats.destroyed += 1;
            }
        }

        surface.flush();
        self.reconciles += 1;
        debug!(
            "reconciled {} items: {} updated, {} recycled, {} created, {} destroyed",
            frame.len(),
            stats.updated,
            stats.recycled,
            stats.created,
            stats.destroyed
        );
        Ok(stats)
    }

    /// Release every primitive and present the empty canvas.
    pub fn destroy<S: Surface + ?Sized>(mut self, surface: &mut S) {
        for handle in std::mem::take(&mut self.live).into_values() {
            if let Some(view) = self.pool.release(handle) {
                view.destroy(surface);
            }
        }
        surface.remove(self.float_line);
        surface.remove(self.boundary);
        if let Some((_, line)) = self.touch {
            surface.remove(line);
        }
        surface.flush();
    }

    /// Identifiers with a live view, ascending.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.live.keys().copied()
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemView> {
        self.live.get(&id).and_then(|&handle| self.pool.get(handle))
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemView> + '_ {
        self.live.values().filter_map(|&handle| self.pool.get(handle))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Reconcile passes run so far, including the one in `initialize`.
    pub fn reconciles(&self) -> usize {
        self.reconciles
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    fn update_indicators<S: Surface + ?Sized>(&mut self, surface: &mut S, frame: &FrameRecord) {
        if frame.float_y() != self.float_y {
            self.float_y = frame.float_y();
            surface.replace(
                self.float_line,
                indicator(self.float_y, &self.config, ThemeToken::FloatIndicator, 2.0),
            );
        }

        self.touch = match (self.touch.take(), frame.touch_y()) {
            (Some((old, line)), Some(y)) => {
                if old != y {
                    surface.replace(line, indicator(y, &self.config, ThemeToken::TouchIndicator, 1.0));
                }
                Some((y, line))
            }
            (Some((_, line)), None) => {
                surface.remove(line);
                None
            }
            (None, Some(y)) => Some((
                y,
                surface.insert(indicator(y, &self.config, ThemeToken::TouchIndicator, 1.0)),
            )),
            (None, None) => None,
        };
    }
}

fn indicator(list_y: i32, config: &ViewConfig, color: ThemeToken, width: f64) -> RenderCommand {
    let y = -f64::from(list_y);
    RenderCommand::DrawLine {
        from: Point::new(0.0, y),
        to: Point::new(config.width, y),
        color,
        width,
        dashed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::test_support::{FrameBuilder, rows};
    use crate::views::HighlightKind;

    fn ids(view: &FrameView) -> Vec<ItemId> {
        view.ids().collect()
    }

    #[test]
    fn initialize_builds_one_view_per_item() {
        let frame = FrameBuilder::new(rows(&[3, 4, 5], 40)).float_y(60).build();
        let mut scene = Scene::new();
        let view = FrameView::initialize(&mut scene, &frame, ViewConfig::default()).unwrap();

        assert_eq!(ids(&view), vec![3, 4, 5]);
        assert_eq!(view.reconciles(), 1);
        assert_eq!(scene.flushes(), 1);
        // float line + boundary box + 4 primitives per item
        assert_eq!(scene.len(), 2 + 3 * 4);
        assert_eq!(
            scene.bounds(),
            Some(Bounds {
                x_min: -40.0,
                x_max: 140.0,
                y_min: -500.0,
                y_max: 100.0,
            })
        );
    }

    #[test]
    fn scrolling_recycles_instead_of_creating() {
        let first = FrameBuilder::new(rows(&[0, 1, 2, 3], 40)).build();
        let second = FrameBuilder::new(rows(&[2, 3, 4, 5], 40)).build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &first, ViewConfig::default()).unwrap();
        let inserted = scene.inserted();

        let stats = view.reconcile(&mut scene, &second).unwrap();
        assert_eq!(
            stats,
            ReconcileStats {
                updated: 2,
                recycled: 2,
                created: 0,
                destroyed: 0
            }
        );
        assert_eq!(ids(&view), vec![2, 3, 4, 5]);
        assert_eq!(scene.inserted(), inserted);
        assert_eq!(view.item(4).map(|v| v.geometry().top), Some(80));
    }

    #[test]
    fn shrinking_destroys_leftovers() {
        let first = FrameBuilder::new(rows(&[0, 1, 2], 40)).build();
        let second = FrameBuilder::new(rows(&[1], 40)).build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &first, ViewConfig::default()).unwrap();

        let stats = view.reconcile(&mut scene, &second).unwrap();
        assert_eq!(stats.destroyed, 2);
        assert_eq!(stats.created, 0);
        assert_eq!(ids(&view), vec![1]);
        assert_eq!(scene.len(), 2 + 4);
    }

    #[test]
    fn growing_recycles_first_then_creates() {
        let first = FrameBuilder::new(rows(&[0, 1], 40)).build();
        let second = FrameBuilder::new(rows(&[5, 6, 7], 40)).build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &first, ViewConfig::default()).unwrap();

        let stats = view.reconcile(&mut scene, &second).unwrap();
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.recycled, 2);
        assert_eq!(stats.created, 1);
        assert_eq!(ids(&view), vec![5, 6, 7]);
    }

    #[test]
    fn reconciling_twice_changes_nothing() {
        let first = FrameBuilder::new(rows(&[0, 1, 2], 40)).build();
        let second = FrameBuilder::new(rows(&[1, 2, 3], 30))
            .source(2)
            .first_target(1, 12)
            .float_y(45)
            .touch_y(44)
            .build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &first, ViewConfig::default()).unwrap();
        view.reconcile(&mut scene, &second).unwrap();
        let snapshot = scene.commands();
        let (inserted, removed) = (scene.inserted(), scene.removed());

        view.reconcile(&mut scene, &second).unwrap();
        assert_eq!(scene.commands(), snapshot);
        assert_eq!((scene.inserted(), scene.removed()), (inserted, removed));
    }

    #[test]
    fn indicators_follow_the_frame() {
        let first = FrameBuilder::new(rows(&[0], 40)).float_y(10).build();
        let second = FrameBuilder::new(rows(&[0], 40)).float_y(30).touch_y(28).build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &first, ViewConfig::default()).unwrap();
        let float_line = view.float_line;

        view.reconcile(&mut scene, &second).unwrap();
        assert!(matches!(
            scene.get(float_line),
            Some(RenderCommand::DrawLine { from, .. }) if from.y == -30.0
        ));
        assert!(view.touch.is_some());

        view.reconcile(&mut scene, &first).unwrap();
        assert!(view.touch.is_none());
        assert_eq!(scene.len(), 2 + 4);
    }

    #[test]
    fn highlights_track_roles_across_frames() {
        let idle = FrameBuilder::new(rows(&[1, 2, 3], 40)).build();
        let dragging = FrameBuilder::new(rows(&[1, 2, 3], 40))
            .source(2)
            .first_target(1, 10)
            .build();
        let mut scene = Scene::new();
        let mut view = FrameView::initialize(&mut scene, &idle, ViewConfig::default()).unwrap();
        assert!(view.items().all(|v| v.highlight().is_none()));

        view.reconcile(&mut scene, &dragging).unwrap();
        let kind = |view: &FrameView, id| view.item(id).and_then(ItemView::highlight).map(|h| h.kind);
        assert_eq!(kind(&view, 2), Some(HighlightKind::Source));
        assert_eq!(kind(&view, 1), Some(HighlightKind::Gap));
        assert_eq!(kind(&view, 3), None);

        view.reconcile(&mut scene, &idle).unwrap();
        assert!(view.items().all(|v| v.highlight().is_none()));
    }

    #[test]
    fn destroy_clears_the_surface() {
        let frame = FrameBuilder::new(rows(&[0, 1], 40)).source(0).touch_y(5).build();
        let mut scene = Scene::new();
        let view = FrameView::initialize(&mut scene, &frame, ViewConfig::default()).unwrap();
        assert!(!scene.is_empty());
        view.destroy(&mut scene);
        assert!(scene.is_empty());
        assert_eq!(scene.flushes(), 2);
    }
}
