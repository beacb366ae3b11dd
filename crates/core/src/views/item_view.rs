use dslv_viz_protocol::{Point, PrimitiveId, Rect, RenderCommand, Surface, TextAlign, ThemeToken};
use thiserror::Error;

use crate::config::ViewConfig;
use crate::model::{FrameRecord, ItemGeometry, ItemId, Target};

/// A view was asked to show an item its frame does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("item {id} is not in the frame")]
pub struct ItemNotInFrameError {
    pub id: ItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// The dragged item's own slot.
    Source,
    /// The blank gap opened in front of a drop target.
    Gap,
}

/// A highlighted span in list coordinates, `[top, top + height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub top: i32,
    pub height: i32,
}

impl Highlight {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// The highlight an item carries in `frame`, if any.
///
/// The source item is shaded over its full height. A target item gets a
/// gap of the recorded blank height on the side facing the source: at its
/// top when the target precedes the source, at its bottom otherwise (also
/// when nothing is being dragged). The first target wins if both name the
/// same item.
pub fn highlight_for(id: ItemId, geometry: ItemGeometry, frame: &FrameRecord) -> Option<Highlight> {
    if frame.source() == Some(id) {
        return Some(Highlight {
            kind: HighlightKind::Source,
            top: geometry.top,
            height: geometry.bottom - geometry.top,
        });
    }
    [frame.first_target(), frame.second_target()]
        .into_iter()
        .flatten()
        .find(|t| t.id == id)
        .map(|t| gap(t, geometry, frame.source()))
}

fn gap(target: Target, geometry: ItemGeometry, source: Option<ItemId>) -> Highlight {
    let top = if source.is_some_and(|s| target.id < s) {
        geometry.top
    } else {
        geometry.bottom - target.gap_height
    };
    Highlight {
        kind: HighlightKind::Gap,
        top,
        height: target.gap_height,
    }
}

/// What a [`ItemView::reassign`] call touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassignOutcome {
    pub relabeled: bool,
    pub moved: bool,
    pub edge_moved: bool,
    pub highlight_changed: bool,
}

impl ReassignOutcome {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// The on-screen presence of one list item: two boundary lines, a drop-edge
/// line, a centered label and at most one highlight region.
///
/// Primitives are created once and edited in place when the view moves or
/// is recycled for another item. `destroy` consumes the view, so the
/// primitives are released exactly once.
#[derive(Debug)]
pub struct ItemView {
    id: ItemId,
    geometry: ItemGeometry,
    width: f64,
    upper: PrimitiveId,
    lower: PrimitiveId,
    edge: PrimitiveId,
    label: PrimitiveId,
    highlight: Option<(Highlight, PrimitiveId)>,
}

impl ItemView {
    pub fn create<S: Surface + ?Sized>(
        surface: &mut S,
        id: ItemId,
        frame: &FrameRecord,
        config: &ViewConfig,
    ) -> Result<Self, ItemNotInFrameError> {
        let geometry = frame.geometry(id).ok_or(ItemNotInFrameError { id })?;
        let width = config.width;
        let highlight = highlight_for(id, geometry, frame)
            .map(|h| (h, surface.insert(highlight_rect(h, width))));

        Ok(Self {
            id,
            geometry,
            width,
            upper: surface.insert(boundary_line(geometry.top, width)),
            lower: surface.insert(boundary_line(geometry.bottom, width)),
            edge: surface.insert(edge_line(geometry.edge, width)),
            label: surface.insert(label(id, geometry, width)),
            highlight,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn geometry(&self) -> ItemGeometry {
        self.geometry
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight.map(|(h, _)| h)
    }

    /// Every primitive this view currently owns.
    pub fn primitives(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        [self.upper, self.lower, self.edge, self.label]
            .into_iter()
            .chain(self.highlight.map(|(_, p)| p))
    }

    pub fn present_in(&self, frame: &FrameRecord) -> bool {
        frame.contains(self.id)
    }

    /// Point this view at `id` as laid out in `frame`, editing only the
    /// primitives whose content changed.
    pub fn reassign<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        id: ItemId,
        frame: &FrameRecord,
    ) -> Result<ReassignOutcome, ItemNotInFrameError> {
        let geometry = frame.geometry(id).ok_or(ItemNotInFrameError { id })?;
        let previous = self.geometry;
        let mut outcome = ReassignOutcome {
            relabeled: id != self.id,
            moved: geometry.top != previous.top || geometry.bottom != previous.bottom,
            edge_moved: geometry.edge != previous.edge,
            highlight_changed: false,
        };
        self.id = id;
        self.geometry = geometry;

        if outcome.moved {
            surface.replace(self.upper, boundary_line(geometry.top, self.width));
            surface.replace(self.lower, boundary_line(geometry.bottom, self.width));
        }
        if outcome.moved || outcome.relabeled {
            surface.replace(self.label, label(id, geometry, self.width));
        }
        if outcome.edge_moved {
            surface.replace(self.edge, edge_line(geometry.edge, self.width));
        }
        outcome.highlight_changed = self.check_highlight(surface, frame);

        Ok(outcome)
    }

    /// Release every primitive owned by this view.
    pub fn destroy<S: Surface + ?Sized>(self, surface: &mut S) {
        for id in self.primitives() {
            surface.remove(id);
        }
    }

    fn check_highlight<S: Surface + ?Sized>(&mut self, surface: &mut S, frame: &FrameRecord) -> bool {
        let desired = highlight_for(self.id, self.geometry, frame);
        if desired == self.highlight() {
            return false;
        }
        self.highlight = match (self.highlight.take(), desired) {
            (Some((_, primitive)), Some(h)) => {
                surface.replace(primitive, highlight_rect(h, self.width));
                Some((h, primitive))
            }
            (Some((_, primitive)), None) => {
                surface.remove(primitive);
                None
            }
            (None, Some(h)) => Some((h, surface.insert(highlight_rect(h, self.width)))),
            (None, None) => None,
        };
        true
    }
}

// List coordinates grow downward; plot space grows upward.
fn plot_y(list_y: i32) -> f64 {
    -f64::from(list_y)
}

fn horizontal(list_y: i32, width: f64, color: ThemeToken, dashed: bool) -> RenderCommand {
    let y = plot_y(list_y);
    RenderCommand::DrawLine {
        from: Point::new(0.0, y),
        to: Point::new(width, y),
        color,
        width: 1.0,
        dashed,
    }
}

fn boundary_line(list_y: i32, width: f64) -> RenderCommand {
    horizontal(list_y, width, ThemeToken::ItemBoundary, false)
}

fn edge_line(list_y: i32, width: f64) -> RenderCommand {
    horizontal(list_y, width, ThemeToken::EdgeIndicator, true)
}

fn label(id: ItemId, geometry: ItemGeometry, width: f64) -> RenderCommand {
    let mid = (f64::from(geometry.top) + f64::from(geometry.bottom)) / 2.0;
    RenderCommand::DrawText {
        position: Point::new(width / 2.0, -mid),
        text: id.to_string(),
        color: ThemeToken::ItemLabel,
        align: TextAlign::Center,
    }
}

fn highlight_rect(h: Highlight, width: f64) -> RenderCommand {
    let fill = match h.kind {
        HighlightKind::Source => ThemeToken::SourceHighlight,
        HighlightKind::Gap => ThemeToken::GapHighlight,
    };
    RenderCommand::DrawRect {
        rect: Rect::new(0.0, plot_y(h.bottom()), width, f64::from(h.height)),
        fill: Some(fill),
        stroke: None,
        dashed: false,
    }
}
