use std::fmt;

use log::debug;
use thiserror::Error;

use crate::model::FrameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no frames to navigate")]
pub struct NoFramesError;

/// A discrete navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Next,
    Previous,
    PageForward,
    PageBackward,
}

impl NavEvent {
    /// Map a logical key name to an event. Unknown names yield `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "next" => Some(Self::Next),
            "previous" => Some(Self::Previous),
            "page-forward" => Some(Self::PageForward),
            "page-backward" => Some(Self::PageBackward),
            _ => None,
        }
    }
}

/// The end of the frame sequence a navigation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Beginning,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Beginning => f.write_str("reached beginning"),
            Boundary::End => f.write_str("reached end"),
        }
    }
}

/// Result of one navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub from: usize,
    pub to: usize,
    /// Set when the requested index fell outside the sequence.
    pub clamped: Option<Boundary>,
}

impl Navigation {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Holds the recorded frames and the index of the displayed one.
#[derive(Debug)]
pub struct NavigationController {
    frames: Vec<FrameRecord>,
    current: usize,
    page_size: usize,
}

impl NavigationController {
    /// `start` selects the first displayed frame; a negative value means the
    /// last frame, and values past the end clamp to it.
    pub fn new(
        frames: Vec<FrameRecord>,
        start: i64,
        page_size: usize,
    ) -> Result<Self, NoFramesError> {
        let last = frames.len().checked_sub(1).ok_or(NoFramesError)?;
        let current = usize::try_from(start).map_or(last, |start| start.min(last));
        Ok(Self {
            frames,
            current,
            page_size,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> &FrameRecord {
        &self.frames[self.current]
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move the current index, clamping at either end of the sequence.
    pub fn navigate(&mut self, event: NavEvent) -> Navigation {
        let from = self.current;
        let last = self.frames.len() - 1;
        let (to, clamped) = match event {
            NavEvent::Next => forward(from, 1, last),
            NavEvent::PageForward => forward(from, self.page_size, last),
            NavEvent::Previous => backward(from, 1),
            NavEvent::PageBackward => backward(from, self.page_size),
        };
        if let Some(boundary) = clamped {
            debug!("{event:?} from frame {from}: {boundary}");
        }
        self.current = to;
        Navigation { from, to, clamped }
    }
}

fn forward(from: usize, step: usize, last: usize) -> (usize, Option<Boundary>) {
    match from.checked_add(step) {
        Some(to) if to <= last => (to, None),
        _ => (last, Some(Boundary::End)),
    }
}

fn backward(from: usize, step: usize) -> (usize, Option<Boundary>) {
    match from.checked_sub(step) {
        Some(to) => (to, None),
        None => (0, Some(Boundary::Beginning)),
    }
}
