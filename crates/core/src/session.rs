use dslv_viz_protocol::Surface;
use log::debug;
use thiserror::Error;

use crate::config::ViewConfig;
use crate::model::FrameRecord;
use crate::navigation::{NavEvent, Navigation, NavigationController, NoFramesError};
use crate::views::{FrameView, ItemNotInFrameError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    NoFrames(#[from] NoFramesError),
    #[error("view out of sync with frame: {0}")]
    View(#[from] ItemNotInFrameError),
}

/// One viewing session: the drawing surface, the frame sequence with its
/// cursor, and the picture of the current frame.
#[derive(Debug)]
pub struct Session<S: Surface> {
    surface: S,
    navigation: NavigationController,
    view: FrameView,
}

impl<S: Surface> Session<S> {
    /// Draw the starting frame onto `surface`. A negative `start` opens the
    /// last frame.
    pub fn init(
        mut surface: S,
        frames: Vec<FrameRecord>,
        config: ViewConfig,
        start: i64,
    ) -> Result<Self, SessionError> {
        let navigation = NavigationController::new(frames, start, config.page_size)?;
        let view = FrameView::initialize(&mut surface, navigation.current_frame(), config)?;
        debug!(
            "session started at frame {} of {}",
            navigation.current_index(),
            navigation.len()
        );
        Ok(Self {
            surface,
            navigation,
            view,
        })
    }

    /// Apply a navigation event, redrawing only if the index moved.
    pub fn handle(&mut self, event: NavEvent) -> Result<Navigation, SessionError> {
        let step = self.navigation.navigate(event);
        if step.changed() {
            let stats = self
                .view
                .reconcile(&mut self.surface, self.navigation.current_frame())?;
            debug!("frame {} -> {}: {stats:?}", step.from, step.to);
        }
        Ok(step)
    }

    /// Apply the event bound to a logical key name; unknown keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> Result<Option<Navigation>, SessionError> {
        NavEvent::from_key_name(key)
            .map(|event| self.handle(event))
            .transpose()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn view(&self) -> &FrameView {
        &self.view
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    pub fn current_frame(&self) -> &FrameRecord {
        self.navigation.current_frame()
    }

    /// Tear down every primitive and hand the surface back.
    pub fn shutdown(self) -> S {
        let Self {
            mut surface, view, ..
        } = self;
        view.destroy(&mut surface);
        surface
    }
}
