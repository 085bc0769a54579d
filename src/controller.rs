//! Banner orchestration.
//!
//! The controller owns the image list, the auto-advance ticker and at most
//! one slide transition. It never touches a clock or the screen directly:
//! the host calls [`BannerController::advance`] once per frame and the
//! controller draws through its [`Surface`].

use std::time::Duration;
use tracing::{debug, info, trace};

use crate::command::Command;
use crate::config::BannerConfig;
use crate::error::{BannerError, PreloadError};
use crate::events::{Event, EventEmitter};
use crate::ports::{ImageHost, LoadOutcome, Surface};
use crate::preloader::Preloader;
use crate::state::{BannerPhase, BannerState};
use crate::ticker::Ticker;
use crate::transition::{Direction, SlideOptions, SlideTransition, TransitionState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerEvent {
    Progress { fraction: f64 },
    Ready { count: usize },
    Change { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEventKind {
    Progress,
    Ready,
    Change,
}

impl Event for BannerEvent {
    type Kind = BannerEventKind;

    fn kind(&self) -> BannerEventKind {
        match self {
            Self::Progress { .. } => BannerEventKind::Progress,
            Self::Ready { .. } => BannerEventKind::Ready,
            Self::Change { .. } => BannerEventKind::Change,
        }
    }
}

pub struct BannerController<S, H>
where
    S: Surface,
    S::Image: Clone,
    H: ImageHost<Image = S::Image>,
{
    surface: S,
    host: H,
    slide_speed: u32,
    load_timeout: Option<Duration>,
    state: BannerState<S::Image>,
    auto_advance: Ticker,
    preloader: Option<Preloader<S::Image>>,
    transition: Option<SlideTransition>,
    events: EventEmitter<BannerEvent>,
}

impl<S, H> BannerController<S, H>
where
    S: Surface,
    S::Image: Clone,
    H: ImageHost<Image = S::Image>,
{
    pub fn new(surface: S, host: H, config: &BannerConfig) -> Self {
        Self {
            surface,
            host,
            slide_speed: config.animation_speed,
            load_timeout: config.load_timeout(),
            state: BannerState::new(),
            auto_advance: Ticker::new(config.switch_time()),
            preloader: None,
            transition: None,
            events: EventEmitter::new(),
        }
    }

    /// Whether the surface offers the pixel access transitions need.
    /// [`BannerController::animate`] refuses to run without it.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.surface.supports_pixel_access()
    }

    /// Starts preloading `names` under `base_path`. Once every image has
    /// arrived the first one is drawn and auto-advance starts.
    ///
    /// Calling it again while a batch is still loading adds the names to
    /// that batch, which then completes once with every image.
    pub fn animate<N: AsRef<str>>(&mut self, names: &[N], base_path: &str) -> Result<(), BannerError> {
        if !self.is_supported() {
            return Err(BannerError::UnsupportedEnvironment);
        }

        if names.is_empty() {
            return Err(BannerError::EmptyImageSet);
        }

        let timeout = self.load_timeout;
        self.preloader
            .get_or_insert_with(|| Preloader::new(timeout))
            .load(names, base_path, &mut self.host);
        Ok(())
    }

    pub fn show_next(&mut self) -> Result<bool, BannerError> {
        self.step(1)
    }

    pub fn show_prev(&mut self) -> Result<bool, BannerError> {
        self.step(-1)
    }

    /// Slides forward to `index` (modulo the image count), restarting the
    /// auto-advance interval.
    pub fn set_position(&mut self, index: usize) -> Result<bool, BannerError> {
        if self.is_transitioning() {
            debug!(index, "seek ignored, transition running");
            return Ok(false);
        }

        let target = self.state.wrap_index(index)?;
        self.with_auto_advance_paused(|banner| banner.slide_to(target, Direction::Forward))?;
        Ok(true)
    }

    /// Next image on user request; auto-advance restarts its interval.
    pub fn user_next(&mut self) -> Result<bool, BannerError> {
        self.with_auto_advance_paused(Self::show_next)
    }

    pub fn user_prev(&mut self) -> Result<bool, BannerError> {
        self.with_auto_advance_paused(Self::show_prev)
    }

    pub fn start(&mut self) {
        debug!("auto-advance on");
        self.auto_advance.start();
    }

    pub fn stop(&mut self) {
        debug!("auto-advance off");
        self.auto_advance.stop();
    }

    pub fn apply(&mut self, command: Command) -> Result<(), BannerError> {
        trace!(?command, "applying command");
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Next => {
                self.user_next()?;
            }
            Command::Prev => {
                self.user_prev()?;
            }
            Command::Seek(index) => {
                self.set_position(index)?;
            }
        }
        Ok(())
    }

    /// Runs one host frame: collects finished loads, steps the running
    /// transition, then fires due auto-advance ticks.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), BannerError> {
        self.pump_loads(elapsed)?;
        self.step_transition(elapsed);

        self.auto_advance.elapse(elapsed);
        while let Some(count) = self.auto_advance.next_tick() {
            if self.is_transitioning() || self.state.is_empty() {
                trace!(count, "auto-advance tick dropped");
                continue;
            }
            self.show_next()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> BannerPhase {
        if self.is_transitioning() {
            BannerPhase::Transitioning
        } else if !self.state.is_empty() {
            BannerPhase::Displaying
        } else if self.preloader.is_some() {
            BannerPhase::Loading
        } else {
            BannerPhase::Idle
        }
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.as_ref().is_some_and(SlideTransition::is_running)
    }

    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_running()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn transition_state(&self) -> Option<TransitionState> {
        self.transition.as_ref().map(SlideTransition::state)
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter<BannerEvent> {
        &mut self.events
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn step(&mut self, offset: isize) -> Result<bool, BannerError> {
        if self.is_transitioning() {
            debug!(offset, "step ignored, transition running");
            return Ok(false);
        }

        let target = self.state.offset_index(offset)?;
        self.slide_to(target, Direction::from_sign(offset.signum() as i32))?;
        Ok(true)
    }

    fn slide_to(&mut self, target: usize, direction: Direction) -> Result<(), BannerError> {
        let from = self.state.current_index();
        let (Some(outgoing), Some(incoming)) = (self.state.get(from), self.state.get(target)) else {
            return Err(BannerError::EmptyImageSet);
        };

        let outgoing = self.surface.rasterize(outgoing);
        let incoming = self.surface.rasterize(incoming);
        let mut transition =
            SlideTransition::new(outgoing, incoming, SlideOptions::new(self.slide_speed, direction))?;
        transition.start();

        debug!(from, to = target, ?direction, "sliding");
        self.state.set_current(target);
        self.transition = Some(transition);
        Ok(())
    }

    fn with_auto_advance_paused<T>(
        &mut self,
        action: impl FnOnce(&mut Self) -> Result<T, BannerError>,
    ) -> Result<T, BannerError> {
        let was_running = self.auto_advance.is_running();
        self.auto_advance.stop();
        let result = action(self);
        if was_running {
            self.auto_advance.start();
        }
        result
    }

    fn pump_loads(&mut self, elapsed: Duration) -> Result<(), BannerError> {
        let Some(preloader) = self.preloader.as_mut() else {
            // Leftovers of a failed batch; nobody is waiting for them.
            while let Some(LoadOutcome::Loaded { name, .. } | LoadOutcome::Failed { name, .. }) = self.host.poll() {
                trace!(%name, "discarding unclaimed load");
            }
            return Ok(());
        };

        match Self::drain_loads(preloader, &mut self.host, &mut self.events, elapsed) {
            Ok(Some(images)) => {
                self.preloader = None;
                self.on_images_loaded(images);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(error) => {
                self.preloader = None;
                Err(error.into())
            }
        }
    }

    fn drain_loads(
        preloader: &mut Preloader<S::Image>,
        host: &mut H,
        events: &mut EventEmitter<BannerEvent>,
        elapsed: Duration,
    ) -> Result<Option<Vec<S::Image>>, PreloadError> {
        while let Some(outcome) = host.poll() {
            if let Some(images) = preloader.receive(outcome)? {
                return Ok(Some(images));
            }
            events.emit(&BannerEvent::Progress {
                fraction: preloader.progress(),
            });
        }

        preloader.elapse(elapsed)?;
        Ok(None)
    }

    fn on_images_loaded(&mut self, images: Vec<S::Image>) {
        let count = images.len();
        self.state.append(images);
        info!(count, total = self.state.len(), "banner ready");

        self.auto_advance.start();
        self.show_current();
        self.events.emit(&BannerEvent::Ready { count });
    }

    fn step_transition(&mut self, elapsed: Duration) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        let update = transition.advance(elapsed);
        if let Some(frame) = &update.frame {
            self.surface.put_pixels(frame);
        }

        if update.completed {
            self.transition = None;
            self.show_current();

            let index = self.state.current_index();
            debug!(index, "image changed");
            self.events.emit(&BannerEvent::Change { index });
        }
    }

    fn show_current(&mut self) {
        if let Some(image) = self.state.current() {
            self.surface.draw_image(image);
        }
    }
}
