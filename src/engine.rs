//! The host frame loop.
//!
//! An [`Engine`] pulls commands from a [`Presenter`], advances the banner by
//! the presenter's frame time and hands the resulting frame back to it.

use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::command::Command;
use crate::controller::BannerController;
use crate::error::BannerError;
use crate::host::{MemorySurface, SourceImage};
use crate::pixel_buffer::PixelBuffer;
use crate::ports::ImageHost;
use crate::state::BannerPhase;

/// Where finished frames go: a window, a video encoder, a test probe.
pub trait Presenter {
    /// Time the banner should advance before the next frame.
    fn frame_time(&mut self) -> Duration;

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), BannerError>;

    fn poll_commands(&mut self) -> Vec<Command> {
        Vec::new()
    }

    fn is_closed(&self) -> bool {
        false
    }
}

pub struct Engine {
    max_frames: Option<u64>,
}

impl Engine {
    /// `max_frames` of `None` runs until the presenter closes.
    #[must_use]
    pub fn new(max_frames: Option<u64>) -> Self {
        Self { max_frames }
    }

    /// Runs the loop and returns the number of frames presented.
    pub fn run<H, P>(
        &self,
        banner: &mut BannerController<MemorySurface, H>,
        presenter: &mut P,
    ) -> Result<u64, BannerError>
    where
        H: ImageHost<Image = SourceImage>,
        P: Presenter,
    {
        let mut frames = 0;
        while self.max_frames.is_none_or(|max| frames < max) {
            if presenter.is_closed() {
                debug!(frames, "presenter closed");
                break;
            }

            for command in presenter.poll_commands() {
                banner.apply(command)?;
            }

            let dt = presenter.frame_time();
            banner.advance(dt)?;
            presenter.present(banner.surface().frame())?;
            frames += 1;
        }

        info!(frames, "engine stopped");
        Ok(frames)
    }
}

/// Blocks until the banner has finished loading, feeding it wall-clock time
/// so a configured load timeout can fire.
pub fn wait_until_ready<H>(
    banner: &mut BannerController<MemorySurface, H>,
    poll_interval: Duration,
) -> Result<(), BannerError>
where
    H: ImageHost<Image = SourceImage>,
{
    let mut last = Instant::now();
    while banner.phase() == BannerPhase::Loading {
        thread::sleep(poll_interval);
        let now = Instant::now();
        banner.advance(now - last)?;
        last = now;
    }
    Ok(())
}
