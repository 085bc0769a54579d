use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::PreloadError;
use crate::events::{Event, EventEmitter};
use crate::ports::{ImageHost, LoadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum PreloadEvent<I> {
    Progress { fraction: f64 },
    Complete { images: Vec<I> },
    Failed { resource: String, reason: String },
    TimedOut { loaded: usize, expected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadEventKind {
    Progress,
    Complete,
    Failed,
    TimedOut,
}

impl<I> Event for PreloadEvent<I> {
    type Kind = PreloadEventKind;

    fn kind(&self) -> PreloadEventKind {
        match self {
            Self::Progress { .. } => PreloadEventKind::Progress,
            Self::Complete { .. } => PreloadEventKind::Complete,
            Self::Failed { .. } => PreloadEventKind::Failed,
            Self::TimedOut { .. } => PreloadEventKind::TimedOut,
        }
    }
}

/// Loads batches of images through an [`ImageHost`] and reports progress.
///
/// Images are kept in the order their loads finished. A timeout is opt-in;
/// without one a load that never finishes keeps the preloader pending.
/// Outcomes for names this preloader never requested are ignored.
#[derive(Debug)]
pub struct Preloader<I> {
    expected: usize,
    pending: HashMap<String, usize>,
    loaded: Vec<I>,
    timeout: Option<Duration>,
    waited: Duration,
    timed_out: bool,
    events: EventEmitter<PreloadEvent<I>>,
}

impl<I: Clone> Preloader<I> {
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            expected: 0,
            pending: HashMap::new(),
            loaded: Vec::new(),
            timeout,
            waited: Duration::ZERO,
            timed_out: false,
            events: EventEmitter::new(),
        }
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter<PreloadEvent<I>> {
        &mut self.events
    }

    pub fn load<H, S>(&mut self, names: &[S], base_path: &str, host: &mut H)
    where
        H: ImageHost<Image = I>,
        S: AsRef<str>,
    {
        self.expected += names.len();
        debug!(
            requested = names.len(),
            expected = self.expected,
            base_path,
            "requesting images"
        );

        for name in names {
            *self.pending.entry(name.as_ref().to_string()).or_default() += 1;
            host.request(name.as_ref(), base_path);
        }
    }

    // Each request is owned once: a name requested twice accepts two outcomes.
    fn claim(&mut self, name: &str) -> bool {
        match self.pending.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.pending.remove(name);
                true
            }
            None => false,
        }
    }

    /// Feeds one finished load. Returns the full image list once every
    /// requested image has arrived.
    pub fn receive(&mut self, outcome: LoadOutcome<I>) -> Result<Option<Vec<I>>, PreloadError> {
        let name = match &outcome {
            LoadOutcome::Loaded { name, .. } | LoadOutcome::Failed { name, .. } => name,
        };
        if !self.claim(name) {
            debug!(%name, "ignoring outcome for an image this batch did not request");
            return Ok(None);
        }

        match outcome {
            LoadOutcome::Loaded { name, image } => {
                self.loaded.push(image);
                debug!(%name, loaded = self.loaded.len(), expected = self.expected, "image loaded");

                if self.loaded.len() == self.expected {
                    info!(count = self.loaded.len(), "all images loaded");
                    let images = self.loaded.clone();
                    self.events.emit(&PreloadEvent::Complete {
                        images: images.clone(),
                    });
                    Ok(Some(images))
                } else {
                    self.events.emit(&PreloadEvent::Progress {
                        fraction: self.progress(),
                    });
                    Ok(None)
                }
            }
            LoadOutcome::Failed { name, reason } => {
                warn!(%name, %reason, "image failed to load");
                self.events.emit(&PreloadEvent::Failed {
                    resource: name.clone(),
                    reason: reason.clone(),
                });
                Err(PreloadError::Failed {
                    resource: name,
                    reason,
                })
            }
        }
    }

    /// Counts time spent waiting for pending loads against the timeout.
    pub fn elapse(&mut self, elapsed: Duration) -> Result<(), PreloadError> {
        let Some(timeout) = self.timeout else {
            return Ok(());
        };

        if self.is_complete() || self.timed_out {
            return Ok(());
        }

        self.waited += elapsed;
        if self.waited < timeout {
            return Ok(());
        }

        self.timed_out = true;
        let (loaded, expected) = (self.loaded.len(), self.expected);
        warn!(loaded, expected, ?timeout, "image preload timed out");
        self.events.emit(&PreloadEvent::TimedOut { loaded, expected });
        Err(PreloadError::TimedOut { loaded, expected })
    }

    #[must_use]
    pub fn expected_count(&self) -> usize {
        self.expected
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.expected == 0 {
            return 0.0;
        }
        self.loaded.len() as f64 / self.expected as f64
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.expected > 0 && self.loaded.len() == self.expected
    }
}
