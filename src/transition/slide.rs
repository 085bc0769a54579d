use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::constants::{BYTES_PER_PIXEL, TRANSITION_TICK_INTERVAL};
use crate::error::TransitionError;
use crate::events::{Event, EventEmitter};
use crate::pixel_buffer::PixelBuffer;
use crate::ticker::Ticker;
use crate::transition::state::{Direction, SlideOptions, TransitionPhase, TransitionState};

#[derive(Debug, Clone)]
pub enum TransitionEvent {
    Frame(Rc<PixelBuffer>),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEventKind {
    Frame,
    Complete,
}

impl Event for TransitionEvent {
    type Kind = TransitionEventKind;

    fn kind(&self) -> TransitionEventKind {
        match self {
            Self::Frame(_) => TransitionEventKind::Frame,
            Self::Complete => TransitionEventKind::Complete,
        }
    }
}

/// Result of running one or more ticks.
#[derive(Debug, Clone, Default)]
pub struct TransitionUpdate {
    pub frame: Option<Rc<PixelBuffer>>,
    pub completed: bool,
}

/// Push-slide from an outgoing frame to an incoming one.
///
/// Both frames are owned by the transition, so nothing the caller does to
/// its own images can disturb a slide in flight. Every tick advances the
/// split by `speed` pixels and emits one composite frame; the tick that
/// reaches the far edge also emits [`TransitionEvent::Complete`].
#[derive(Debug)]
pub struct SlideTransition {
    outgoing: PixelBuffer,
    incoming: PixelBuffer,
    options: SlideOptions,
    position: u32,
    phase: TransitionPhase,
    ticker: Ticker,
    events: EventEmitter<TransitionEvent>,
}

impl SlideTransition {
    pub fn new(
        outgoing: PixelBuffer,
        incoming: PixelBuffer,
        options: SlideOptions,
    ) -> Result<Self, TransitionError> {
        if outgoing.dimensions() != incoming.dimensions() {
            return Err(TransitionError::DimensionMismatch {
                outgoing: outgoing.dimensions(),
                incoming: incoming.dimensions(),
            });
        }

        if outgoing.is_empty() {
            return Err(TransitionError::EmptyFrame);
        }

        Ok(Self {
            outgoing,
            incoming,
            options: SlideOptions::new(options.speed, options.direction),
            position: 0,
            phase: TransitionPhase::Idle,
            ticker: Ticker::new(TRANSITION_TICK_INTERVAL),
            events: EventEmitter::new(),
        })
    }

    /// (Re)starts from position zero.
    pub fn start(&mut self) {
        self.position = 0;
        self.phase = TransitionPhase::Running;
        self.ticker.stop();
        self.ticker.start();

        debug!(
            width = self.width(),
            speed = self.options.speed,
            direction = ?self.options.direction,
            "slide transition started"
        );
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TransitionPhase::Running
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        TransitionState {
            width: self.width(),
            height: self.outgoing.height(),
            speed: self.options.speed,
            direction: self.options.direction,
            position: self.position,
            running: self.is_running(),
        }
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter<TransitionEvent> {
        &mut self.events
    }

    /// Runs every tick that became due during `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> TransitionUpdate {
        let mut update = TransitionUpdate::default();

        self.ticker.elapse(elapsed);
        while self.ticker.next_tick().is_some() {
            if let Some(step) = self.tick() {
                update.frame = step.frame;
                update.completed |= step.completed;
            }
        }

        update
    }

    /// One animation step. Returns `None` once the transition is idle.
    pub fn tick(&mut self) -> Option<TransitionUpdate> {
        if !self.is_running() {
            return None;
        }

        let width = self.width();
        self.position = self.position.saturating_add(self.options.speed);

        let frame = Rc::new(self.compose(self.position));
        self.events.emit(&TransitionEvent::Frame(Rc::clone(&frame)));
        trace!(position = self.position, width, "slide frame");

        let completed = self.position >= width;
        if completed {
            self.phase = TransitionPhase::Idle;
            self.ticker.stop();
            self.events.emit(&TransitionEvent::Complete);
            debug!(position = self.position, "slide transition complete");
        }

        Some(TransitionUpdate {
            frame: Some(frame),
            completed,
        })
    }

    /// Composite frame with the split `position` pixels into the slide.
    ///
    /// Positions past the frame width are clamped to it, so every source
    /// column lies inside the frame.
    #[must_use]
    pub fn compose(&self, position: u32) -> PixelBuffer {
        let width = self.width();
        let shift = position.min(width) as usize * BYTES_PER_PIXEL;
        let stride = width as usize * BYTES_PER_PIXEL;
        let mut frame = PixelBuffer::new(width, self.outgoing.height());

        for y in 0..self.outgoing.height() {
            let outgoing = self.outgoing.row(y);
            let incoming = self.incoming.row(y);
            let row = frame.row_mut(y);

            match self.options.direction {
                Direction::Forward => {
                    // split at width - position: outgoing shifted left, incoming's head on the right
                    let split = stride - shift;
                    row[..split].copy_from_slice(&outgoing[shift..]);
                    row[split..].copy_from_slice(&incoming[..shift]);
                }
                Direction::Backward => {
                    // split at position: incoming's tail on the left, outgoing shifted right
                    let split = shift;
                    row[..split].copy_from_slice(&incoming[stride - shift..]);
                    row[split..].copy_from_slice(&outgoing[..stride - shift]);
                }
            }
        }

        frame
    }

    fn width(&self) -> u32 {
        self.outgoing.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_buffer::Rgba;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const RED: Rgba = [255, 0, 0, 255];
    const GREEN: Rgba = [0, 255, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];
    const YELLOW: Rgba = [255, 255, 0, 255];

    fn strip(pixels: &[Rgba]) -> PixelBuffer {
        PixelBuffer::from_pixels(pixels.len() as u32, 1, pixels).unwrap()
    }

    fn red_green() -> PixelBuffer {
        strip(&[RED, RED, GREEN, GREEN])
    }

    fn blue_yellow() -> PixelBuffer {
        strip(&[BLUE, BLUE, YELLOW, YELLOW])
    }

    fn columns(frame: &PixelBuffer) -> Vec<Rgba> {
        (0..frame.width()).map(|x| frame.pixel(x, 0).unwrap()).collect()
    }

    fn numbered(width: u32, height: u32, base: u8) -> PixelBuffer {
        let pixels: Vec<Rgba> = (0..width * height)
            .map(|i| [base, (i % 251) as u8, (i / 251) as u8, 255])
            .collect();
        PixelBuffer::from_pixels(width, height, &pixels).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_frames() {
        let result = SlideTransition::new(
            PixelBuffer::new(4, 1),
            PixelBuffer::new(2, 2),
            SlideOptions::default(),
        );

        assert_eq!(
            result.unwrap_err(),
            TransitionError::DimensionMismatch {
                outgoing: (4, 1),
                incoming: (2, 2),
            }
        );
    }

    #[test]
    fn test_new_rejects_empty_frames() {
        let result = SlideTransition::new(
            PixelBuffer::new(0, 3),
            PixelBuffer::new(0, 3),
            SlideOptions::default(),
        );

        assert_eq!(result.unwrap_err(), TransitionError::EmptyFrame);
    }

    #[test]
    fn test_forward_two_pixel_steps() {
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(2, Direction::Forward))
                .unwrap();
        slide.start();

        let first = slide.tick().unwrap();
        assert!(!first.completed);
        assert_eq!(slide.state().position, 2);
        assert_eq!(columns(&first.frame.unwrap()), vec![GREEN, GREEN, BLUE, BLUE]);

        let second = slide.tick().unwrap();
        assert!(second.completed);
        assert_eq!(slide.state().position, 4);
        assert_eq!(*second.frame.unwrap(), blue_yellow());

        assert!(slide.tick().is_none());
        assert!(!slide.is_running());
    }

    #[test]
    fn test_backward_pushes_outgoing_right() {
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(1, Direction::Backward))
                .unwrap();
        slide.start();

        let first = slide.tick().unwrap();
        assert_eq!(columns(&first.frame.unwrap()), vec![YELLOW, RED, RED, GREEN]);
    }

    #[test]
    fn test_compose_at_edges() {
        let forward =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(1, Direction::Forward))
                .unwrap();
        let backward =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(1, Direction::Backward))
                .unwrap();

        assert_eq!(forward.compose(0), red_green());
        assert_eq!(forward.compose(4), blue_yellow());
        assert_eq!(backward.compose(0), red_green());
        assert_eq!(backward.compose(4), blue_yellow());
    }

    #[test]
    fn test_compose_clamps_overshoot() {
        let slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(3, Direction::Forward))
                .unwrap();

        assert_eq!(slide.compose(u32::MAX), blue_yellow());
    }

    #[test]
    fn test_partial_last_step_is_rendered_once() {
        let mut slide = SlideTransition::new(
            numbered(5, 2, 1),
            numbered(5, 2, 2),
            SlideOptions::new(2, Direction::Forward),
        )
        .unwrap();
        slide.start();

        let mut ticks = 0;
        let mut last = None;
        while let Some(update) = slide.tick() {
            ticks += 1;
            last = update.frame;
        }

        assert_eq!(ticks, 3);
        assert_eq!(slide.state().position, 6);
        assert_eq!(*last.unwrap(), numbered(5, 2, 2));
    }

    #[test]
    fn test_forward_mirrors_backward_with_swapped_frames() {
        let a = numbered(7, 3, 10);
        let b = numbered(7, 3, 20);
        let forward =
            SlideTransition::new(a.clone(), b.clone(), SlideOptions::new(1, Direction::Forward))
                .unwrap();
        let backward =
            SlideTransition::new(b, a, SlideOptions::new(1, Direction::Backward)).unwrap();

        for position in 0..=7 {
            assert_eq!(forward.compose(position), backward.compose(7 - position));
        }
    }

    #[test]
    fn test_multi_row_rows_shift_independently() {
        let a = numbered(3, 2, 1);
        let b = numbered(3, 2, 2);
        let slide =
            SlideTransition::new(a.clone(), b.clone(), SlideOptions::new(1, Direction::Forward))
                .unwrap();

        let frame = slide.compose(1);

        for y in 0..2 {
            assert_eq!(frame.pixel(0, y), a.pixel(1, y));
            assert_eq!(frame.pixel(1, y), a.pixel(2, y));
            assert_eq!(frame.pixel(2, y), b.pixel(0, y));
        }
    }

    #[test]
    fn test_start_resets_position() {
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(1, Direction::Forward))
                .unwrap();
        slide.start();
        slide.tick();
        slide.tick();
        assert_eq!(slide.state().position, 2);

        slide.start();
        assert_eq!(slide.state().position, 0);
        assert!(slide.state().running);

        while slide.tick().is_some() {}
        slide.start();
        assert!(slide.is_running());
        assert_eq!(slide.state().position, 0);
    }

    #[test]
    fn test_idle_transition_ignores_ticks() {
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::default()).unwrap();

        assert!(slide.tick().is_none());
        assert!(slide.advance(Duration::from_secs(1)).frame.is_none());
    }

    #[test]
    fn test_complete_is_emitted_once() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(3, Direction::Forward))
                .unwrap();

        for kind in [TransitionEventKind::Frame, TransitionEventKind::Complete] {
            let sink = Rc::clone(&events);
            slide
                .events_mut()
                .on(kind, move |event: &TransitionEvent| sink.borrow_mut().push(event.kind()));
        }

        slide.start();
        while slide.tick().is_some() {}
        slide.tick();

        assert_eq!(
            *events.borrow(),
            vec![
                TransitionEventKind::Frame,
                TransitionEventKind::Frame,
                TransitionEventKind::Complete,
            ]
        );
    }

    #[test]
    fn test_advance_runs_due_ticks_and_stops_at_completion() {
        let mut slide =
            SlideTransition::new(red_green(), blue_yellow(), SlideOptions::new(1, Direction::Forward))
                .unwrap();
        slide.start();

        let update = slide.advance(TRANSITION_TICK_INTERVAL * 2);
        assert!(!update.completed);
        assert_eq!(slide.state().position, 2);
        assert_eq!(columns(&update.frame.unwrap()), vec![GREEN, GREEN, BLUE, BLUE]);

        let update = slide.advance(TRANSITION_TICK_INTERVAL * 5);
        assert!(update.completed);
        assert_eq!(slide.state().position, 4);
        assert_eq!(*update.frame.unwrap(), blue_yellow());
    }
}
