use std::time::Duration;
use tracing::trace;

use crate::constants::MAX_CATCH_UP_TICKS;
use crate::events::{Event, EventEmitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerEvent {
    Tick { count: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerEventKind {
    Tick,
}

impl Event for TickerEvent {
    type Kind = TickerEventKind;

    fn kind(&self) -> TickerEventKind {
        match self {
            Self::Tick { .. } => TickerEventKind::Tick,
        }
    }
}

/// Fixed-interval tick source.
///
/// The ticker never reads a clock: the host loop feeds it elapsed time with
/// [`Ticker::elapse`] and drains due ticks with [`Ticker::next_tick`].
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    running: bool,
    tick_count: u64,
    accumulated: Duration,
    events: EventEmitter<TickerEvent>,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            running: false,
            tick_count: 0,
            accumulated: Duration::ZERO,
            events: EventEmitter::new(),
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter<TickerEvent> {
        &mut self.events
    }

    pub fn elapse(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }

        self.accumulated += elapsed;

        let cap = self.interval * MAX_CATCH_UP_TICKS;
        if self.accumulated > cap {
            trace!(
                dropped = ?(self.accumulated - cap),
                "ticker fell behind, dropping excess time"
            );
            self.accumulated = cap;
        }
    }

    /// Fires the next due tick, if any, and returns its count.
    pub fn next_tick(&mut self) -> Option<u64> {
        if !self.running || self.accumulated < self.interval {
            return None;
        }

        self.accumulated -= self.interval;
        self.tick_count += 1;
        self.events.emit(&TickerEvent::Tick {
            count: self.tick_count,
        });
        Some(self.tick_count)
    }

    /// Elapses `elapsed` and fires every tick that became due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.elapse(elapsed);

        let mut fired = 0;
        while self.next_tick().is_some() {
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const INTERVAL: Duration = Duration::from_millis(20);

    #[test]
    fn test_idle_ticker_never_fires() {
        let mut ticker = Ticker::new(INTERVAL);

        assert_eq!(ticker.advance(Duration::from_secs(1)), 0);
        assert_eq!(ticker.tick_count(), 0);
    }

    #[test]
    fn test_first_tick_after_one_interval() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();

        assert_eq!(ticker.advance(Duration::from_millis(19)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(1)), 1);
        assert_eq!(ticker.tick_count(), 1);
    }

    #[test]
    fn test_fractional_time_rolls_over() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();

        assert_eq!(ticker.advance(Duration::from_millis(30)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();
        ticker.elapse(Duration::from_millis(15));
        ticker.start();

        assert_eq!(ticker.advance(Duration::from_millis(5)), 1);
    }

    #[test]
    fn test_stop_discards_pending_time_and_keeps_count() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();
        ticker.advance(Duration::from_millis(45));
        assert_eq!(ticker.tick_count(), 2);

        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.advance(Duration::from_millis(100)), 0);

        ticker.start();
        assert_eq!(ticker.advance(Duration::from_millis(15)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(5)), 1);
        assert_eq!(ticker.tick_count(), 3);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();

        assert_eq!(ticker.advance(Duration::from_secs(10)), MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_next_tick_can_be_interrupted() {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start();
        ticker.elapse(Duration::from_millis(60));

        assert_eq!(ticker.next_tick(), Some(1));
        ticker.stop();
        assert_eq!(ticker.next_tick(), None);
    }

    #[test]
    fn test_ticks_emit_increasing_counts() {
        let counts = Rc::new(RefCell::new(Vec::new()));
        let mut ticker = Ticker::new(INTERVAL);

        let sink = Rc::clone(&counts);
        ticker.events_mut().on(TickerEventKind::Tick, move |event| {
            let TickerEvent::Tick { count } = event;
            sink.borrow_mut().push(*count);
        });

        ticker.start();
        ticker.advance(Duration::from_millis(60));

        assert_eq!(*counts.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let ticker = Ticker::new(Duration::ZERO);

        assert_eq!(ticker.interval(), Duration::from_millis(1));
    }
}
