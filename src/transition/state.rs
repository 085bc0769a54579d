use crate::constants::DEFAULT_SLIDE_SPEED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Running,
}

/// Which way the split boundary sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Incoming frame enters from the right, outgoing is pushed left.
    #[default]
    Forward,
    /// Incoming frame enters from the left, outgoing is pushed right.
    Backward,
}

impl Direction {
    /// Negative signs go backward, everything else (zero included) forward.
    #[must_use]
    pub fn from_sign(sign: i32) -> Self {
        if sign < 0 { Self::Backward } else { Self::Forward }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideOptions {
    pub speed: u32,
    pub direction: Direction,
}

impl SlideOptions {
    /// A speed of zero falls back to the default.
    #[must_use]
    pub fn new(speed: u32, direction: Direction) -> Self {
        let speed = if speed == 0 { DEFAULT_SLIDE_SPEED } else { speed };
        Self { speed, direction }
    }
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDE_SPEED, Direction::Forward)
    }
}

/// Snapshot of a transition's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionState {
    pub width: u32,
    pub height: u32,
    pub speed: u32,
    pub direction: Direction,
    pub position: u32,
    pub running: bool,
}
