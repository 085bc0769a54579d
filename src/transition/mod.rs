//! Sliding-wipe transition between two equally sized frames.

pub mod slide;
pub mod state;

pub use slide::{SlideTransition, TransitionEvent, TransitionEventKind, TransitionUpdate};
pub use state::{Direction, SlideOptions, TransitionPhase, TransitionState};
