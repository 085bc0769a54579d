use std::time::Duration;

pub const FPS: u32 = 60;                                  // Frames per second of the host loop
pub const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

pub const BYTES_PER_PIXEL: usize = 4;                     // RGBA

pub const DEFAULT_SWITCH_TIME_MS: u64 = 5000;             // Time each image stays on screen
pub const DEFAULT_ANIMATION_SPEED: u32 = 100;             // Pixels per transition tick (widget default)
pub const DEFAULT_SLIDE_SPEED: u32 = 50;                  // Fallback when a transition gets speed 0
pub const TRANSITION_TICK_INTERVAL: Duration = Duration::from_millis(20);

pub const DEFAULT_WIDTH: u32 = 926;                       // Banner surface width
pub const DEFAULT_HEIGHT: u32 = 238;                      // Banner surface height

pub const MAX_CATCH_UP_TICKS: u32 = 8;                    // Pending ticks beyond this are dropped
