//! A rotating image banner.
//!
//! Images are preloaded in a batch, shown one at a time, and swapped with a
//! horizontal push-slide on a timer or on request. The core is driven by
//! host-supplied elapsed time and draws through the [`ports::Surface`] trait;
//! [`host`] provides file loading, an off-screen surface and presenters.

pub mod command;
pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod pixel_buffer;
pub mod ports;
pub mod preloader;
pub mod state;
pub mod ticker;
pub mod transition;
pub mod widget;

pub use command::Command;
pub use config::BannerConfig;
pub use controller::{BannerController, BannerEvent, BannerEventKind};
pub use engine::{Engine, Presenter};
pub use error::{BannerError, ConfigError, ImageLoadError, PreloadError, TransitionError};
pub use events::{Event, EventEmitter, ListenerId};
pub use pixel_buffer::{PixelBuffer, Rgba};
pub use ports::{ImageHost, LoadOutcome, Surface};
pub use preloader::{PreloadEvent, Preloader};
pub use state::BannerPhase;
pub use ticker::{Ticker, TickerEvent};
pub use transition::{Direction, SlideOptions, SlideTransition, TransitionState};
pub use widget::BannerWidgets;
