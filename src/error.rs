//! Error types shared across the banner.
//!
//! Each layer has its own enum so callers can match on the cause; the
//! controller folds them into [`BannerError`].

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    #[error("buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("pixel ({x}, {y}) outside {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("frames differ in size: outgoing {outgoing:?}, incoming {incoming:?}")]
    DimensionMismatch {
        outgoing: (u32, u32),
        incoming: (u32, u32),
    },

    #[error("cannot slide between empty frames")]
    EmptyFrame,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreloadError {
    #[error("failed to load '{resource}': {reason}")]
    Failed { resource: String, reason: String },

    #[error("preload timed out with {loaded} of {expected} images loaded")]
    TimedOut { loaded: usize, expected: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no image files found in {0:?}")]
    NoImages(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("host surface has no 2D pixel access")]
    UnsupportedEnvironment,

    #[error("banner has no images")]
    EmptyImageSet,

    #[error(transparent)]
    Preload(#[from] PreloadError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("no banner initialized for {0}")]
    UnknownInstance(String),

    #[error("unknown banner command '{0}'")]
    UnknownCommand(String),

    #[error("presenter failed: {0}")]
    Presenter(String),
}
