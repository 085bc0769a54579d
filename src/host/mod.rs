//! Adapters between the banner core and the real world: image files,
//! an off-screen frame, and the presenters that show or record it.

pub mod ffmpeg;
pub mod image_loader;
pub mod memory_surface;
#[cfg(feature = "gui")]
pub mod window;

pub use ffmpeg::FfmpegRecorder;
pub use image_loader::{SourceImage, ThreadedImageHost, load_image_with_exif_rotation, load_sorted_image_paths};
pub use memory_surface::MemorySurface;
#[cfg(feature = "gui")]
pub use window::RaylibWindow;
