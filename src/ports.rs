//! Interfaces the banner core uses to reach its host.
//!
//! - [`Surface`]: the visible drawing surface plus offscreen rasterization.
//! - [`ImageHost`]: resolves resource names and reports finished loads.

use crate::pixel_buffer::PixelBuffer;

pub trait Surface {
    type Image;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Whether the host can read and write raw pixels.
    fn supports_pixel_access(&self) -> bool {
        true
    }

    /// Draws `image` scaled to cover the whole surface.
    fn draw_image(&mut self, image: &Self::Image);

    /// Renders `image` offscreen at surface size and returns its pixels.
    fn rasterize(&self, image: &Self::Image) -> PixelBuffer;

    fn put_pixels(&mut self, frame: &PixelBuffer);
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<I> {
    Loaded { name: String, image: I },
    Failed { name: String, reason: String },
}

pub trait ImageHost {
    type Image: Clone;

    /// Starts loading `name` under `base_path`; the result shows up later in
    /// [`ImageHost::poll`].
    fn request(&mut self, name: &str, base_path: &str);

    /// Next finished load, in completion order.
    fn poll(&mut self) -> Option<LoadOutcome<Self::Image>>;
}
