use image::imageops::{self, FilterType};
use tracing::warn;

use crate::host::image_loader::SourceImage;
use crate::pixel_buffer::PixelBuffer;
use crate::ports::Surface;

/// An off-screen RGBA frame the banner draws into. Presenters read it back
/// with [`MemorySurface::frame`] once per host frame.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    frame: PixelBuffer,
}

impl MemorySurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: PixelBuffer::new(width, height),
        }
    }

    #[must_use]
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }
}

impl Surface for MemorySurface {
    type Image = SourceImage;

    fn width(&self) -> u32 {
        self.frame.width()
    }

    fn height(&self) -> u32 {
        self.frame.height()
    }

    fn draw_image(&mut self, image: &SourceImage) {
        self.frame = self.rasterize(image);
    }

    // Images are stretched to fill the whole surface.
    fn rasterize(&self, image: &SourceImage) -> PixelBuffer {
        let (width, height) = self.frame.dimensions();
        let data = if image.dimensions() == (width, height) {
            image.as_raw().clone()
        } else {
            imageops::resize(&**image, width, height, FilterType::Triangle).into_raw()
        };

        match PixelBuffer::from_data(width, height, data) {
            Ok(buffer) => buffer,
            Err(error) => {
                warn!(%error, "resized image has unexpected size, drawing black");
                PixelBuffer::new(width, height)
            }
        }
    }

    fn put_pixels(&mut self, frame: &PixelBuffer) {
        if let Err(error) = self.frame.copy_from(frame) {
            warn!(%error, "frame dropped");
        }
    }
}
