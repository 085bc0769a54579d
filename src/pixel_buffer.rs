use crate::constants::BYTES_PER_PIXEL;
use crate::error::PixelBufferError;

pub type Rgba = [u8; 4];

fn buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

/// Row-major RGBA image data, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent black buffer.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; buffer_size(width, height)],
        }
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, colour: Rgba) -> Self {
        let data = colour
            .iter()
            .copied()
            .cycle()
            .take(buffer_size(width, height))
            .collect();

        Self { width, height, data }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = buffer_size(width, height);

        if expected != data.len() {
            return Err(PixelBufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { width, height, data })
    }

    /// Builds a buffer from whole pixels, `width` pixels per row.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgba]) -> Result<Self, PixelBufferError> {
        Self::from_data(width, height, pixels.concat())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = self.index(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[index..index + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Rgba) -> Result<(), PixelBufferError> {
        if x >= self.width || y >= self.height {
            return Err(PixelBufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let index = self.index(x, y);
        self.data[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour);
        Ok(())
    }

    /// Overwrites this buffer with `other` when both share dimensions.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> Result<(), PixelBufferError> {
        if self.dimensions() != other.dimensions() {
            return Err(PixelBufferError::SizeMismatch {
                width: self.width,
                height: self.height,
                expected: self.data.len(),
                actual: other.data.len(),
            });
        }

        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}
