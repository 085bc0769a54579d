use crate::error::BannerError;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BannerPhase {
    Idle,          // Nothing requested yet
    Loading,       // Waiting for the preloader
    Displaying,    // Showing the current image
    Transitioning, // Sliding to the next image
}

/// Loaded images and the index of the one on screen.
#[derive(Debug, Clone)]
pub struct BannerState<I> {
    images: Vec<I>,
    current_index: usize,
}

impl<I> BannerState<I> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            current_index: 0,
        }
    }

    pub fn append(&mut self, images: impl IntoIterator<Item = I>) {
        self.images.extend(images);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current(&self) -> Option<&I> {
        self.images.get(self.current_index)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&I> {
        self.images.get(index)
    }

    /// Index `offset` images away from the current one, wrapping both ways.
    pub fn offset_index(&self, offset: isize) -> Result<usize, BannerError> {
        let len = self.checked_len()? as isize;
        Ok((self.current_index as isize + offset).rem_euclid(len) as usize)
    }

    /// `index` wrapped into the image range.
    pub fn wrap_index(&self, index: usize) -> Result<usize, BannerError> {
        Ok(index % self.checked_len()?)
    }

    pub fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.images.len());
        self.current_index = index;
    }

    fn checked_len(&self) -> Result<usize, BannerError> {
        if self.images.is_empty() {
            return Err(BannerError::EmptyImageSet);
        }
        Ok(self.images.len())
    }
}

impl<I> Default for BannerState<I> {
    fn default() -> Self {
        Self::new()
    }
}
