use std::ops::Range;

/// Window of result rows currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// Scroll the minimum amount needed to bring `index` into view.
    pub fn follow(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.height {
            self.offset = index + 1 - self.height;
        }
    }

    /// Keep the window inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.offset = self.offset.min(len.saturating_sub(self.height));
    }

    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.height).min(len)
    }
}
