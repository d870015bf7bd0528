//! Render targets.
//!
//! The render target is an externally owned pixel buffer of packed
//! `0xAA_RR_GG_BB` values. The rasterizer writes to it pixel by pixel and
//! never resizes or reallocates it.

use crate::util::buf::{Buf2, MutSlice2};

/// Trait for types that can be used as render targets.
pub trait Target {
    /// Returns the width of `self` in pixels.
    fn width(&self) -> usize;

    /// Returns the height of `self` in pixels.
    fn height(&self) -> usize;

    /// Writes the color `argb` to the pixel at (x, y).
    ///
    /// Positions outside `self` are ignored. Any further restrictions on
    /// which pixels may be written are the rasterizer's business.
    fn put(&mut self, x: usize, y: usize, argb: u32);

    /// Sets every pixel of `self` to `argb`.
    fn clear(&mut self, argb: u32);
}

impl Target for Buf2<u32> {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn put(&mut self, x: usize, y: usize, argb: u32) {
        if let Some(pix) = self.get_mut(x, y) {
            *pix = argb;
        }
    }
    fn clear(&mut self, argb: u32) {
        self.fill(argb);
    }
}

impl Target for MutSlice2<'_, u32> {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn put(&mut self, x: usize, y: usize, argb: u32) {
        if let Some(pix) = self.get_mut(x, y) {
            *pix = argb;
        }
    }
    fn clear(&mut self, argb: u32) {
        self.fill(argb);
    }
}

impl<T: Target + ?Sized> Target for &mut T {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn put(&mut self, x: usize, y: usize, argb: u32) {
        (**self).put(x, y, argb)
    }
    fn clear(&mut self, argb: u32) {
        (**self).clear(argb)
    }
}
