//! Owned RGB pixel grid shared by every processing stage.
//!
//! Pixels live in an `ndarray::Array3<u8>` shaped `(rows, cols, 3)` in standard
//! (row-major) layout, so the raw interleaved bytes can be handed to the
//! resampler and the JPEG encoder without reshuffling.
use std::borrow::Cow;

use ndarray::{Array3, ArrayView3, s};

use crate::error::{Error, Result};
use crate::types::Rect;

pub const CHANNELS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Array3<u8>,
}

impl ImageBuffer {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, CHANNELS)),
        }
    }

    pub fn filled(width: usize, height: usize, pixel: [u8; 3]) -> Self {
        Self::from_fn(width, height, |_, _| pixel)
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(y, x, c)| f(x, y)[c]);
        Self { data }
    }

    /// Wrap interleaved RGB bytes; `raw.len()` must equal `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, raw: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if raw.len() != expected {
            return Err(Error::Processing(format!(
                "RGB buffer length {} does not match {}x{} (expected {})",
                raw.len(),
                width,
                height,
                expected
            )));
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), raw)
            .map_err(|e| Error::Processing(e.to_string()))?;
        Ok(Self { data })
    }

    pub(crate) fn from_array(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS);
        Self { data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, pixel: [u8; 3]) {
        for (c, v) in pixel.into_iter().enumerate() {
            self.data[[y, x, c]] = v;
        }
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Copy out the pixels under `rect`.
    pub fn crop(&self, rect: Rect) -> Result<ImageBuffer> {
        if !rect.fits_within(self.width(), self.height()) {
            return Err(Error::Processing(format!(
                "crop rectangle {:?} exceeds image {}x{}",
                rect,
                self.width(),
                self.height()
            )));
        }
        let region = self
            .data
            .slice(s![rect.y..rect.y + rect.height, rect.x..rect.x + rect.width, ..])
            .to_owned();
        Ok(Self { data: region })
    }

    /// Paint `src` with its top-left corner at (`x`, `y`); parts falling outside are clipped.
    pub fn blit(&mut self, src: &ImageBuffer, x: usize, y: usize) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let w = src.width().min(self.width() - x);
        let h = src.height().min(self.height() - y);
        if w == 0 || h == 0 {
            return;
        }
        self.data
            .slice_mut(s![y..y + h, x..x + w, ..])
            .assign(&src.data.slice(s![..h, ..w, ..]));
    }

    /// Interleaved RGB bytes, borrowed when the storage is already contiguous.
    pub fn as_raw(&self) -> Cow<'_, [u8]> {
        match self.data.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.data.iter().copied().collect()),
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec()
        } else {
            self.data.iter().copied().collect()
        }
    }
}
