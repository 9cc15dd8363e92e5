//! Dense float raster backing intensity images and gradient maps.
use super::traits::{ImageView, ImageViewMut};
use super::u8::ImageU8;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    /// Row-major, `w × h` elements.
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-filled `w × h` raster.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Build an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Convert an 8-bit view into intensities scaled to [0, 1].
    pub fn from_u8_normalized(src: &ImageU8<'_>) -> Self {
        let mut out = Vec::with_capacity(src.w * src.h);
        for row in src.rows() {
            out.extend(row.iter().map(|&v| v as f32 / 255.0));
        }
        Self {
            w: src.w,
            h: src.h,
            data: out,
        }
    }

    /// Pixel at `(x, y)`; panics outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}
