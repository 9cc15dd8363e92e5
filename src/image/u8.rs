use super::traits::ImageView;

/// Borrowed 8-bit grayscale view over a caller-owned buffer.
///
/// Rows may be padded (`stride >= w`), so decoder or camera buffers with
/// aligned row pitch can be wrapped without copying; only the first `w`
/// bytes of each row are read.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Checked view over `data`; `None` when the buffer is too short for
    /// `h` rows of `stride` bytes.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Option<Self> {
        if stride < w {
            return None;
        }
        let needed = if h == 0 { 0 } else { (h - 1) * stride + w };
        (data.len() >= needed).then_some(Self { w, h, stride, data })
    }
}

impl ImageView for ImageU8<'_> {
    type Pixel = u8;

    fn width(&self) -> usize {
        self.w
    }
    fn height(&self) -> usize {
        self.h
    }
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
