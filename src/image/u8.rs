use super::traits::ImageView;

/// Borrowed 8-bit grayscale view, dark pixels being ink.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Binarize the view: `true` where the pixel is darker than `threshold`.
    pub fn ink_mask(&self, threshold: u8) -> Vec<bool> {
        let mut mask = Vec::with_capacity(self.w * self.h);
        for row in self.rows() {
            mask.extend(row.iter().map(|&v| v < threshold));
        }
        mask
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
