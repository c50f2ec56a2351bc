/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::err::MismatchedSize;
use crate::TintError;
use std::borrow::Cow;

/// Interleaved RGBA, 8 bits per channel
pub const RGBA_CHANNELS: usize = 4;

#[derive(Debug)]
pub enum BufferStore<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Vec<u8>),
}

impl BufferStore<'_> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Self::Borrowed(p_ref) => p_ref.to_vec(),
            Self::Owned(vec) => vec,
        }
    }
}

#[inline]
fn check_rgba_layout(
    data_len: usize,
    width: usize,
    height: usize,
    stride: usize,
) -> Result<(), TintError> {
    if width == 0 || height == 0 {
        return Err(TintError::ZeroBaseSize);
    }
    if stride < width * RGBA_CHANNELS {
        return Err(TintError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width * RGBA_CHANNELS,
            received: stride,
        }));
    }
    if data_len < stride * (height - 1) + width * RGBA_CHANNELS {
        return Err(TintError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * height,
            received: data_len,
        }));
    }
    Ok(())
}

/// Immutable RGBA image store
#[derive(Debug, Clone)]
pub struct TintImage<'a> {
    pub data: Cow<'a, [u8]>,
    pub width: usize,
    pub height: usize,
    /// Image stride, items per row, might be 0
    pub stride: usize,
}

/// Mutable RGBA image store
#[derive(Debug)]
pub struct TintImageMut<'a> {
    pub data: BufferStore<'a>,
    pub width: usize,
    pub height: usize,
    /// Image stride, items per row, might be 0
    pub stride: usize,
}

impl<'a> TintImage<'a> {
    /// Allocates a fully transparent image
    pub fn alloc(width: usize, height: usize) -> Self {
        Self {
            data: Cow::Owned(vec![0u8; width * height * RGBA_CHANNELS]),
            width,
            height,
            stride: width * RGBA_CHANNELS,
        }
    }

    /// Borrows existing data
    /// Stride will be default `width * 4`
    pub fn borrow(arr: &'a [u8], width: usize, height: usize) -> Self {
        Self {
            data: Cow::Borrowed(arr),
            width,
            height,
            stride: width * RGBA_CHANNELS,
        }
    }

    /// Takes ownership of decoded pixels
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            data: Cow::Owned(data),
            width,
            height,
            stride: width * RGBA_CHANNELS,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> usize {
        if self.stride == 0 {
            self.width * RGBA_CHANNELS
        } else {
            self.stride
        }
    }

    /// Checks if layout matches necessary requirements
    #[inline]
    pub fn check_layout(&self) -> Result<(), TintError> {
        check_rgba_layout(self.data.len(), self.width, self.height, self.row_stride())
    }

    /// Checks if it is matches the size of the other image
    #[inline]
    pub fn size_matches_mut(&self, other: &TintImageMut<'_>) -> Result<(), TintError> {
        if self.width == other.width && self.height == other.height {
            return Ok(());
        }
        Err(TintError::ImageSizeMismatch)
    }

    /// Pixel at `x`, `y`, if inside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y * self.row_stride() + x * RGBA_CHANNELS;
        let px = self.data.get(offset..offset + RGBA_CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl<'a> TintImageMut<'a> {
    /// Allocates a fully transparent image
    pub fn alloc(width: usize, height: usize) -> Self {
        Self {
            data: BufferStore::Owned(vec![0u8; width * height * RGBA_CHANNELS]),
            width,
            height,
            stride: width * RGBA_CHANNELS,
        }
    }

    /// Mutable borrows existing data
    /// Stride will be default `width * 4`
    pub fn borrow(arr: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: width * RGBA_CHANNELS,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> usize {
        if self.stride == 0 {
            self.width * RGBA_CHANNELS
        } else {
            self.stride
        }
    }

    /// Checks if layout matches necessary requirements
    #[inline]
    pub fn check_layout(&self) -> Result<(), TintError> {
        check_rgba_layout(
            self.data.borrow().len(),
            self.width,
            self.height,
            self.row_stride(),
        )
    }

    pub fn to_immutable_ref(&self) -> TintImage<'_> {
        TintImage {
            data: Cow::Borrowed(self.data.borrow()),
            stride: self.row_stride(),
            width: self.width,
            height: self.height,
        }
    }

    /// Releases pixels, rows packed at `width * 4`
    pub fn into_packed_vec(self) -> Vec<u8> {
        let row = self.width * RGBA_CHANNELS;
        let stride = self.row_stride();
        if stride == row {
            let mut data = self.data.into_vec();
            data.truncate(row * self.height);
            return data;
        }
        let mut packed = Vec::with_capacity(row * self.height);
        for lane in self.data.borrow().chunks(stride).take(self.height) {
            packed.extend_from_slice(&lane[..row]);
        }
        packed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_size() {
        let image = TintImage::borrow(&[], 0, 4);
        assert_eq!(image.check_layout(), Err(TintError::ZeroBaseSize));
    }

    #[test]
    fn rejects_short_slice() {
        let data = vec![0u8; 4 * 3 * 2 - 1];
        let image = TintImage::borrow(&data, 3, 2);
        assert_eq!(
            image.check_layout(),
            Err(TintError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 24,
                received: 23,
            }))
        );
    }

    #[test]
    fn rejects_short_stride() {
        let data = vec![0u8; 64];
        let mut image = TintImage::borrow(&data, 4, 2);
        image.stride = 12;
        assert!(matches!(
            image.check_layout(),
            Err(TintError::MinimumStrideSizeMismatch(_))
        ));
    }

    #[test]
    fn last_row_may_end_before_stride() {
        // two rows of one pixel, padded stride of 8, last row unpadded
        let data = vec![0u8; 12];
        let mut image = TintImage::borrow(&data, 1, 2);
        image.stride = 8;
        assert!(image.check_layout().is_ok());
    }

    #[test]
    fn packs_padded_rows() {
        let mut data = vec![9u8; 16];
        data[..4].copy_from_slice(&[1, 2, 3, 4]);
        data[8..12].copy_from_slice(&[5, 6, 7, 8]);
        let mut image = TintImageMut::borrow(&mut data, 1, 2);
        image.stride = 8;
        assert_eq!(image.into_packed_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn pixel_lookup_respects_bounds() {
        let data = [10u8, 20, 30, 40, 50, 60, 70, 80];
        let image = TintImage::borrow(&data, 2, 1);
        assert_eq!(image.pixel(1, 0), Some([50, 60, 70, 80]));
        assert_eq!(image.pixel(2, 0), None);
    }
}
