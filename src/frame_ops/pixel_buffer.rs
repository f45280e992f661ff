use crate::error::FrameError;
use crate::utils::{validate_non_empty_image, validate_sample_count};
use image::{
    GrayAlphaImage, GrayImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, RgbImage, Rgba, RgbaImage,
};

/// Interleaved channel layout of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelLayout {
    /// Single intensity channel
    Gray,
    /// Intensity followed by alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha (the usual camera preview format)
    Rgba,
}

impl ChannelLayout {
    /// Maps a raw channel count to a layout.
    ///
    /// # Errors
    ///
    /// [`FrameError::UnsupportedChannels`] for anything outside 1..=4.
    pub fn from_channels(channels: u8) -> Result<Self, FrameError> {
        match channels {
            1 => Ok(Self::Gray),
            2 => Ok(Self::GrayAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(FrameError::UnsupportedChannels(other)),
        }
    }

    /// Number of interleaved samples per pixel
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }
}

/// A caller-owned frame: row-major `u8` samples plus their geometry.
///
/// The invariant `data.len() == width * height * layout.channels()` is
/// checked on construction and maintained by every transform. Transforms
/// that reduce the frame to one channel update [`Self::layout`] themselves,
/// so the consumer can always read the current channel count from the
/// buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `data` as a frame of the given geometry.
    ///
    /// Zero-sized frames are accepted here; the filters reject them when
    /// they are processed.
    ///
    /// # Errors
    ///
    /// [`FrameError::LengthMismatch`] when `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        validate_sample_count(width, height, layout.channels(), data.len())?;
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Same as [`Self::new`] with the layout given as a raw channel count.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        Self::new(width, height, ChannelLayout::from_channels(channels)?, data)
    }

    /// A frame filled with a single value per sample.
    pub fn from_value(width: u32, height: u32, layout: ChannelLayout, value: u8) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self {
            width,
            height,
            layout,
            data: vec![value; len],
        }
    }

    /// A 0x0 gray frame.
    pub fn empty() -> Self {
        Self::from_value(0, 0, ChannelLayout::Gray, 0)
    }

    /// Copies a single 8-bit plane whose rows are `row_stride` bytes apart.
    ///
    /// This is how the luminance (Y) plane of a YUV 4:2:0 camera frame is
    /// ingested: it is already an intensity image, but camera HALs pad each
    /// row, so the stride is often wider than the image.
    ///
    /// # Errors
    ///
    /// * [`FrameError::EmptyBuffer`] for a zero-sized plane
    /// * [`FrameError::StrideTooSmall`] when `row_stride < width`
    /// * [`FrameError::LengthMismatch`] when `plane` is too short for the
    ///   last row
    pub fn from_plane(
        width: u32,
        height: u32,
        row_stride: usize,
        plane: &[u8],
    ) -> Result<Self, FrameError> {
        validate_non_empty_image(width, height)?;
        let w = width as usize;
        if row_stride < w {
            return Err(FrameError::StrideTooSmall {
                width,
                stride: row_stride,
            });
        }
        // Saturates to usize::MAX, which no slice can satisfy
        let required = row_stride
            .saturating_mul(height as usize - 1)
            .saturating_add(w);
        if plane.len() < required {
            return Err(FrameError::LengthMismatch {
                expected: required,
                actual: plane.len(),
            });
        }

        let data = plane
            .chunks(row_stride)
            .take(height as usize)
            .flat_map(|row| &row[..w])
            .copied()
            .collect();
        Ok(Self {
            width,
            height,
            layout: ChannelLayout::Gray,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels, `width * height`
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the frame has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the samples. The length cannot change through it.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of pixel `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics when the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let channels = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[start..start + channels]
    }

    /// Marks the buffer as single channel after its first `width * height`
    /// samples have been rewritten with intensities.
    ///
    /// Truncation keeps the allocation, so no new buffer is created.
    pub(crate) fn finish_gray(&mut self) {
        self.data.truncate(self.pixel_count());
        self.layout = ChannelLayout::Gray;
    }

    /// Converts into a [`GrayImage`], reducing to one channel first if needed.
    ///
    /// # Errors
    ///
    /// [`FrameError::EmptyBuffer`] for a zero-sized frame.
    pub fn into_gray_image(mut self) -> Result<GrayImage, FrameError> {
        crate::frame_ops::convert_gray::convert_to_gray(&mut self)?;
        let expected = self.pixel_count();
        let actual = self.data.len();
        ImageBuffer::from_raw(self.width, self.height, self.data)
            .ok_or(FrameError::LengthMismatch { expected, actual })
    }
}

fn from_image<P>(image: ImageBuffer<P, Vec<u8>>, layout: ChannelLayout) -> PixelBuffer
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let mut data = image.into_raw();
    // `ImageBuffer::from_raw` accepts containers longer than the image
    data.truncate(width as usize * height as usize * layout.channels());
    PixelBuffer {
        width,
        height,
        layout,
        data,
    }
}

impl From<GrayImage> for PixelBuffer {
    fn from(image: GrayImage) -> Self {
        from_image::<Luma<u8>>(image, ChannelLayout::Gray)
    }
}

impl From<GrayAlphaImage> for PixelBuffer {
    fn from(image: GrayAlphaImage) -> Self {
        from_image::<LumaA<u8>>(image, ChannelLayout::GrayAlpha)
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        from_image::<Rgb<u8>>(image, ChannelLayout::Rgb)
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        from_image::<Rgba<u8>>(image, ChannelLayout::Rgba)
    }
}
