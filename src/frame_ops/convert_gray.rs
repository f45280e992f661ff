//! RGB(A) to single-channel intensity conversion.
//!
//! Uses the ITU-R BT.601 luma weights `0.299 R + 0.587 G + 0.114 B` in
//! 14-bit fixed point, the same integer scheme camera pipelines use for
//! 8-bit frames. Alpha is ignored.

use crate::error::FrameError;
use crate::frame_ops::pixel_buffer::{ChannelLayout, PixelBuffer};
use crate::utils::validate_non_empty_image;
use image::{GrayAlphaImage, GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::map::map_colors;

const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);
// round(0.299 * 2^14), round(0.587 * 2^14), round(0.114 * 2^14); they sum to 2^14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Luma of one RGB sample, clamped to the 8-bit range
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = (LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b) + LUMA_ROUND)
        >> LUMA_SHIFT;
    y.min(u32::from(u8::MAX)) as u8
}

/// Reduces `buffer` to one intensity channel in place.
///
/// A buffer that is already [`ChannelLayout::Gray`] is left as is. Otherwise
/// pixel `i` is read from sample `i * channels` and written to sample `i`;
/// since `i <= i * channels`, a forward pass never overwrites a pixel it has
/// yet to read. The sample vector is then truncated to `width * height` and
/// the layout becomes `Gray`.
///
/// # Errors
///
/// [`FrameError::EmptyBuffer`] when the buffer has no pixels. The buffer is
/// not touched in that case.
pub fn convert_to_gray(buffer: &mut PixelBuffer) -> Result<(), FrameError> {
    validate_non_empty_image(buffer.width(), buffer.height())?;

    let layout = buffer.layout();
    let channels = layout.channels();
    let pixels = buffer.pixel_count();
    let data = buffer.as_raw_mut();
    match layout {
        ChannelLayout::Gray => return Ok(()),
        ChannelLayout::GrayAlpha => {
            for i in 0..pixels {
                data[i] = data[i * channels];
            }
        }
        ChannelLayout::Rgb | ChannelLayout::Rgba => {
            for i in 0..pixels {
                let base = i * channels;
                data[i] = luma(data[base], data[base + 1], data[base + 2]);
            }
        }
    }

    buffer.finish_gray();
    Ok(())
}

impl PixelBuffer {
    /// In-place grayscale conversion, see [`convert_to_gray`].
    pub fn convert_to_gray(&mut self) -> Result<(), FrameError> {
        convert_to_gray(self)
    }
}

/// Grayscale conversion for `image` buffers
///
/// Unlike [`convert_to_gray`] this leaves the source untouched and returns
/// a new single-channel image, since an `ImageBuffer` cannot change its
/// pixel type in place.
pub trait ConvertToGray {
    /// Converts the image to luma with the same weights as [`luma`].
    ///
    /// # Errors
    ///
    /// [`FrameError::EmptyBuffer`] for a zero-sized image.
    fn to_gray(&self) -> Result<GrayImage, FrameError>;
}

impl ConvertToGray for RgbaImage {
    fn to_gray(&self) -> Result<GrayImage, FrameError> {
        validate_non_empty_image(self.width(), self.height())?;
        Ok(map_colors(self, |Rgba([r, g, b, _])| Luma([luma(r, g, b)])))
    }
}

impl ConvertToGray for RgbImage {
    fn to_gray(&self) -> Result<GrayImage, FrameError> {
        validate_non_empty_image(self.width(), self.height())?;
        Ok(map_colors(self, |Rgb([r, g, b])| Luma([luma(r, g, b)])))
    }
}

impl ConvertToGray for GrayAlphaImage {
    fn to_gray(&self) -> Result<GrayImage, FrameError> {
        validate_non_empty_image(self.width(), self.height())?;
        Ok(map_colors(self, |LumaA([l, _])| Luma([l])))
    }
}

impl ConvertToGray for GrayImage {
    fn to_gray(&self) -> Result<GrayImage, FrameError> {
        validate_non_empty_image(self.width(), self.height())?;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_rgb_image, create_test_rgba_image};

    #[test]
    fn luma_matches_reference_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(200, 150, 100), 159);
    }

    #[test]
    fn convert_rgba_buffer_in_place_ignores_alpha() {
        let mut buffer = PixelBuffer::new(
            2,
            1,
            ChannelLayout::Rgba,
            vec![255, 255, 255, 0, 0, 0, 0, 255],
        )
        .unwrap();

        convert_to_gray(&mut buffer).unwrap();

        assert_eq!(buffer.layout(), ChannelLayout::Gray);
        assert_eq!(buffer.as_raw(), &[255, 0]);
    }

    #[test]
    fn convert_rgb_buffer_in_place() {
        let mut buffer = PixelBuffer::from(create_test_rgb_image());
        buffer.convert_to_gray().unwrap();

        assert_eq!(buffer.as_raw().len(), 4);
        assert_eq!(buffer.as_raw()[0], luma(200, 150, 100));
        assert_eq!(buffer.as_raw()[3], luma(50, 75, 25));
    }

    #[test]
    fn convert_gray_alpha_keeps_gray_channel() {
        let mut buffer =
            PixelBuffer::new(3, 1, ChannelLayout::GrayAlpha, vec![10, 1, 20, 2, 30, 3]).unwrap();
        convert_to_gray(&mut buffer).unwrap();
        assert_eq!(buffer.as_raw(), &[10, 20, 30]);
    }

    #[test]
    fn convert_gray_buffer_is_a_no_op() {
        let mut buffer = PixelBuffer::new(2, 2, ChannelLayout::Gray, vec![1, 2, 3, 4]).unwrap();
        let before = buffer.clone();
        convert_to_gray(&mut buffer).unwrap();
        assert_eq!(buffer, before);
    }

    #[test]
    fn convert_empty_buffer_fails_without_touching_it() {
        let mut buffer = PixelBuffer::from_value(0, 3, ChannelLayout::Rgba, 0);
        let result = convert_to_gray(&mut buffer);
        assert_eq!(
            result,
            Err(FrameError::EmptyBuffer {
                width: 0,
                height: 3
            })
        );
        assert_eq!(buffer.layout(), ChannelLayout::Rgba);
    }

    #[test]
    fn image_trait_matches_in_place_conversion() {
        let image = create_test_rgba_image();
        let gray = image.to_gray().unwrap();

        let mut buffer = PixelBuffer::from(image);
        buffer.convert_to_gray().unwrap();

        assert_eq!(gray.as_raw(), buffer.as_raw());
    }

    #[test]
    fn image_trait_rejects_empty_images() {
        assert!(RgbaImage::new(0, 0).to_gray().is_err());
        assert!(GrayImage::new(4, 0).to_gray().is_err());
    }
}
