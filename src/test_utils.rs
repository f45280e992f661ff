//! Test utilities for imageops-frame
//!
//! This module provides common fixtures for testing the frame filters.
//! It is only compiled when running tests.

use crate::frame_ops::canny::EDGE;
use crate::frame_ops::pixel_buffer::{ChannelLayout, PixelBuffer};
use image::{Rgb, Rgba};
use imageproc::definitions::Image;

/// Creates a test RGB image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Creates a test RGBA image with predefined pixel values for testing.
///
/// Same colors as [`create_test_rgb_image`] with decreasing alpha, which
/// grayscale conversion must ignore.
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a gray frame with a clean vertical step edge.
///
/// Columns `0..step_x` are 0 and columns `step_x..width` are 255.
pub fn create_step_edge_buffer(width: u32, height: u32, step_x: u32) -> PixelBuffer {
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| if x < step_x { 0 } else { 255 }))
        .collect();
    PixelBuffer::new(width, height, ChannelLayout::Gray, data)
        .expect("step edge geometry is consistent")
}

/// Counts the pixels marked as edges in a single-channel frame.
pub fn edge_count(buffer: &PixelBuffer) -> usize {
    buffer.as_raw().iter().filter(|&&v| v == EDGE).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgb_image_with_valid_input_creates_image() {
        let image = create_test_rgb_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([50, 75, 25]));
    }

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_step_edge_buffer_splits_columns() {
        let buffer = create_step_edge_buffer(4, 2, 2);
        assert_eq!(buffer.as_raw(), &[0, 0, 255, 255, 0, 0, 255, 255]);
        assert_eq!(edge_count(&buffer), 4);
    }
}
