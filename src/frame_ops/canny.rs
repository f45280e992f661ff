//! Canny edge detection on single-channel frames.
//!
//! Stages run in a fixed order: Gaussian smoothing, Sobel gradient,
//! non-maximum suppression, hysteresis. The result overwrites the frame
//! as a binary map of 0 and 255.

use crate::error::FrameError;
use crate::frame_ops::convert_gray::convert_to_gray;
use crate::frame_ops::gaussian::gaussian_blur_5x5;
use crate::frame_ops::gradient::{sobel_gradients, Direction, GradientField};
use crate::frame_ops::params::CannyParams;
use crate::frame_ops::pixel_buffer::PixelBuffer;
use crate::utils::validate_non_empty_image;
use image::GrayImage;
use itertools::iproduct;

/// Value written for edge pixels
pub const EDGE: u8 = u8::MAX;
/// Value written for everything else
pub const NON_EDGE: u8 = 0;

/// Classification of a pixel after non-maximum suppression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Candidate {
    /// Suppressed, or below the low threshold
    None,
    /// Between the thresholds, kept only when linked to a strong pixel
    Weak,
    /// At or above the high threshold
    Strong,
}

/// Thins the gradient ridges and classifies the surviving pixels.
///
/// A pixel survives when it is a local maximum along its quantized gradient
/// direction; neighbours outside the frame count as zero. On axis-aligned
/// ridges a plateau of equal magnitudes resolves to its left or upper pixel
/// (`m > back && m >= forward`), diagonal directions require a strict
/// maximum. Zero magnitudes never survive.
pub(crate) fn non_maximum_suppression(
    field: &GradientField,
    low_key: f64,
    high_key: f64,
) -> Vec<Candidate> {
    let (width, height) = (field.width, field.height);
    let magnitude_at = |x: isize, y: isize| -> i64 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            field.magnitude[y as usize * width + x as usize]
        }
    };

    let mut candidates = vec![Candidate::None; width * height];
    for (y, x) in iproduct!(0..height, 0..width) {
        let index = y * width + x;
        let m = field.magnitude[index];
        if m == 0 {
            continue;
        }

        let (xi, yi) = (x as isize, y as isize);
        let is_maximum = match field.direction[index] {
            Direction::Deg0 => m > magnitude_at(xi - 1, yi) && m >= magnitude_at(xi + 1, yi),
            Direction::Deg90 => m > magnitude_at(xi, yi - 1) && m >= magnitude_at(xi, yi + 1),
            Direction::Deg45 => {
                m > magnitude_at(xi - 1, yi - 1) && m > magnitude_at(xi + 1, yi + 1)
            }
            Direction::Deg135 => {
                m > magnitude_at(xi + 1, yi - 1) && m > magnitude_at(xi - 1, yi + 1)
            }
        };
        if !is_maximum {
            continue;
        }

        let m = m as f64;
        candidates[index] = if m >= high_key {
            Candidate::Strong
        } else if m >= low_key {
            Candidate::Weak
        } else {
            Candidate::None
        };
    }
    candidates
}

/// Accepts strong pixels and every weak pixel 8-connected to one of them.
///
/// Depth-first over an explicit stack, so long edge chains cannot overflow
/// the call stack.
pub(crate) fn hysteresis(
    candidates: &[Candidate],
    width: usize,
    height: usize,
    out: &mut [u8],
) {
    debug_assert_eq!(candidates.len(), width * height);
    debug_assert_eq!(out.len(), width * height);

    out.fill(NON_EDGE);
    let mut stack = Vec::new();
    for (seed, &candidate) in candidates.iter().enumerate() {
        if candidate != Candidate::Strong || out[seed] == EDGE {
            continue;
        }
        out[seed] = EDGE;
        stack.push(seed);

        while let Some(index) = stack.pop() {
            let (x, y) = ((index % width) as isize, (index / width) as isize);
            for (dy, dx) in iproduct!(-1isize..=1, -1isize..=1) {
                let (nx, ny) = (x + dx, y + dy);
                if (dx, dy) == (0, 0)
                    || nx < 0
                    || ny < 0
                    || nx >= width as isize
                    || ny >= height as isize
                {
                    continue;
                }
                let neighbor = ny as usize * width + nx as usize;
                if out[neighbor] == NON_EDGE && candidates[neighbor] != Candidate::None {
                    out[neighbor] = EDGE;
                    stack.push(neighbor);
                }
            }
        }
    }
}

/// Runs all four Canny stages on a gray plane and writes the edge map to `out`.
fn canny_plane(
    src: &[u8],
    width: usize,
    height: usize,
    params: &CannyParams,
    out: &mut [u8],
) {
    let blurred = gaussian_blur_5x5(src, width, height);
    let field = sobel_gradients(&blurred, width, height, params.aperture_size, params.norm);
    let (low, high) = params.effective_thresholds();
    let candidates =
        non_maximum_suppression(&field, field.threshold_key(low), field.threshold_key(high));
    hysteresis(&candidates, width, height, out);
}

/// Detects edges in `buffer` and overwrites it with the binary edge map.
///
/// A multi-channel frame is converted to gray first; afterwards the buffer
/// is single channel with every sample either [`EDGE`] or [`NON_EDGE`]. The
/// result depends only on the frame contents and `params`.
///
/// # Errors
///
/// * [`FrameError::EmptyBuffer`] for a frame without pixels
/// * [`FrameError::InvalidConfig`] when `params` fails
///   [`CannyParams::validate`]
///
/// The buffer is left untouched on error.
pub fn detect_edges(buffer: &mut PixelBuffer, params: &CannyParams) -> Result<(), FrameError> {
    validate_non_empty_image(buffer.width(), buffer.height())?;
    params.validate()?;

    convert_to_gray(buffer)?;
    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    let gray = buffer.as_raw().to_vec();
    canny_plane(&gray, width, height, params, buffer.as_raw_mut());
    Ok(())
}

impl PixelBuffer {
    /// In-place Canny edge detection, see [`detect_edges`].
    pub fn detect_edges(&mut self, params: &CannyParams) -> Result<(), FrameError> {
        detect_edges(self, params)
    }
}

/// Canny edge detection for `image` gray buffers
pub trait CannyEdges {
    /// Returns the binary edge map as a new image.
    ///
    /// # Errors
    ///
    /// Same conditions as [`detect_edges`].
    fn canny_edges(&self, params: &CannyParams) -> Result<GrayImage, FrameError>;
}

impl CannyEdges for GrayImage {
    fn canny_edges(&self, params: &CannyParams) -> Result<GrayImage, FrameError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;
        params.validate()?;

        let mut edges = GrayImage::new(width, height);
        canny_plane(
            self.as_raw(),
            width as usize,
            height as usize,
            params,
            &mut edges,
        );
        Ok(edges)
    }
}
