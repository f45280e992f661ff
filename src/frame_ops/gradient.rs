//! Sobel gradients with magnitude and 4-way quantized direction.
//!
//! - Separable Sobel kernels for apertures 3, 5 and 7, border replicated.
//! - Magnitude is kept in integer form: `|gx| + |gy|` for L1 and the
//!   squared `gx² + gy²` for L2, so every comparison downstream is exact.
//! - Direction is quantized to 0°, 45°, 90° or 135° with the fixed-point
//!   `tan(22.5°)` test, no trigonometry per pixel.

use crate::frame_ops::params::GradientNorm;
use crate::utils::{for_each_row_mut, replicate_index};

const SMOOTH_3: [i32; 3] = [1, 2, 1];
const DERIV_3: [i32; 3] = [-1, 0, 1];
const SMOOTH_5: [i32; 5] = [1, 4, 6, 4, 1];
const DERIV_5: [i32; 5] = [-1, -2, 0, 2, 1];
const SMOOTH_7: [i32; 7] = [1, 6, 15, 20, 15, 6, 1];
const DERIV_7: [i32; 7] = [-1, -4, -5, 0, 5, 4, 1];

// tan(22.5°) in Q15
const TAN_22_5_Q15: i64 = 13573;

/// Quantized gradient orientation
///
/// Angles follow image coordinates (y grows downwards), so `Deg45` is a
/// gradient pointing to the lower right or upper left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
}

impl Direction {
    /// Quantizes `atan2(gy, gx)` folded into `[0°, 180°)` to the nearest of
    /// four orientations.
    #[inline]
    pub fn quantize(gx: i32, gy: i32) -> Self {
        let ax = i64::from(gx.unsigned_abs());
        let ay = i64::from(gy.unsigned_abs()) << 15;
        let tan_22_5 = ax * TAN_22_5_Q15;
        if ay < tan_22_5 {
            Self::Deg0
        } else if ay > tan_22_5 + (ax << 16) {
            // tan(67.5°) = tan(22.5°) + 2
            Self::Deg90
        } else if (gx ^ gy) < 0 {
            Self::Deg135
        } else {
            Self::Deg45
        }
    }
}

/// Per-pixel gradient of one frame, discarded after edge detection
///
/// Only what non-maximum suppression reads is kept; the raw derivatives
/// are dropped once magnitude and direction are known.
#[derive(Debug, Clone)]
pub struct GradientField {
    pub width: usize,
    pub height: usize,
    pub norm: GradientNorm,
    /// L1 magnitude, or squared L2 magnitude
    pub magnitude: Vec<i64>,
    pub direction: Vec<Direction>,
}

impl GradientField {
    /// Converts a threshold into the units of [`Self::magnitude`].
    #[inline]
    pub fn threshold_key(&self, threshold: f64) -> f64 {
        match self.norm {
            GradientNorm::L1 => threshold,
            GradientNorm::L2 => threshold * threshold,
        }
    }
}

fn kernels(aperture_size: u32) -> (&'static [i32], &'static [i32]) {
    match aperture_size {
        5 => (&SMOOTH_5, &DERIV_5),
        7 => (&SMOOTH_7, &DERIV_7),
        _ => (&SMOOTH_3, &DERIV_3),
    }
}

#[inline]
fn convolve_row(row: &[u8], x: usize, kernel: &[i32]) -> i32 {
    let radius = (kernel.len() / 2) as isize;
    kernel
        .iter()
        .zip(-radius..=radius)
        .map(|(&k, dx)| k * i32::from(row[replicate_index(x, dx, row.len())]))
        .sum()
}

#[inline]
fn convolve_column(
    plane: &[i32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    kernel: &[i32],
) -> i32 {
    let radius = (kernel.len() / 2) as isize;
    kernel
        .iter()
        .zip(-radius..=radius)
        .map(|(&k, dy)| k * plane[replicate_index(y, dy, height) * width + x])
        .sum()
}

/// Horizontal and vertical Sobel derivatives.
///
/// `gx` is positive when intensity grows to the right, `gy` when it grows
/// downwards.
fn sobel_derivatives(
    src: &[u8],
    width: usize,
    height: usize,
    aperture_size: u32,
) -> (Vec<i32>, Vec<i32>) {
    let (smooth, deriv) = kernels(aperture_size);

    // Horizontal passes: derivative along x for gx, smoothing along x for gy.
    let mut dx_rows = vec![0i32; width * height];
    let mut sx_rows = vec![0i32; width * height];
    for_each_row_mut(&mut dx_rows, width, |y, out| {
        let row = &src[y * width..(y + 1) * width];
        for (x, value) in out.iter_mut().enumerate() {
            *value = convolve_row(row, x, deriv);
        }
    });
    for_each_row_mut(&mut sx_rows, width, |y, out| {
        let row = &src[y * width..(y + 1) * width];
        for (x, value) in out.iter_mut().enumerate() {
            *value = convolve_row(row, x, smooth);
        }
    });

    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];
    for_each_row_mut(&mut gx, width, |y, out| {
        for (x, value) in out.iter_mut().enumerate() {
            *value = convolve_column(&dx_rows, width, height, x, y, smooth);
        }
    });
    for_each_row_mut(&mut gy, width, |y, out| {
        for (x, value) in out.iter_mut().enumerate() {
            *value = convolve_column(&sx_rows, width, height, x, y, deriv);
        }
    });
    (gx, gy)
}

/// Computes Sobel gradients of a single-channel image.
///
/// `aperture_size` must already be validated (3, 5 or 7). `src` must hold
/// `width * height` samples with both dimensions non-zero.
pub fn sobel_gradients(
    src: &[u8],
    width: usize,
    height: usize,
    aperture_size: u32,
    norm: GradientNorm,
) -> GradientField {
    debug_assert!(width > 0 && height > 0);
    debug_assert_eq!(src.len(), width * height);
    let (gx, gy) = sobel_derivatives(src, width, height, aperture_size);

    let magnitude = gx
        .iter()
        .zip(&gy)
        .map(|(&h, &v)| {
            let (h, v) = (i64::from(h), i64::from(v));
            match norm {
                GradientNorm::L1 => h.abs() + v.abs(),
                GradientNorm::L2 => h * h + v * v,
            }
        })
        .collect();
    let direction = gx
        .iter()
        .zip(&gy)
        .map(|(&h, &v)| Direction::quantize(h, v))
        .collect();

    GradientField {
        width,
        height,
        norm,
        magnitude,
        direction,
    }
}
