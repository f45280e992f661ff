//! 5×5 Gaussian smoothing ahead of gradient computation.
//!
//! Separable binomial kernel `[1 4 6 4 1] / 16` (σ ≈ 1) in integer
//! arithmetic, rounded once after the vertical pass. Borders are
//! replicated. Integer accumulation keeps the result bit-exact across
//! platforms and across the sequential and `rayon` paths.

use crate::utils::{for_each_row_mut, replicate_index};

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
const RADIUS: isize = 2;
// Both passes have weight 16, so the 2-D kernel sums to 256.
const NORM_SHIFT: u32 = 8;
const NORM_ROUND: u32 = 1 << (NORM_SHIFT - 1);

/// Blurs a single-channel `width × height` image into a new plane.
///
/// `src` must hold exactly `width * height` samples and both dimensions
/// must be non-zero.
pub fn gaussian_blur_5x5(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert!(width > 0 && height > 0);
    debug_assert_eq!(src.len(), width * height);

    // 16 * 255 fits in u16
    let mut horizontal = vec![0u16; width * height];
    for_each_row_mut(&mut horizontal, width, |y, row| {
        let src_row = &src[y * width..(y + 1) * width];
        for (x, out) in row.iter_mut().enumerate() {
            let acc: u32 = KERNEL
                .iter()
                .zip(-RADIUS..=RADIUS)
                .map(|(&k, dx)| k * u32::from(src_row[replicate_index(x, dx, width)]))
                .sum();
            *out = acc as u16;
        }
    });

    let mut blurred = vec![0u8; width * height];
    for_each_row_mut(&mut blurred, width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let acc: u32 = KERNEL
                .iter()
                .zip(-RADIUS..=RADIUS)
                .map(|(&k, dy)| {
                    k * u32::from(horizontal[replicate_index(y, dy, height) * width + x])
                })
                .sum();
            *out = ((acc + NORM_ROUND) >> NORM_SHIFT) as u8;
        }
    });

    blurred
}
