//! Internal utility functions for imageops-frame.
//!
//! This module contains common functionality used across the frame filters.

use crate::error::FrameError;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise [`FrameError::EmptyBuffer`]
#[inline]
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), FrameError> {
    if width == 0 || height == 0 {
        Err(FrameError::EmptyBuffer { width, height })
    } else {
        Ok(())
    }
}

/// Validates that a sample slice matches `width * height * channels`.
pub fn validate_sample_count(
    width: u32,
    height: u32,
    channels: usize,
    actual: usize,
) -> Result<(), FrameError> {
    let expected = width as usize * height as usize * channels;
    if expected == actual {
        Ok(())
    } else {
        Err(FrameError::LengthMismatch { expected, actual })
    }
}

/// Clamps a coordinate shifted by `offset` into `0..len` (border replication).
#[inline]
pub fn replicate_index(index: usize, offset: isize, len: usize) -> usize {
    let shifted = index as isize + offset;
    shifted.clamp(0, len as isize - 1) as usize
}

/// Runs `f(y, row)` over every `width`-long row of `out`.
///
/// With the `rayon` feature the rows are processed in parallel. Each row is
/// written by exactly one call, so the result does not depend on scheduling.
pub fn for_each_row_mut<T, F>(out: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        out.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_image() {
        assert!(validate_non_empty_image(100, 100).is_ok());
        assert!(validate_non_empty_image(1, 1).is_ok());
        assert_eq!(
            validate_non_empty_image(0, 100),
            Err(FrameError::EmptyBuffer {
                width: 0,
                height: 100
            })
        );
        assert!(validate_non_empty_image(100, 0).is_err());
        assert!(validate_non_empty_image(0, 0).is_err());
    }

    #[test]
    fn test_validate_sample_count() {
        assert!(validate_sample_count(4, 3, 4, 48).is_ok());
        assert_eq!(
            validate_sample_count(4, 3, 1, 13),
            Err(FrameError::LengthMismatch {
                expected: 12,
                actual: 13
            })
        );
    }

    #[test]
    fn test_replicate_index() {
        assert_eq!(replicate_index(0, -2, 5), 0);
        assert_eq!(replicate_index(1, -1, 5), 0);
        assert_eq!(replicate_index(2, 1, 5), 3);
        assert_eq!(replicate_index(4, 2, 5), 4);
        assert_eq!(replicate_index(0, 3, 1), 0);
    }

    #[test]
    fn test_for_each_row_mut_visits_rows_in_order() {
        let mut out = vec![0usize; 12];
        for_each_row_mut(&mut out, 4, |y, row| {
            for (x, value) in row.iter_mut().enumerate() {
                *value = y * 10 + x;
            }
        });
        assert_eq!(out, vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23]);
    }
}
