use thiserror::Error;

/// Error type for per-frame filter operations
///
/// Every fallible operation in this crate reports one of these variants.
/// The hot-path entry points on [`crate::FrameProcessor`] never return it;
/// they log it and leave the frame untouched instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The buffer has no pixels
    ///
    /// Returned when width or height is zero. A frame like this carries
    /// nothing to filter, so the operation is skipped.
    #[error("Invalid buffer: dimensions must be non-zero, got {width}x{height}")]
    EmptyBuffer { width: u32, height: u32 },

    /// The sample vector does not match the declared geometry
    ///
    /// The invariant is `len == width * height * channels`.
    #[error("Invalid buffer: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The channel count is not one of the supported layouts (1 to 4)
    #[error("Invalid buffer: unsupported channel count {0}")]
    UnsupportedChannels(u8),

    /// A plane row stride is shorter than the row width
    #[error("Invalid buffer: row stride {stride} is smaller than width {width}")]
    StrideTooSmall { width: u32, stride: usize },

    /// Edge detection parameters are invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl FrameError {
    /// Whether this error comes from the buffer rather than the parameters
    pub fn is_invalid_buffer(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

/// Error type for edge detection parameters
///
/// These are caller contract errors. [`crate::CannyParams::validate`]
/// reports them as-is; only [`crate::CannyParams::clamped`] corrects them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The Sobel aperture must be odd
    #[error("aperture size must be odd, got {0}")]
    EvenAperture(u32),

    /// The Sobel aperture must lie within 3..=7
    #[error("aperture size must be between 3 and 7, got {0}")]
    ApertureOutOfRange(u32),

    /// The high threshold is below the low threshold
    #[error("high threshold ({high}) must be greater than or equal to low threshold ({low})")]
    InvertedThresholds { low: f32, high: f32 },

    /// A threshold is negative or not finite
    #[error("threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f32),
}

