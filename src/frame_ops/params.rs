use crate::error::ConfigError;

/// Smallest supported Sobel aperture
pub const MIN_APERTURE: u32 = 3;
/// Largest supported Sobel aperture
pub const MAX_APERTURE: u32 = 7;

/// Norm used to turn `(gx, gy)` into a gradient magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GradientNorm {
    /// `|gx| + |gy|`, cheaper and what most mobile pipelines default to
    L1,
    /// `sqrt(gx² + gy²)`, rotation invariant
    #[default]
    L2,
}

/// Canny edge detection parameters
///
/// Thresholds are in units of the un-normalised Sobel response, so for an
/// aperture of 3 a full black to white step yields a magnitude of about
/// `4 * 255`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CannyParams {
    /// Candidates below this magnitude are rejected outright
    pub low_threshold: f32,
    /// Candidates at or above this magnitude are accepted as strong edges
    pub high_threshold: f32,
    /// Sobel kernel size, odd, within 3..=7
    pub aperture_size: u32,
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 100.0,
            high_threshold: 200.0,
            aperture_size: 3,
            norm: GradientNorm::L2,
        }
    }
}

impl CannyParams {
    /// Parameters with the default aperture and norm.
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
            ..Self::default()
        }
    }

    pub fn with_aperture_size(mut self, aperture_size: u32) -> Self {
        self.aperture_size = aperture_size;
        self
    }

    pub fn with_norm(mut self, norm: GradientNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Checks the caller contract.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidThreshold`] for a negative or non-finite threshold
    /// * [`ConfigError::EvenAperture`] / [`ConfigError::ApertureOutOfRange`]
    ///   unless the aperture is 3, 5 or 7
    /// * [`ConfigError::InvertedThresholds`] when `high < low`
    pub fn validate(&self) -> Result<(), ConfigError> {
        for threshold in [self.low_threshold, self.high_threshold] {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ConfigError::InvalidThreshold(threshold));
            }
        }
        if self.aperture_size % 2 == 0 {
            return Err(ConfigError::EvenAperture(self.aperture_size));
        }
        if !(MIN_APERTURE..=MAX_APERTURE).contains(&self.aperture_size) {
            return Err(ConfigError::ApertureOutOfRange(self.aperture_size));
        }
        if self.high_threshold < self.low_threshold {
            return Err(ConfigError::InvertedThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        Ok(())
    }

    /// The nearest valid parameters.
    ///
    /// Non-finite or negative thresholds fall back to zero, an even aperture
    /// rounds up to the next odd size, the aperture is clamped into 3..=7,
    /// and an inverted pair is resolved by raising `high` to `low`.
    pub fn clamped(&self) -> Self {
        let sanitize = |t: f32| if t.is_finite() && t >= 0.0 { t } else { 0.0 };
        let low = sanitize(self.low_threshold);
        let high = sanitize(self.high_threshold).max(low);
        let aperture = (self.aperture_size | 1).clamp(MIN_APERTURE, MAX_APERTURE);
        Self {
            low_threshold: low,
            high_threshold: high,
            aperture_size: aperture,
            norm: self.norm,
        }
    }

    /// Thresholds as applied to the gradient magnitude.
    ///
    /// For the 7-tap kernel both are divided by 16, the convention common
    /// Canny implementations follow for that aperture.
    pub(crate) fn effective_thresholds(&self) -> (f64, f64) {
        let scale = if self.aperture_size == 7 { 1.0 / 16.0 } else { 1.0 };
        (
            f64::from(self.low_threshold) * scale,
            f64::from(self.high_threshold) * scale,
        )
    }
}
