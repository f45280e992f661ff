//! Per-frame entry points for a live capture stream.
//!
//! Nothing here returns an error: a bad frame or a bad configuration is
//! logged and the frame is passed through unmodified, so one broken frame
//! cannot stop the stream.

use crate::error::{ConfigError, FrameError};
use crate::frame_ops::canny::{detect_edges, EDGE};
use crate::frame_ops::convert_gray::convert_to_gray;
use crate::frame_ops::params::CannyParams;
use crate::frame_ops::pixel_buffer::PixelBuffer;
use crate::utils::validate_non_empty_image;
use log::{debug, error, warn};

/// Filter applied by [`FrameProcessor::process_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterMode {
    /// Grayscale conversion followed by Canny edge detection
    #[default]
    Canny,
    /// Grayscale conversion only
    Grayscale,
}

/// What to do when the configured [`CannyParams`] are invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvalidConfigPolicy {
    /// Log and pass the frame through unmodified
    #[default]
    Skip,
    /// Log and process with [`CannyParams::clamped`]
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameProcessorConfig {
    pub mode: FilterMode,
    pub canny: CannyParams,
    pub invalid_config: InvalidConfigPolicy,
}

/// Result of one hot-path call
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The filter ran and the buffer now holds its output
    Processed,
    /// The filter was skipped and the buffer is unchanged
    Skipped(FrameError),
}

impl FrameOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed)
    }
}

/// Stateless frame filter configured once and applied to every frame
///
/// Holds only its configuration, so one instance can be shared across
/// capture threads as long as each frame has its own buffer. The Canny
/// parameters are resolved against [`InvalidConfigPolicy`] at construction.
#[derive(Debug, Clone)]
pub struct FrameProcessor {
    config: FrameProcessorConfig,
    canny: Result<CannyParams, ConfigError>,
}

impl Default for FrameProcessor {
    fn default() -> Self {
        Self::new(FrameProcessorConfig::default())
    }
}

impl FrameProcessor {
    pub fn new(config: FrameProcessorConfig) -> Self {
        let canny = match (config.canny.validate(), config.invalid_config) {
            (Ok(()), _) => Ok(config.canny),
            (Err(err), InvalidConfigPolicy::Skip) => {
                warn!("invalid Canny parameters, edge frames will be skipped: {err}");
                Err(err)
            }
            (Err(err), InvalidConfigPolicy::Clamp) => {
                let clamped = config.canny.clamped();
                warn!("invalid Canny parameters ({err}), using clamped {clamped:?}");
                Ok(clamped)
            }
        };
        Self { config, canny }
    }

    pub fn config(&self) -> &FrameProcessorConfig {
        &self.config
    }

    /// Parameters applied to each frame, `None` when edge frames are skipped.
    pub fn effective_params(&self) -> Option<&CannyParams> {
        self.canny.as_ref().ok()
    }

    /// Applies the configured [`FilterMode`].
    pub fn process_frame(&self, buffer: &mut PixelBuffer) -> FrameOutcome {
        match self.config.mode {
            FilterMode::Canny => self.apply_canny_edge(buffer),
            FilterMode::Grayscale => self.apply_grayscale(buffer),
        }
    }

    /// Converts to gray if needed and replaces the frame with its edge map.
    pub fn apply_canny_edge(&self, buffer: &mut PixelBuffer) -> FrameOutcome {
        if let Err(err) = validate_non_empty_image(buffer.width(), buffer.height()) {
            error!("skipping frame: {err}");
            return FrameOutcome::Skipped(err);
        }
        let params = match &self.canny {
            Ok(params) => params,
            Err(err) => {
                warn!("skipping frame: invalid Canny parameters: {err}");
                return FrameOutcome::Skipped(err.clone().into());
            }
        };

        match detect_edges(buffer, params) {
            Ok(()) => {
                debug!(
                    "Canny edge detection applied to {}x{} frame, {} edge pixels",
                    buffer.width(),
                    buffer.height(),
                    buffer.as_raw().iter().filter(|&&v| v == EDGE).count()
                );
                FrameOutcome::Processed
            }
            Err(err) => {
                error!("skipping frame: {err}");
                FrameOutcome::Skipped(err)
            }
        }
    }

    /// Reduces the frame to one intensity channel.
    pub fn apply_grayscale(&self, buffer: &mut PixelBuffer) -> FrameOutcome {
        match convert_to_gray(buffer) {
            Ok(()) => {
                debug!(
                    "grayscale filter applied to {}x{} frame",
                    buffer.width(),
                    buffer.height()
                );
                FrameOutcome::Processed
            }
            Err(err) => {
                error!("skipping frame: {err}");
                FrameOutcome::Skipped(err)
            }
        }
    }
}

/// Human-readable identification of this processor.
///
/// Purely informational, meant for a startup log line confirming the
/// library is linked.
pub fn processor_info() -> String {
    format!(
        "{} v{}: grayscale and Canny edge detection (pure Rust)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}
