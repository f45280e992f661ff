mod error;
mod frame_ops;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{ConfigError, FrameError};
pub use frame_ops::canny::{detect_edges, CannyEdges, EDGE, NON_EDGE};
pub use frame_ops::convert_gray::{convert_to_gray, luma, ConvertToGray};
pub use frame_ops::params::{CannyParams, GradientNorm, MAX_APERTURE, MIN_APERTURE};
pub use frame_ops::pixel_buffer::{ChannelLayout, PixelBuffer};
pub use frame_ops::processor::{
    processor_info, FilterMode, FrameOutcome, FrameProcessor, FrameProcessorConfig,
    InvalidConfigPolicy,
};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
