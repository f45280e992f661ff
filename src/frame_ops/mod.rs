pub mod canny;
pub mod convert_gray;
pub mod gaussian;
pub mod gradient;
pub mod params;
pub mod pixel_buffer;
pub mod processor;
