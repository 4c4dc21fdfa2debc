//! Color-range segmentation core: HSV conversion, named ranges,
//! click calibration and per-frame thresholding.

pub mod calibrate;
pub mod color;
pub mod error;
pub mod frame;
pub mod registry;
pub mod threshold;

pub use calibrate::RangeCalibrator;
pub use color::{bgr_to_hsv, describe, Bgr, ColorRange, Hsv, PixelFormats};
pub use error::DetectionError;
pub use frame::{Frame, FrameConfig, FrameError, PixelFormat};
pub use registry::ColorRegistry;
