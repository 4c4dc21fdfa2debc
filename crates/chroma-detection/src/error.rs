use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Unknown color '{name}'. Choose from: {}", available.join(", "))]
    UnknownColor { name: String, available: Vec<String> },

    #[error("No samples collected, nothing to derive a range from")]
    EmptyCalibrationSet,

    #[error("Frame is empty ({width}x{height})")]
    InvalidFrame { width: usize, height: usize },

    #[error("Lower bound {lower} exceeds upper bound {upper} on channel {channel}")]
    InvalidRange { channel: usize, lower: u8, upper: u8 },
}
