use std::path::PathBuf;

use chroma_detection::{DetectionError, FrameError};
use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum ChromaError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Camera error: {0}")]
    Camera(#[from] nokhwa::NokhwaError),

    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("No images found in {}", .0.display())]
    EmptyReplay(PathBuf),

    #[error("Cannot {action} while session is {state:?}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },
}

pub type Result<T, E = ChromaError> = std::result::Result<T, E>;
