//! Live color segmentation: video sources, the window, configuration and
//! the session loop around the `chroma_detection` core.

pub mod camera;
pub mod config;
pub mod console;
pub mod error;
pub mod io;
pub mod replay;
pub mod report;
pub mod session;
pub mod window;

pub use config::Config;
pub use error::{ChromaError, Result};
pub use io::{ControlEvent, ControlInput, Renderer, VideoSource};
pub use report::{ConsoleSink, Status, StatusSink};
pub use session::{SegmentationSession, SessionState, TickOutcome, View};

use camera::CameraSource;
use replay::ReplaySource;
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Replay directory when configured, the camera otherwise.
pub fn open_source(config: &Config) -> Result<Box<dyn VideoSource>> {
    match &config.replay {
        Some(replay) => Ok(Box::new(ReplaySource::open(&replay.directory)?)),
        None => Ok(Box::new(CameraSource::open(&config.camera)?)),
    }
}

/// Reads config, falling back to defaults, and starts logging.
pub fn bootstrap() -> Config {
    let loaded = Config::load_default();
    let level = loaded
        .as_ref()
        .map(|c| c.system.log_level.clone())
        .unwrap_or_else(|_| config::SystemConfig::default().log_level);
    init_tracing(&level);

    loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = config::DEFAULT_CONFIG_PATH, "Using default configuration");
        Config::default()
    })
}
