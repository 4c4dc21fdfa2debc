use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use chroma_detection::{Frame, FrameConfig, PixelFormat};

use crate::error::{ChromaError, Result};
use crate::io::VideoSource;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Plays the still images of a directory as a video, in file name order.
/// The end of the listing is end of stream.
#[derive(Debug)]
pub struct ReplaySource {
    pending: VecDeque<PathBuf>,
    released: bool,
}

impl ReplaySource {
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let mut paths: Vec<PathBuf> = fs::read_dir(directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_image(path))
            .collect();
        if paths.is_empty() {
            return Err(ChromaError::EmptyReplay(directory.to_path_buf()));
        }
        paths.sort();

        tracing::info!(directory = %directory.display(), frames = paths.len(), "replay source opened");
        Ok(Self {
            pending: paths.into(),
            released: false,
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl VideoSource for ReplaySource {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        if self.released {
            return Ok(None);
        }
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };

        let rgb = image::open(&path)?.to_rgb8();
        tracing::debug!(path = %path.display(), width = rgb.width(), height = rgb.height(), "replaying frame");
        let frame = Frame::new(FrameConfig {
            data: rgb.as_raw(),
            width: rgb.width(),
            height: rgb.height(),
            format: PixelFormat::RGB8,
        })?;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        self.released = true;
        self.pending.clear();
    }
}
