use chroma_detection::Frame;

use crate::error::Result;

/// Discrete input delivered to the session between frame ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    QuitRequested,
    /// Operator wants to pick a new color: the choices are reported, then
    /// the input is asked for a name.
    ColorChoicesRequested,
    ColorChangeRequested(String),
    /// Frame coordinates: column `x`, row `y`.
    PointerClicked { x: usize, y: usize },
    CalibrationStarted,
    CalibrationFinalized(String),
    ViewToggled,
}

pub trait VideoSource {
    /// Blocks until a frame is available. `Ok(None)` is end of stream.
    fn read_frame(&mut self) -> Result<Option<Frame>>;

    fn release(&mut self) {}
}

pub trait Renderer {
    fn show(&mut self, frame: &Frame) -> Result<()>;
}

pub trait ControlInput {
    fn poll_events(&mut self) -> Vec<ControlEvent>;

    /// Name typed in answer to `ColorChoicesRequested`. `None` cancels.
    fn choose_color(&mut self) -> Option<String> {
        None
    }
}

impl<T: VideoSource + ?Sized> VideoSource for Box<T> {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        (**self).read_frame()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
