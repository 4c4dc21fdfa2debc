use std::time::{Duration, Instant};

use chroma_detection::{
    describe, threshold, ColorRange, ColorRegistry, DetectionError, Frame, RangeCalibrator,
};

use crate::error::{ChromaError, Result};
use crate::io::{ControlEvent, ControlInput, Renderer, VideoSource};
use crate::report::{Status, StatusSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Terminated,
}

/// What the renderer receives each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Masked,
    Raw,
}

impl View {
    pub const fn label(&self) -> &'static str {
        match self {
            View::Masked => "masked",
            View::Raw => "raw",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            View::Masked => View::Raw,
            View::Raw => View::Masked,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Terminated,
}

/// Pulls frames from a source, masks them with the active color and hands
/// them to a renderer. Owns the source, the registry and the calibration set
/// for the whole run.
pub struct SegmentationSession<S> {
    source: S,
    registry: ColorRegistry,
    calibrator: RangeCalibrator,
    state: SessionState,
    active: Option<(String, ColorRange)>,
    view: View,
    current_frame: Option<Frame>,
    frames: u64,
    last_log: Instant,
}

impl<S: VideoSource> SegmentationSession<S> {
    pub fn new(source: S, registry: ColorRegistry) -> Self {
        Self {
            source,
            registry,
            calibrator: RangeCalibrator::new(),
            state: SessionState::Idle,
            active: None,
            view: View::Masked,
            current_frame: None,
            frames: 0,
            last_log: Instant::now(),
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_color(&self) -> Option<&str> {
        self.active.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn active_range(&self) -> Option<ColorRange> {
        self.active.as_ref().map(|(_, range)| *range)
    }

    pub fn registry(&self) -> &ColorRegistry {
        &self.registry
    }

    pub fn calibrator(&self) -> &RangeCalibrator {
        &self.calibrator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Most recent unmasked frame, the one pointer clicks sample from.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.current_frame.as_ref()
    }

    /// Reports every registered name, runtime registrations included.
    pub fn announce_colors(&self, sink: &mut impl StatusSink) {
        sink.emit(Status::AvailableColors(self.color_names()));
    }

    /// Idle -> Running under `color`. An unknown color leaves the session idle.
    pub fn start(&mut self, color: &str, sink: &mut impl StatusSink) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(ChromaError::InvalidTransition {
                state: self.state,
                action: "start",
            });
        }

        let range = self.registry.lookup(color)?;
        self.active = Some((color.to_string(), range));
        self.state = SessionState::Running;

        tracing::info!(color, %range, "session started");
        sink.emit(Status::ActiveColor(color.to_string()));
        Ok(())
    }

    /// Starts under the first registered name `ask` yields. Unknown names
    /// are reported and asked for again. `Ok(false)` once `ask` gives up.
    pub fn start_prompted(
        &mut self,
        mut ask: impl FnMut() -> Option<String>,
        sink: &mut impl StatusSink,
    ) -> Result<bool> {
        while let Some(color) = ask() {
            match self.start(&color, sink) {
                Ok(()) => return Ok(true),
                Err(ChromaError::Detection(e @ DetectionError::UnknownColor { .. })) => {
                    tracing::warn!(error = %e, "initial color rejected");
                    sink.emit(Status::Error(e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    /// Reads one frame, thresholds it and renders it. A missing frame or a
    /// failed read ends the session.
    pub fn tick<R>(&mut self, renderer: &mut R, sink: &mut impl StatusSink) -> Result<TickOutcome>
    where
        R: Renderer + ?Sized,
    {
        let range = match (self.state, self.active.as_ref()) {
            (SessionState::Running, Some((_, range))) => *range,
            _ => {
                return Err(ChromaError::InvalidTransition {
                    state: self.state,
                    action: "tick",
                })
            }
        };

        let frame = match self.source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!("video source exhausted");
                sink.emit(Status::SourceExhausted);
                self.terminate();
                return Ok(TickOutcome::Terminated);
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame read failed");
                sink.emit(Status::Error(e.to_string()));
                self.terminate();
                return Ok(TickOutcome::Terminated);
            }
        };

        let masked = match threshold::apply(&frame, &range) {
            Ok(masked) => masked,
            Err(e) => {
                tracing::error!(error = %e, "source delivered an unusable frame");
                sink.emit(Status::Error(e.to_string()));
                self.terminate();
                return Ok(TickOutcome::Terminated);
            }
        };

        match self.view {
            View::Masked => renderer.show(&masked)?,
            View::Raw => renderer.show(&frame)?,
        }
        self.current_frame = Some(frame);
        self.log_throughput();
        Ok(TickOutcome::Rendered)
    }

    /// Applies one control event. Recoverable problems are reported to
    /// `sink` and leave the session running.
    pub fn handle(&mut self, event: ControlEvent, sink: &mut impl StatusSink) -> Result<()> {
        if self.state != SessionState::Running {
            return Err(ChromaError::InvalidTransition {
                state: self.state,
                action: "handle events",
            });
        }

        match event {
            ControlEvent::QuitRequested => {
                tracing::info!("quit requested");
                self.terminate();
            }
            ControlEvent::ColorChoicesRequested => self.announce_colors(sink),
            ControlEvent::ColorChangeRequested(name) => self.switch_color(&name, sink),
            ControlEvent::PointerClicked { x, y } => self.sample_at(x, y, sink),
            ControlEvent::CalibrationStarted => {
                self.calibrator.reset();
                tracing::info!("calibration started");
                sink.emit(Status::CalibrationStarted);
            }
            ControlEvent::CalibrationFinalized(name) => self.finalize_calibration(name, sink),
            ControlEvent::ViewToggled => {
                self.view = self.view.toggled();
                sink.emit(Status::ViewChanged(self.view.label()));
            }
        }
        Ok(())
    }

    /// Full loop: report the choices, start, then poll events and tick until
    /// terminated.
    pub fn run<W>(&mut self, color: &str, window: &mut W, sink: &mut impl StatusSink) -> Result<()>
    where
        W: Renderer + ControlInput + ?Sized,
    {
        self.announce_colors(sink);
        self.start(color, sink)?;
        self.drive(window, sink)
    }

    /// Loop of an already started session. Events are polled at the top of
    /// every iteration, before the frame is read.
    pub fn drive<W>(&mut self, window: &mut W, sink: &mut impl StatusSink) -> Result<()>
    where
        W: Renderer + ControlInput + ?Sized,
    {
        if self.state != SessionState::Running {
            return Err(ChromaError::InvalidTransition {
                state: self.state,
                action: "drive",
            });
        }

        while self.state == SessionState::Running {
            for event in window.poll_events() {
                let wants_color = event == ControlEvent::ColorChoicesRequested;
                self.handle(event, sink)?;
                if self.state != SessionState::Running {
                    break;
                }
                if wants_color {
                    if let Some(name) = window.choose_color() {
                        self.handle(ControlEvent::ColorChangeRequested(name), sink)?;
                    }
                }
            }
            if self.state != SessionState::Running {
                break;
            }

            if let Err(e) = self.tick(window, sink) {
                self.terminate();
                return Err(e);
            }
        }
        Ok(())
    }

    fn color_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    fn switch_color(&mut self, name: &str, sink: &mut impl StatusSink) {
        match self.registry.lookup(name) {
            Ok(range) => {
                tracing::info!(color = name, %range, "switching color");
                self.active = Some((name.to_string(), range));
                sink.emit(Status::ActiveColor(name.to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, current = ?self.active_color(), "color change rejected");
                sink.emit(Status::Error(e.to_string()));
            }
        }
    }

    fn sample_at(&mut self, x: usize, y: usize, sink: &mut impl StatusSink) {
        let Some(frame) = self.current_frame.as_ref() else {
            sink.emit(Status::Error("No frame captured yet".to_string()));
            return;
        };
        let Some(bgr) = frame.pixel(x, y) else {
            sink.emit(Status::Error(format!(
                "Pixel ({x}, {y}) is outside the {}x{} frame",
                frame.width(),
                frame.height()
            )));
            return;
        };

        let formats = describe(bgr);
        self.calibrator.add_sample(formats.hsv);
        tracing::debug!(x, y, hsv = %formats.hsv, samples = self.calibrator.len(), "sampled pixel");

        sink.emit(Status::Pixel(formats));
        sink.emit(Status::SampleAdded {
            count: self.calibrator.len(),
        });
    }

    fn finalize_calibration(&mut self, name: String, sink: &mut impl StatusSink) {
        let range = match self.calibrator.derive_range() {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(error = %e, "calibration yielded nothing");
                sink.emit(Status::Error(e.to_string()));
                return;
            }
        };

        self.registry.register(name.clone(), range);
        // a recalibrated active color takes effect on the next tick
        if let Some((active, current)) = self.active.as_mut() {
            if *active == name {
                *current = range;
            }
        }

        tracing::info!(
            color = %name,
            lower = %range.lower(),
            upper = %range.upper(),
            samples = self.calibrator.len(),
            "range registered"
        );
        sink.emit(Status::RangeRegistered { name, range });
    }

    fn terminate(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.source.release();
        self.state = SessionState::Terminated;
        tracing::info!(color = ?self.active_color(), "session terminated");
    }

    fn log_throughput(&mut self) {
        self.frames += 1;
        if self.last_log.elapsed() >= Duration::from_secs(1) {
            tracing::info!(
                frames_in_window = self.frames,
                color = ?self.active_color(),
                view = self.view.label()
            );
            self.frames = 0;
            self.last_log = Instant::now();
        }
    }
}
