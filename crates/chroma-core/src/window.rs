use chroma_detection::Frame;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::console::prompt;
use crate::error::Result;
use crate::io::{ControlEvent, ControlInput, Renderer};

/// Desktop window showing the session output and turning keys and clicks
/// into control events.
///
/// Keys: `q`/`Esc` quit, `c` change color, `k` start calibration,
/// `f` finalize calibration, `r` toggle raw/masked view.
pub struct WindowDisplay {
    window: Window,
    frame_dim: (usize, usize),
    mouse_was_down: bool,
}

impl WindowDisplay {
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(fps);
        Ok(Self {
            window,
            frame_dim: (width, height),
            mouse_was_down: false,
        })
    }

    // Maps window coordinates onto the last frame shown.
    fn to_frame_coords(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (win_w, win_h) = self.window.get_size();
        let (frame_w, frame_h) = self.frame_dim;
        if win_w == 0 || win_h == 0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let fx = (x * frame_w as f32 / win_w as f32) as usize;
        let fy = (y * frame_h as f32 / win_h as f32) as usize;
        (fx < frame_w && fy < frame_h).then_some((fx, fy))
    }

    fn poll_click(&mut self) -> Option<ControlEvent> {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pressed = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        if !pressed {
            return None;
        }
        let (x, y) = self.window.get_mouse_pos(MouseMode::Discard)?;
        let (x, y) = self.to_frame_coords(x, y)?;
        Some(ControlEvent::PointerClicked { x, y })
    }
}

impl Renderer for WindowDisplay {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.frame_dim = (frame.width(), frame.height());
        let buffer = frame.to_u32_buffer();
        self.window
            .update_with_buffer(&buffer, frame.width(), frame.height())?;
        Ok(())
    }
}

impl ControlInput for WindowDisplay {
    fn poll_events(&mut self) -> Vec<ControlEvent> {
        if !self.window.is_open() {
            return vec![ControlEvent::QuitRequested];
        }

        let mut events = Vec::new();
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            match key {
                Key::Q | Key::Escape => events.push(ControlEvent::QuitRequested),
                Key::C => events.push(ControlEvent::ColorChoicesRequested),
                Key::K => events.push(ControlEvent::CalibrationStarted),
                Key::F => {
                    if let Some(name) = prompt("Name for calibrated color: ") {
                        events.push(ControlEvent::CalibrationFinalized(name));
                    }
                }
                Key::R => events.push(ControlEvent::ViewToggled),
                _ => {}
            }
        }
        events.extend(self.poll_click());
        events
    }

    fn choose_color(&mut self) -> Option<String> {
        prompt("Specify Color Mask: ")
    }
}
