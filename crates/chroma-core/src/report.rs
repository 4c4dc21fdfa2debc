use std::fmt;

use chroma_detection::{ColorRange, PixelFormats};

/// Operator-facing status produced by the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    AvailableColors(Vec<String>),
    ActiveColor(String),
    Pixel(PixelFormats),
    CalibrationStarted,
    SampleAdded { count: usize },
    RangeRegistered { name: String, range: ColorRange },
    ViewChanged(&'static str),
    SourceExhausted,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::AvailableColors(names) => write!(f, "Color Choices: {}", names.join(", ")),
            Status::ActiveColor(name) => write!(f, "Applying {name} color mask to video feed..."),
            Status::Pixel(formats) => write!(f, "{formats}"),
            Status::CalibrationStarted => write!(f, "Calibration started, click pixels to sample"),
            Status::SampleAdded { count } => write!(f, "Samples collected: {count}"),
            Status::RangeRegistered { name, range } => write!(
                f,
                "Registered '{name}': lower (H,S,V) {} upper (H,S,V) {}",
                range.lower(),
                range.upper()
            ),
            Status::ViewChanged(view) => write!(f, "Showing {view} view"),
            Status::SourceExhausted => write!(f, "Video source exhausted"),
            Status::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

pub trait StatusSink {
    fn emit(&mut self, status: Status);
}

impl StatusSink for Vec<Status> {
    fn emit(&mut self, status: Status) {
        self.push(status);
    }
}

/// Prints every status line to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, status: Status) {
        println!("{status}");
    }
}
