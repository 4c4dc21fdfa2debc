use ndarray::{Array2, ArrayView2};
use thiserror::Error;

use crate::color::Bgr;

#[derive(Clone, Copy, Debug, PartialEq)]
// Byte layout of a raw buffer handed to `Frame::new`.
pub enum PixelFormat {
    RGB8, // 3 bytes per pixel (R, G, B)
    BGR8, // 3 bytes per pixel (B, G, R)
}

impl PixelFormat {
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::RGB8 | PixelFormat::BGR8 => 3,
        }
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Buffer size doesn't match: expected {expected} bytes, got {actual}")]
    InvalidDimensions { expected: usize, actual: usize },

    #[error("Provided dimensions are zero")]
    ZeroDimensions,
}

pub struct FrameConfig<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// One captured image: a height x width grid of BGR samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: Array2<Bgr>,
}

impl Frame {
    // Validates buffer size against dimensions and builds the BGR grid.
    pub fn new(config: FrameConfig<'_>) -> Result<Self, FrameError> {
        if config.width == 0 || config.height == 0 {
            return Err(FrameError::ZeroDimensions);
        }

        let width = config.width as usize;
        let height = config.height as usize;
        let bytes_per_pixel = config.format.bytes_per_pixel();
        let expected = width * height * bytes_per_pixel;
        if config.data.len() != expected {
            return Err(FrameError::InvalidDimensions {
                expected,
                actual: config.data.len(),
            });
        }

        let samples: Vec<Bgr> = config
            .data
            .chunks_exact(bytes_per_pixel)
            .map(|p| match config.format {
                PixelFormat::RGB8 => Bgr::from_rgb(p[0], p[1], p[2]),
                PixelFormat::BGR8 => Bgr::new(p[0], p[1], p[2]),
            })
            .collect();

        let pixels = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            FrameError::InvalidDimensions {
                expected,
                actual: config.data.len(),
            }
        })?;
        Ok(Self { pixels })
    }

    /// Wraps an existing grid. No size check: an empty grid is representable
    /// so that a broken source can be detected downstream.
    pub fn from_array(pixels: Array2<Bgr>) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// (height, width)
    pub fn dim(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn view(&self) -> ArrayView2<'_, Bgr> {
        self.pixels.view()
    }

    /// Sample at column `x`, row `y`, if inside bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Bgr> {
        self.pixels.get((y, x)).copied()
    }

    // Packs pixels as 0RGB words, the layout window buffers expect.
    pub fn to_u32_buffer(&self) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|p| {
                let [r, g, b] = p.rgb();
                ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_buffer_is_reordered_to_bgr() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let frame = Frame::new(FrameConfig {
            data: &data,
            width: 2,
            height: 2,
            format: PixelFormat::RGB8,
        })
        .unwrap();

        assert_eq!(frame.dim(), (2, 2));
        assert_eq!(frame.pixel(0, 0), Some(Bgr::new(0, 0, 255)));
        assert_eq!(frame.pixel(1, 0), Some(Bgr::new(0, 255, 0)));
        assert_eq!(frame.pixel(0, 1), Some(Bgr::new(255, 0, 0)));
        assert_eq!(frame.pixel(1, 1), Some(Bgr::new(30, 20, 10)));
    }

    #[test]
    fn bgr_buffer_is_kept_as_is() {
        let data = [1, 2, 3, 4, 5, 6];
        let frame = Frame::new(FrameConfig {
            data: &data,
            width: 2,
            height: 1,
            format: PixelFormat::BGR8,
        })
        .unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.pixel(1, 0), Some(Bgr::new(4, 5, 6)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Frame::new(FrameConfig {
            data: &[],
            width: 0,
            height: 4,
            format: PixelFormat::BGR8,
        })
        .unwrap_err();
        assert!(matches!(err, FrameError::ZeroDimensions));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = Frame::new(FrameConfig {
            data: &[0; 5],
            width: 2,
            height: 1,
            format: PixelFormat::RGB8,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidDimensions {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn pixel_lookup_is_column_then_row() {
        let mut pixels = Array2::from_elem((2, 3), Bgr::ZERO);
        pixels[(1, 2)] = Bgr::new(9, 8, 7);
        let frame = Frame::from_array(pixels);

        assert_eq!(frame.dim(), (2, 3));
        assert_eq!(frame.pixel(2, 1), Some(Bgr::new(9, 8, 7)));
        assert_eq!(frame.pixel(1, 2), None);
        assert_eq!(frame.pixel(3, 0), None);
    }

    #[test]
    fn u32_buffer_packs_red_high() {
        let frame = Frame::from_array(Array2::from_elem((1, 1), Bgr::new(0x11, 0x22, 0x33)));
        assert_eq!(frame.to_u32_buffer(), vec![0x0033_2211]);
    }
}
