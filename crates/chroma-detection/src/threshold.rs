use ndarray::{Array2, Zip};

use crate::color::{bgr_to_hsv, Bgr, ColorRange};
use crate::error::DetectionError;
use crate::frame::Frame;

fn ensure_not_empty(frame: &Frame) -> Result<(), DetectionError> {
    if frame.is_empty() {
        return Err(DetectionError::InvalidFrame {
            width: frame.width(),
            height: frame.height(),
        });
    }
    Ok(())
}

// 255 where the pixel's HSV value lies in `range`, 0 elsewhere.
pub fn mask(frame: &Frame, range: &ColorRange) -> Result<Array2<u8>, DetectionError> {
    ensure_not_empty(frame)?;
    Ok(frame
        .view()
        .mapv(|bgr| if range.contains(bgr_to_hsv(bgr)) { 255 } else { 0 }))
}

/// Keeps pixels whose color lies in `range` and zeroes the rest.
/// The input frame is left untouched.
pub fn apply(frame: &Frame, range: &ColorRange) -> Result<Frame, DetectionError> {
    let mask = mask(frame, range)?;
    let masked = Zip::from(frame.view())
        .and(&mask)
        .map_collect(|&bgr, &m| if m == 255 { bgr } else { Bgr::ZERO });
    Ok(Frame::from_array(masked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsv;
    use crate::registry::ColorRegistry;

    // HSV (164, 75, 255), inside the built-in red range
    const PINK: Bgr = Bgr::new(220, 180, 255);
    const PURE_BLUE: Bgr = Bgr::new(255, 0, 0);
    const PURE_RED: Bgr = Bgr::new(0, 0, 255);
    const YELLOW: Bgr = Bgr::new(0, 255, 255);

    fn mixed_frame() -> Frame {
        Frame::from_array(Array2::from_shape_fn((3, 4), |(y, x)| match (x, y) {
            (0, 0) => PINK,
            (1, 0) => PURE_BLUE,
            (2, 1) => PURE_RED,
            (3, 2) => YELLOW,
            _ => Bgr::new(40, 40, 40),
        }))
    }

    #[test]
    fn red_range_keeps_only_pink() {
        let registry = ColorRegistry::with_builtin();
        let red = registry.lookup("red").unwrap();
        let frame = mixed_frame();

        let out = apply(&frame, &red).unwrap();
        assert_eq!(out.pixel(0, 0), Some(PINK));
        assert_eq!(out.pixel(1, 0), Some(Bgr::ZERO));
        // hue 0 sits outside 160..=180
        assert_eq!(out.pixel(2, 1), Some(Bgr::ZERO));
        assert_eq!(out.pixel(3, 2), Some(Bgr::ZERO));
        assert_eq!(out.pixel(1, 1), Some(Bgr::ZERO));
    }

    #[test]
    fn red_range_drops_hue_just_below_zero() {
        // HSV (0, 105, 255): rounds to hue 0, not 180
        let near_red = Frame::from_array(Array2::from_elem((1, 2), Bgr::new(151, 150, 255)));
        let red = ColorRegistry::with_builtin().lookup("red").unwrap();

        let out = apply(&near_red, &red).unwrap();
        assert!(out.view().iter().all(|&px| px == Bgr::ZERO));
        assert!(mask(&near_red, &red).unwrap().iter().all(|&m| m == 0));
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        let registry = ColorRegistry::with_builtin();
        let frame = mixed_frame();

        let blue = apply(&frame, &registry.lookup("blue").unwrap()).unwrap();
        assert_eq!(blue.pixel(1, 0), Some(PURE_BLUE));
        assert_eq!(blue.pixel(0, 0), Some(Bgr::ZERO));

        let yellow = apply(&frame, &registry.lookup("yellow").unwrap()).unwrap();
        assert_eq!(yellow.pixel(3, 2), Some(YELLOW));
        assert_eq!(yellow.pixel(1, 0), Some(Bgr::ZERO));
    }

    #[test]
    fn shape_is_preserved_and_input_untouched() {
        let frame = mixed_frame();
        let before = frame.clone();
        let range = ColorRange::new(Hsv::new(0, 0, 0), Hsv::new(10, 10, 10)).unwrap();

        let out = apply(&frame, &range).unwrap();
        assert_eq!(out.dim(), frame.dim());
        assert_eq!(frame, before);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let registry = ColorRegistry::with_builtin();
        let frame = mixed_frame();
        for name in ["red", "green", "blue", "yellow", "purple"] {
            let range = registry.lookup(name).unwrap();
            let once = apply(&frame, &range).unwrap();
            let twice = apply(&once, &range).unwrap();
            assert_eq!(once, twice, "{name}");
        }
    }

    #[test]
    fn output_is_repeatable() {
        let range = ColorRegistry::with_builtin().lookup("blue").unwrap();
        let frame = mixed_frame();
        assert_eq!(apply(&frame, &range).unwrap(), apply(&frame, &range).unwrap());
    }

    #[test]
    fn full_range_keeps_everything() {
        let frame = mixed_frame();
        let all = ColorRange::new(Hsv::new(0, 0, 0), Hsv::new(180, 255, 255)).unwrap();
        assert_eq!(apply(&frame, &all).unwrap(), frame);
    }

    #[test]
    fn mask_marks_contained_pixels() {
        let range = ColorRegistry::with_builtin().lookup("red").unwrap();
        let mask = mask(&mixed_frame(), &range).unwrap();
        assert_eq!(mask.dim(), (3, 4));
        assert_eq!(mask[(0, 0)], 255);
        assert_eq!(mask.iter().filter(|&&m| m == 255).count(), 1);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let range = ColorRegistry::with_builtin().lookup("red").unwrap();
        let empty = Frame::from_array(Array2::from_elem((0, 4), Bgr::ZERO));
        assert!(matches!(
            apply(&empty, &range),
            Err(DetectionError::InvalidFrame { width: 4, height: 0 })
        ));
        assert!(mask(&empty, &range).is_err());
    }
}
