use crate::color::{ColorRange, Hsv};
use crate::error::DetectionError;

/// Collects clicked HSV samples and bounds them per channel.
#[derive(Clone, Debug, Default)]
pub struct RangeCalibrator {
    samples: Vec<Hsv>,
}

impl RangeCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new calibration session.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn add_sample(&mut self, hsv: Hsv) {
        self.samples.push(hsv);
    }

    pub fn samples(&self) -> &[Hsv] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Tightest range containing every sample. Raw min/max, no outlier
    /// rejection: a stray click widens the result.
    pub fn derive_range(&self) -> Result<ColorRange, DetectionError> {
        let (first, rest) = self
            .samples
            .split_first()
            .ok_or(DetectionError::EmptyCalibrationSet)?;

        let (lower, upper) = rest.iter().fold((first.0, first.0), |(mut lo, mut hi), s| {
            for ch in 0..3 {
                lo[ch] = lo[ch].min(s.0[ch]);
                hi[ch] = hi[ch].max(s.0[ch]);
            }
            (lo, hi)
        });

        let range = ColorRange::new(Hsv(lower), Hsv(upper))?;
        tracing::debug!(samples = self.samples.len(), %range, "derived range");
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_per_channel_min_max() {
        let mut calibrator = RangeCalibrator::new();
        calibrator.add_sample(Hsv::new(10, 50, 50));
        calibrator.add_sample(Hsv::new(15, 60, 70));
        calibrator.add_sample(Hsv::new(12, 40, 90));

        let range = calibrator.derive_range().unwrap();
        assert_eq!(range.lower(), Hsv::new(10, 40, 50));
        assert_eq!(range.upper(), Hsv::new(15, 60, 90));
    }

    #[test]
    fn empty_set_is_an_error() {
        let calibrator = RangeCalibrator::new();
        assert!(matches!(
            calibrator.derive_range(),
            Err(DetectionError::EmptyCalibrationSet)
        ));
    }

    #[test]
    fn single_sample_gives_point_range() {
        let mut calibrator = RangeCalibrator::new();
        calibrator.add_sample(Hsv::new(100, 200, 150));
        let range = calibrator.derive_range().unwrap();
        assert_eq!(range.lower(), range.upper());
        assert!(range.contains(Hsv::new(100, 200, 150)));
    }

    #[test]
    fn stray_sample_widens_range() {
        let mut calibrator = RangeCalibrator::new();
        calibrator.add_sample(Hsv::new(60, 200, 200));
        calibrator.add_sample(Hsv::new(62, 210, 205));
        calibrator.add_sample(Hsv::new(0, 0, 255));

        let range = calibrator.derive_range().unwrap();
        assert_eq!(range.lower(), Hsv::new(0, 0, 200));
        assert_eq!(range.upper(), Hsv::new(62, 210, 255));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut calibrator = RangeCalibrator::new();
        calibrator.add_sample(Hsv::new(1, 2, 3));
        calibrator.add_sample(Hsv::new(1, 2, 3));
        assert_eq!(calibrator.len(), 2);
    }

    #[test]
    fn derive_does_not_consume_samples_and_reset_clears() {
        let mut calibrator = RangeCalibrator::new();
        calibrator.add_sample(Hsv::new(1, 2, 3));
        let _ = calibrator.derive_range().unwrap();
        assert_eq!(calibrator.samples(), &[Hsv::new(1, 2, 3)]);

        calibrator.reset();
        assert!(calibrator.is_empty());
        assert!(calibrator.derive_range().is_err());
    }
}
