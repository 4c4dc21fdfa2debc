use crate::color::ColorRange;
use crate::error::DetectionError;

// HSV bounds for the colors every session starts with.
const BUILTIN_RANGES: [(&str, ColorRange); 5] = [
    ("red", ColorRange::from_bounds([160, 40, 200], [180, 120, 255])),
    ("green", ColorRange::from_bounds([50, 40, 50], [90, 255, 255])),
    ("blue", ColorRange::from_bounds([90, 50, 50], [120, 255, 255])),
    ("yellow", ColorRange::from_bounds([20, 100, 100], [30, 255, 255])),
    ("purple", ColorRange::from_bounds([125, 50, 50], [140, 255, 255])),
];

/// Named HSV ranges in registration order. Names are matched exactly.
#[derive(Clone, Debug)]
pub struct ColorRegistry {
    entries: Vec<(String, ColorRange)>,
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ColorRegistry {
    pub fn with_builtin() -> Self {
        Self {
            entries: BUILTIN_RANGES
                .iter()
                .map(|(name, range)| (name.to_string(), *range))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<ColorRange, DetectionError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, range)| *range)
            .ok_or_else(|| DetectionError::UnknownColor {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Inserts `range` under `name`. An existing entry is replaced in place
    /// and returned.
    pub fn register(&mut self, name: impl Into<String>, range: ColorRange) -> Option<ColorRange> {
        let name = name.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            tracing::debug!(color = %name, old = %slot, new = %range, "replacing color range");
            return Some(std::mem::replace(slot, range));
        }
        tracing::debug!(color = %name, %range, "registering color range");
        self.entries.push((name, range));
        None
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
