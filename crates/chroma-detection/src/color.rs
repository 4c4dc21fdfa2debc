use std::fmt;

use crate::error::DetectionError;

/// One captured pixel, channels in B, G, R order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr(pub [u8; 3]);

/// One pixel in 8-bit HSV: hue in half degrees (0-179), saturation and value in 0-255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hsv(pub [u8; 3]);

impl Bgr {
    pub const ZERO: Bgr = Bgr([0, 0, 0]);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Bgr([b, g, r])
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Bgr([b, g, r])
    }

    pub const fn rgb(&self) -> [u8; 3] {
        [self.0[2], self.0[1], self.0[0]]
    }
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Hsv([h, s, v])
    }
}

impl fmt::Display for Bgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

/// Inclusive HSV box. `lower[i] <= upper[i]` holds on every channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorRange {
    lower: Hsv,
    upper: Hsv,
}

impl ColorRange {
    pub fn new(lower: Hsv, upper: Hsv) -> Result<Self, DetectionError> {
        for channel in 0..3 {
            if lower.0[channel] > upper.0[channel] {
                return Err(DetectionError::InvalidRange {
                    channel,
                    lower: lower.0[channel],
                    upper: upper.0[channel],
                });
            }
        }
        Ok(Self { lower, upper })
    }

    // Only for literals known to be ordered.
    pub(crate) const fn from_bounds(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            lower: Hsv(lower),
            upper: Hsv(upper),
        }
    }

    pub const fn lower(&self) -> Hsv {
        self.lower
    }

    pub const fn upper(&self) -> Hsv {
        self.upper
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        let [h, s, v] = hsv.0;
        h >= self.lower.0[0]
            && h <= self.upper.0[0]
            && s >= self.lower.0[1]
            && s <= self.upper.0[1]
            && v >= self.lower.0[2]
            && v <= self.upper.0[2]
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lower {} upper {}", self.lower, self.upper)
    }
}

// Converts a BGR sample to 8-bit HSV with the hue halved to fit a byte.
pub fn bgr_to_hsv(bgr: Bgr) -> Hsv {
    let [b, g, r] = bgr.0;
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // round the half-degree hue before wrapping so it stays in 0..=179
    let mut h_half = (h / 2.0).round();
    if h_half < 0.0 {
        h_half += 180.0;
    }
    if h_half >= 180.0 {
        h_half -= 180.0;
    }
    let h_byte = h_half as u8;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let s_byte = (s * 255.0).round() as u8;
    let v_byte = (max * 255.0).round() as u8;

    Hsv([h_byte, s_byte, v_byte])
}

/// Every representation of one sampled pixel shown to the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelFormats {
    pub bgr: Bgr,
    pub rgb: [u8; 3],
    pub hex: String,
    pub hsv: Hsv,
    /// Captured channels with an opaque alpha appended.
    pub rgba: [u8; 4],
}

pub fn describe(bgr: Bgr) -> PixelFormats {
    let rgb = bgr.rgb();
    let [b, g, r] = bgr.0;
    PixelFormats {
        bgr,
        rgb,
        hex: format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]),
        hsv: bgr_to_hsv(bgr),
        rgba: [b, g, r, 255],
    }
}

impl fmt::Display for PixelFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        let [a0, a1, a2, a3] = self.rgba;
        write!(
            f,
            "BGR: {}, RGB: ({}, {}, {}), Hex: {}, HSV: {}, RGBA: ({}, {}, {}, {})",
            self.bgr, r, g, b, self.hex, self.hsv, a0, a1, a2, a3
        )
    }
}
