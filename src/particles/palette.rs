use serde::{Deserialize, Serialize};

/// One partition of the field palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueBand {
    /// Hue in [0, 1)
    pub hue: f32,
    /// Relative selection weight
    pub weight: f32,
}

impl HueBand {
    pub const fn new(hue: f32, weight: f32) -> Self {
        Self { hue, weight }
    }
}

/// Purple/pink, cyan/blue and pink/red, equally likely
pub const DEFAULT_BANDS: [HueBand; 3] = [
    HueBand::new(0.8, 1.0),
    HueBand::new(0.5, 1.0),
    HueBand::new(0.95, 1.0),
];

/// How HSL output is stored in the color buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// HSL→RGB result is taken as working-space (linear) RGB directly
    #[default]
    Working,
    /// HSL→RGB result is sRGB-encoded and decoded to linear before storage
    Srgb,
}

/// Pick the band a uniform sample in [0, 1) falls into.
///
/// Bands occupy consecutive slices of [0, 1) proportional to their weight.
/// Zero-weight bands are never picked; the last positive band absorbs any
/// rounding at the top of the range.
pub fn pick_band(bands: &[HueBand], sample: f32) -> usize {
    let total: f32 = bands.iter().map(|b| b.weight.max(0.0)).sum();
    let mut cumulative = 0.0;
    let mut last_positive = 0;

    for (i, band) in bands.iter().enumerate() {
        let weight = band.weight.max(0.0);
        if weight <= 0.0 {
            continue;
        }
        last_positive = i;
        cumulative += weight;
        if sample < cumulative / total {
            return i;
        }
    }

    last_positive
}

/// Convert HSL (all components in [0, 1]) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;

    [
        hue_channel(lo, hi, h + 1.0 / 3.0),
        hue_channel(lo, hi, h),
        hue_channel(lo, hi, h - 1.0 / 3.0),
    ]
}

fn hue_channel(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// sRGB transfer curve decode for a single channel
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

/// Resolve a band color to the stored RGB triple.
pub fn band_color(
    band: &HueBand,
    saturation: f32,
    lightness: f32,
    color_space: ColorSpace,
) -> [f32; 3] {
    let rgb = hsl_to_rgb(band.hue, saturation, lightness);
    match color_space {
        ColorSpace::Working => rgb,
        ColorSpace::Srgb => rgb.map(srgb_to_linear),
    }
}
