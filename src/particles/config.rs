use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::particles::error::FieldError;
use crate::particles::palette::{ColorSpace, HueBand, DEFAULT_BANDS};
use crate::particles::render::PointMaterial;

/// Particle count used when none is given
pub const DEFAULT_PARTICLE_COUNT: usize = 2000;

/// Complete particle field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field
    pub count: usize,
    /// Side length of the spawn cube centered at the origin
    pub extent: f32,
    /// Base size range [min, max)
    pub size_range: [f32; 2],
    pub palette: PaletteConfig,
    pub wave: WaveConfig,
    pub rotation: RotationConfig,
    pub material: PointMaterial,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            extent: 50.0,
            size_range: [0.05, 0.20],
            palette: PaletteConfig::default(),
            wave: WaveConfig::default(),
            rotation: RotationConfig::default(),
            material: PointMaterial::default(),
        }
    }
}

/// Color assignment at generation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub bands: Vec<HueBand>,
    pub saturation: f32,
    pub lightness_base: f32,
    /// Lightness is `lightness_base + uniform[0, lightness_jitter)`
    pub lightness_jitter: f32,
    pub color_space: ColorSpace,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
            saturation: 0.8,
            lightness_base: 0.5,
            lightness_jitter: 0.2,
            color_space: ColorSpace::Working,
        }
    }
}

/// Radial wave and size pulse parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub amplitude: f32,
    /// Angular speed of the wave in radians per second
    pub frequency: f32,
    /// Phase offset per unit of distance from the origin
    pub phase_scale: f32,
    /// Fraction of the wave applied as radial displacement
    pub displacement_scale: f32,
    /// Particles at or inside this radius are never displaced
    pub min_radius: f32,
    pub pulse_rate: f32,
    pub pulse_amplitude: f32,
    pub pulse_base: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            frequency: 0.5,
            phase_scale: 0.1,
            displacement_scale: 0.2,
            min_radius: 0.1,
            pulse_rate: 2.0,
            pulse_amplitude: 0.05,
            pulse_base: 0.1,
        }
    }
}

/// Whole-field spin, radians per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub yaw_rate: f32,
    pub pitch_rate: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            yaw_rate: 0.03,
            pitch_rate: 0.01,
        }
    }
}

impl FieldConfig {
    /// Default configuration with a different particle count
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(raw: &str) -> Result<Self, FieldError> {
        let config: FieldConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::info!(
            "Loaded particle field config from {} ({} particles)",
            path.display(),
            config.count
        );
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, FieldError> {
        toml::to_string_pretty(self)
            .map_err(|e| FieldError::invalid_config("config", e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count == 0 {
            return Err(FieldError::EmptyField);
        }
        if self.count > u32::MAX as usize {
            return Err(FieldError::invalid_config(
                "count",
                format!("{} exceeds the particle id space", self.count),
            ));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(FieldError::invalid_config(
                "extent",
                format!("must be finite and positive, got {}", self.extent),
            ));
        }

        let [min_size, max_size] = self.size_range;
        if !(min_size.is_finite() && max_size.is_finite()) || min_size < 0.0 || min_size > max_size {
            return Err(FieldError::invalid_config(
                "size_range",
                format!("must be ordered and non-negative, got [{}, {}]", min_size, max_size),
            ));
        }

        self.palette.validate()?;
        self.wave.validate()?;
        self.rotation.validate()?;
        Ok(())
    }
}

impl PaletteConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.bands.is_empty() {
            return Err(FieldError::invalid_config("palette.bands", "at least one band is required"));
        }
        for band in &self.bands {
            if !unit_range(band.hue) {
                return Err(FieldError::invalid_config(
                    "palette.bands.hue",
                    format!("must be in [0, 1], got {}", band.hue),
                ));
            }
            if !band.weight.is_finite() || band.weight < 0.0 {
                return Err(FieldError::invalid_config(
                    "palette.bands.weight",
                    format!("must be finite and non-negative, got {}", band.weight),
                ));
            }
        }
        if self.bands.iter().all(|b| b.weight <= 0.0) {
            return Err(FieldError::invalid_config(
                "palette.bands.weight",
                "total weight must be positive",
            ));
        }

        if !unit_range(self.saturation) {
            return Err(FieldError::invalid_config(
                "palette.saturation",
                format!("must be in [0, 1], got {}", self.saturation),
            ));
        }
        if !unit_range(self.lightness_base)
            || !self.lightness_jitter.is_finite()
            || self.lightness_jitter < 0.0
            || self.lightness_base + self.lightness_jitter > 1.0
        {
            return Err(FieldError::invalid_config(
                "palette.lightness",
                format!(
                    "base {} + jitter {} must stay within [0, 1]",
                    self.lightness_base, self.lightness_jitter
                ),
            ));
        }
        Ok(())
    }
}

impl WaveConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        let values = [
            ("wave.amplitude", self.amplitude),
            ("wave.frequency", self.frequency),
            ("wave.phase_scale", self.phase_scale),
            ("wave.displacement_scale", self.displacement_scale),
            ("wave.min_radius", self.min_radius),
            ("wave.pulse_rate", self.pulse_rate),
            ("wave.pulse_amplitude", self.pulse_amplitude),
            ("wave.pulse_base", self.pulse_base),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(FieldError::invalid_config(name, format!("must be finite, got {}", value)));
            }
        }
        if self.min_radius < 0.0 {
            return Err(FieldError::invalid_config(
                "wave.min_radius",
                format!("must not be negative, got {}", self.min_radius),
            ));
        }
        Ok(())
    }
}

impl RotationConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.yaw_rate.is_finite() || !self.pitch_rate.is_finite() {
            return Err(FieldError::invalid_config(
                "rotation",
                format!("rates must be finite, got yaw={} pitch={}", self.yaw_rate, self.pitch_rate),
            ));
        }
        Ok(())
    }
}

fn unit_range(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}
