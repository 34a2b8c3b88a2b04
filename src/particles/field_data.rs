use glam::{EulerRot, Mat4};
use serde::{Deserialize, Serialize};

use crate::particles::config::{RotationConfig, WaveConfig};
use crate::particles::error::FieldError;

/// Whole-field orientation, radians. Accumulates without wraparound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRotation {
    /// Rotation about Y
    pub yaw: f32,
    /// Rotation about X
    pub pitch: f32,
}

impl FieldRotation {
    /// Model matrix for Euler order XYZ (pitch, then yaw)
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Logical animation state, driven only by the playback flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMode {
    /// Buffers frozen, rotation still advances
    #[default]
    Idle,
    /// Full per-particle update every frame
    Animating,
}

impl FieldMode {
    pub fn from_playing(is_playing: bool) -> Self {
        if is_playing {
            FieldMode::Animating
        } else {
            FieldMode::Idle
        }
    }
}

/// Particle field stored as parallel fixed-length arrays.
///
/// All per-particle buffers have exactly `count` entries for the lifetime
/// of the field. Colors and ids are written once at construction; positions
/// and sizes are rewritten in place by the frame updater.
#[derive(Debug, Clone)]
pub struct ParticleField {
    /// Stable particle identity, assigned at creation
    pub(crate) ids: Vec<u32>,

    /// Position buffer (xyz)
    pub(crate) positions: Vec<[f32; 3]>,

    /// Color buffer (rgb, [0, 1])
    colors: Vec<[f32; 3]>,

    /// Size buffer
    pub(crate) sizes: Vec<f32>,

    /// Particles per palette band, empty when built from raw buffers
    band_histogram: Vec<usize>,

    pub(crate) wave: WaveConfig,
    pub(crate) spin: RotationConfig,
    pub(crate) rotation: FieldRotation,
    mode: FieldMode,
}

impl ParticleField {
    pub(crate) fn from_generated(
        positions: Vec<[f32; 3]>,
        colors: Vec<[f32; 3]>,
        sizes: Vec<f32>,
        band_histogram: Vec<usize>,
        wave: WaveConfig,
        spin: RotationConfig,
    ) -> Self {
        debug_assert_eq!(positions.len(), colors.len());
        debug_assert_eq!(positions.len(), sizes.len());

        Self {
            ids: (0..positions.len() as u32).collect(),
            positions,
            colors,
            sizes,
            band_histogram,
            wave,
            spin,
            rotation: FieldRotation::default(),
            mode: FieldMode::Idle,
        }
    }

    /// Build a field from explicit buffers.
    ///
    /// Ids follow buffer order. Fails if the buffers are empty or their
    /// lengths differ.
    pub fn from_buffers(
        positions: Vec<[f32; 3]>,
        colors: Vec<[f32; 3]>,
        sizes: Vec<f32>,
        wave: WaveConfig,
        spin: RotationConfig,
    ) -> Result<Self, FieldError> {
        if positions.len() != colors.len() || positions.len() != sizes.len() {
            return Err(FieldError::BufferMismatch {
                positions: positions.len(),
                colors: colors.len(),
                sizes: sizes.len(),
            });
        }
        if positions.is_empty() {
            return Err(FieldError::EmptyField);
        }
        if positions.len() > u32::MAX as usize {
            return Err(FieldError::invalid_config("count", "exceeds u32 id space"));
        }

        Ok(Self::from_generated(positions, colors, sizes, Vec::new(), wave, spin))
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Positions as a flat xyz buffer for upload
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat rgb buffer for upload
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn band_histogram(&self) -> &[usize] {
        &self.band_histogram
    }

    pub fn wave(&self) -> &WaveConfig {
        &self.wave
    }

    pub fn spin(&self) -> &RotationConfig {
        &self.spin
    }

    pub fn rotation(&self) -> FieldRotation {
        self.rotation
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub(crate) fn enter_mode(&mut self, mode: FieldMode) {
        if self.mode != mode {
            log::debug!(
                "Particle field {:?} -> {:?} ({} particles)",
                self.mode,
                mode,
                self.count()
            );
            self.mode = mode;
        }
    }

    /// Mean distance from the origin
    pub fn mean_radius(&self) -> f32 {
        let total: f32 = self
            .positions
            .iter()
            .map(|p| glam::Vec3::from_array(*p).length())
            .sum();
        total / self.count() as f32
    }

    pub fn mean_size(&self) -> f32 {
        self.sizes.iter().sum::<f32>() / self.count() as f32
    }
}
