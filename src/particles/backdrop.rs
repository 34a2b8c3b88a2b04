use rand::Rng;
use serde::Serialize;
use std::time::Duration;

use crate::particles::config::FieldConfig;
use crate::particles::error::FieldError;
use crate::particles::field_data::{FieldMode, FieldRotation, ParticleField};
use crate::particles::generation::generate_field;
use crate::particles::render::{prepare_render_data, ParticleGpuData, PointMaterial};
use crate::particles::update::advance_field;
use crate::time::FrameClock;

/// Audio-reactive particle backdrop owned by a rendering surface.
///
/// Created once per mount and dropped as a unit on unmount.
pub struct ParticleBackdrop {
    /// Simulation state
    field: ParticleField,

    /// Draw settings for the surface
    material: PointMaterial,

    /// Elapsed time since mount
    clock: FrameClock,

    /// Playback flag supplied by the player
    playing: bool,

    /// GPU render buffer
    gpu_buffer: Vec<ParticleGpuData>,
}

/// Backdrop statistics
#[derive(Debug, Clone, Serialize)]
pub struct FieldStats {
    pub count: usize,
    pub mode: FieldMode,
    pub elapsed_seconds: f32,
    pub frames: u64,
    pub rotation: FieldRotation,
    pub mean_radius: f32,
    pub mean_size: f32,
    pub band_histogram: Vec<usize>,
}

impl ParticleBackdrop {
    /// Generate a new backdrop
    pub fn new<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Result<Self, FieldError> {
        let field = generate_field(config, rng)?;

        Ok(Self {
            gpu_buffer: Vec::with_capacity(field.count()),
            field,
            material: config.material,
            clock: FrameClock::new(),
            playing: false,
        })
    }

    /// Takes effect on the next frame
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance one render tick
    pub fn frame(&mut self, dt: Duration) -> Result<FieldRotation, FieldError> {
        let time = self.clock.tick(dt);
        advance_field(&mut self.field, time.elapsed, time.delta, self.playing)
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Interleaved vertex data for the current frame
    pub fn render_data(&mut self) -> &[ParticleGpuData] {
        prepare_render_data(&self.field, &mut self.gpu_buffer);
        &self.gpu_buffer
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            count: self.field.count(),
            mode: self.field.mode(),
            elapsed_seconds: self.clock.elapsed().as_secs_f32(),
            frames: self.clock.frame_count(),
            rotation: self.field.rotation(),
            mean_radius: self.field.mean_radius(),
            mean_size: self.field.mean_size(),
            band_histogram: self.field.band_histogram().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn backdrop(count: usize) -> ParticleBackdrop {
        let mut rng = StdRng::seed_from_u64(42);
        ParticleBackdrop::new(&FieldConfig::with_count(count), &mut rng).unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let mut backdrop = backdrop(64);
        let sizes = backdrop.field().sizes().to_vec();

        backdrop.frame(Duration::from_millis(16)).unwrap();

        assert!(!backdrop.is_playing());
        assert_eq!(backdrop.field().mode(), FieldMode::Idle);
        assert_eq!(backdrop.field().sizes(), &sizes[..]);
        assert!(backdrop.field().rotation().yaw > 0.0);
    }

    #[test]
    fn test_playing_mutates() {
        let mut backdrop = backdrop(64);
        let positions = backdrop.field().positions().to_vec();

        backdrop.set_playing(true);
        backdrop.frame(Duration::from_millis(16)).unwrap();

        assert_eq!(backdrop.field().mode(), FieldMode::Animating);
        assert_ne!(backdrop.field().positions(), &positions[..]);
    }

    #[test]
    fn test_stats_and_render_data() {
        let mut backdrop = backdrop(100);
        for _ in 0..10 {
            backdrop.frame(Duration::from_millis(16)).unwrap();
        }

        let stats = backdrop.stats();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.frames, 10);
        assert_eq!(stats.band_histogram.iter().sum::<usize>(), 100);
        assert!((stats.elapsed_seconds - 0.16).abs() < 1e-5);

        assert_eq!(backdrop.render_data().len(), 100);
    }
}
