use glam::Vec3;

use crate::particles::config::{RotationConfig, WaveConfig};
use crate::particles::error::FieldError;
use crate::particles::field_data::{FieldMode, FieldRotation, ParticleField};

/// Advance the field by one frame.
///
/// Rotation always advances. Positions and sizes are rewritten only while
/// `is_playing` is true; otherwise they are left untouched. A frame with a
/// non-finite time or a negative delta is rejected and changes nothing.
pub fn advance_field(
    field: &mut ParticleField,
    elapsed: f64,
    delta: f32,
    is_playing: bool,
) -> Result<FieldRotation, FieldError> {
    if let Err(e) = validate_frame(elapsed, delta) {
        log::warn!("Skipping particle field frame: {}", e);
        return Err(e);
    }

    field.enter_mode(FieldMode::from_playing(is_playing));

    let spin = field.spin;
    advance_rotation(&mut field.rotation, &spin, delta);

    if is_playing {
        let ParticleField {
            ids,
            positions,
            sizes,
            wave,
            ..
        } = &mut *field;
        apply_radial_wave(positions, sizes, ids, wave, elapsed);
    }

    Ok(field.rotation)
}

/// Reject frames that would poison the buffers with NaN
pub fn validate_frame(elapsed: f64, delta: f32) -> Result<(), FieldError> {
    if !elapsed.is_finite() || !delta.is_finite() {
        return Err(FieldError::NonFiniteTime { elapsed, delta });
    }
    if delta < 0.0 {
        return Err(FieldError::NegativeDelta { delta });
    }
    Ok(())
}

/// Spin the whole field
pub fn advance_rotation(rotation: &mut FieldRotation, spin: &RotationConfig, delta: f32) {
    rotation.yaw += delta * spin.yaw_rate;
    rotation.pitch += delta * spin.pitch_rate;
}

/// Radial wave kernel.
///
/// Size pulses with a phase keyed on the particle id; position is pushed
/// along its direction from the origin by a wave keyed on its radius.
/// Particles within `min_radius` of the origin keep their position.
/// Phases are evaluated in `f64`; only the resulting sines are narrowed.
pub fn apply_radial_wave(
    positions: &mut [[f32; 3]],
    sizes: &mut [f32],
    ids: &[u32],
    wave: &WaveConfig,
    elapsed: f64,
) {
    let wave_time = elapsed * wave.frequency as f64;
    let pulse_time = elapsed * wave.pulse_rate as f64;

    for ((position, size), &id) in positions.iter_mut().zip(sizes.iter_mut()).zip(ids) {
        let p = Vec3::from_array(*position);
        let radius = p.length();

        let offset =
            (wave_time + (radius * wave.phase_scale) as f64).sin() as f32 * wave.amplitude;
        let pulse = (pulse_time + id as f64).sin() as f32;

        *size = (pulse * wave.pulse_amplitude + wave.pulse_base) * (1.0 + offset);

        if radius > wave.min_radius {
            let direction = p / radius;
            *position = (p + direction * (offset * wave.displacement_scale)).to_array();
        }
    }
}
