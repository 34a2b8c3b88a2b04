use serde::{Deserialize, Serialize};

use crate::particles::field_data::ParticleField;

/// Render data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleGpuData {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _padding: f32,
}

/// Interleave the field buffers into `gpu_buffer`, reusing its allocation
pub fn prepare_render_data(field: &ParticleField, gpu_buffer: &mut Vec<ParticleGpuData>) {
    gpu_buffer.clear();
    gpu_buffer.reserve(field.count());

    for ((position, color), size) in field
        .positions()
        .iter()
        .zip(field.colors())
        .zip(field.sizes())
    {
        gpu_buffer.push(ParticleGpuData {
            position: *position,
            size: *size,
            color: *color,
            _padding: 0.0,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Normal,
    Additive,
}

/// Point sprite material the field is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMaterial {
    /// Base point size, scaled by the per-particle size buffer
    pub base_size: f32,
    pub vertex_colors: bool,
    pub transparent: bool,
    pub blending: BlendMode,
    pub depth_write: bool,
    /// Shrink points with distance from the camera
    pub size_attenuation: bool,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            base_size: 0.1,
            vertex_colors: true,
            transparent: true,
            blending: BlendMode::Additive,
            depth_write: false,
            size_attenuation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;
    use crate::particles::config::{RotationConfig, WaveConfig};

    #[test]
    fn test_gpu_data_size_is_32_bytes() {
        assert_eq!(std::mem::size_of::<ParticleGpuData>(), 32);
    }

    #[test]
    fn test_prepare_render_data_interleaves() {
        let field = ParticleField::from_buffers(
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
            vec![0.07, 0.09],
            WaveConfig::default(),
            RotationConfig::default(),
        )
        .unwrap();

        let mut buffer = vec![ParticleGpuData::zeroed(); 10];
        prepare_render_data(&field, &mut buffer);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[1].position, [4.0, 5.0, 6.0]);
        assert_eq!(buffer[1].color, [0.4, 0.5, 0.6]);
        assert_eq!(buffer[0].size, 0.07);

        let bytes: &[u8] = bytemuck::cast_slice(&buffer);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_material_defaults() {
        let material = PointMaterial::default();
        assert_eq!(material.blending, BlendMode::Additive);
        assert!(!material.depth_write);
        assert!(material.size_attenuation);
    }
}
