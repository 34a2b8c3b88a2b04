pub mod backdrop;
pub mod config;
pub mod error;
pub mod field_data;
pub mod generation;
pub mod palette;
pub mod render;
pub mod update;

pub use backdrop::{FieldStats, ParticleBackdrop};
pub use config::{FieldConfig, PaletteConfig, RotationConfig, WaveConfig, DEFAULT_PARTICLE_COUNT};
pub use error::FieldError;
pub use field_data::{FieldMode, FieldRotation, ParticleField};
pub use generation::{create_field, generate_field};
pub use palette::{ColorSpace, HueBand};
pub use render::{prepare_render_data, BlendMode, ParticleGpuData, PointMaterial};
pub use update::advance_field;
