pub mod particles;
pub mod time;

pub use particles::{
    advance_field, create_field, generate_field, FieldConfig, FieldError, FieldMode,
    FieldRotation, FieldStats, ParticleBackdrop, ParticleField,
};
pub use time::{FrameClock, FrameTime};
