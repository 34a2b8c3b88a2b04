/// Particle field errors
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Particle field must contain at least one particle")]
    EmptyField,

    #[error("Frame time is not finite: elapsed={elapsed}, delta={delta}")]
    NonFiniteTime { elapsed: f64, delta: f32 },

    #[error("Frame delta must not be negative: {delta}")]
    NegativeDelta { delta: f32 },

    #[error("Invalid field config: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Buffer lengths differ: positions={positions}, colors={colors}, sizes={sizes}")]
    BufferMismatch {
        positions: usize,
        colors: usize,
        sizes: usize,
    },

    #[error("Failed to read field config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse field config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl FieldError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
