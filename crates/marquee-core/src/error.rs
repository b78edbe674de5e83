use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Shared config unavailable ({path}): {reason}")]
    SharedConfig { path: String, reason: String },

    #[error("Power command failed: {0}")]
    Power(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Short error code used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            MarqueeError::Config(_) => "CONFIG_ERROR",
            MarqueeError::SharedConfig { .. } => "SHARED_CONFIG_UNAVAILABLE",
            MarqueeError::Power(_) => "POWER_ERROR",
            MarqueeError::Serialization(_) => "SERIALIZATION_ERROR",
            MarqueeError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
