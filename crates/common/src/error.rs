//! Error types shared across MotionGrid crates.

/// Top-level error type for MotionGrid operations.
#[derive(Debug, thiserror::Error)]
pub enum MotionGridError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid grid size {cells}: a grid needs at least one cell per side")]
    InvalidGridSize { cells: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MotionGridError.
pub type MotionGridResult<T> = Result<T, MotionGridError>;

impl MotionGridError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
