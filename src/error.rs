use burn::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Input batch is empty")]
    EmptyBatch,

    #[error("Channel mismatch: expected {expected} input channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("Spatial size {height}x{width} is not a non-zero multiple of {divisor}")]
    SpatialSize {
        height: usize,
        width: usize,
        divisor: usize,
    },

    #[error("Configuration error: `{0}`")]
    Config(#[from] ConfigError),

    #[error("I/O error: `{0}`")]
    Io(#[from] std::io::Error),
}
