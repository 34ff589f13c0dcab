use thiserror::Error;

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Errors raised while building or configuring a replay producer.
///
/// Everything here is fatal and surfaced before playback begins; the timed
/// loop itself never fails.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Model descriptor could not be read or is malformed
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Recording file missing, unreadable or malformed
    #[error("Recording parse error: {0}")]
    RecordingParse(String),

    /// Looping playback requested over a recording with no frames
    #[error("Cannot loop over an empty frame buffer")]
    EmptyBufferLoop,

    /// Playback parameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
