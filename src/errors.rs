use crate::map::CellKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WayfinderError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // World-related errors
    #[error("Invalid terrain dimensions {width}x{height}: both must be greater than 0")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Cell ({x}, {y}) is {kind} and cannot hold the agent")]
    InvalidPlacement { x: u32, y: u32, kind: CellKind },

    #[error("Invalid terrain data: {reason}")]
    InvalidTerrainData { reason: String },
}

/// Result type alias for all operations
pub type WayfinderResult<T> = Result<T, WayfinderError>;
