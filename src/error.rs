//! Error types for tuning files and catalog lookups.

/// Error type for the simulation core.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning file could not be parsed
    #[error("Tuning parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Tuning could not be serialized
    #[error("Tuning serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// A catalog key that names no entry (enemy, weapon, boss, ...)
    #[error("Unknown {table} key: {key:?}")]
    UnknownKey { table: &'static str, key: String },

    /// A level key that is not of the form "stage-level"
    #[error("Malformed level key: {0:?}")]
    LevelKey(String),
}

/// Result type for simulation-core operations
pub type Result<T> = std::result::Result<T, GameError>;
