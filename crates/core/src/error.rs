use thiserror::Error;

/// Errors raised by slotwire configuration and host bookkeeping.
///
/// Malformed content never produces one of these: records that cannot be
/// rendered are suppressed instead.
#[derive(Debug, Error)]
pub enum SlotwireError {
    /// Configuration JSON failed to deserialize.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// An archetype name was not found in the registry.
    #[error("Unknown archetype: {name}")]
    UnknownArchetype {
        /// Requested archetype name
        name: String,
    },
    /// A render was requested for an instance that is not mounted.
    #[error("Unknown instance handle: {handle}")]
    UnknownInstance {
        /// Raw handle value
        handle: u32,
    },
    /// Configuration deserialized but holds an unusable value.
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig {
        /// Offending field
        field: String,
        /// Error message
        message: String,
    },
}

impl SlotwireError {
    /// Create an unknown archetype error
    pub fn unknown_archetype(name: impl Into<String>) -> Self {
        Self::UnknownArchetype { name: name.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
