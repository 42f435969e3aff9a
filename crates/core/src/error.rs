/// Result alias that carries the custom [`AuraError`] type.
pub type Result<T> = std::result::Result<T, AuraError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum AuraError {
    /// Structural misconfiguration: malformed transition table, missing
    /// color entry or a non-positive geometry parameter. Aborts the run
    /// rather than rendering a misleading aura.
    #[error("configuration error: {0}")]
    Config(String),
    /// A mood was requested that the tables do not know about.
    #[error("unknown mood `{0}`")]
    InvalidLabel(String),
    /// The drawing surface rejected a write. Fatal for the whole render.
    #[error("surface error: {0}")]
    Surface(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON configuration parse errors.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl AuraError {
    /// Creates a configuration error from the provided message.
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a surface error from the provided message.
    pub fn surface<T: Into<String>>(msg: T) -> Self {
        Self::Surface(msg.into())
    }
}
