use thiserror::Error;

/// Core error type shared across Outmap crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage API call failed or the service could not be reached.
    #[error("storage api error: {0}")]
    StorageApi(String),
    /// User-supplied output configuration is invalid.
    #[error("invalid output configuration: {0}")]
    InvalidOutput(String),
}

/// Convenience alias for results returned by Outmap crates.
pub type Result<T> = std::result::Result<T, Error>;
