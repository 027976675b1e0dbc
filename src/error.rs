use thiserror::Error;

/// Failures at the persistence boundary. Callers fall back to defaults.
#[derive(Debug, Error)]
pub(crate) enum PlantError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed plant record: {0}")]
    Malformed(#[from] serde_json::Error),
}
