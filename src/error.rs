use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignspotterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scoring a single catalogue entry failed. The entry is logged and left out of the
    /// results, so this never reaches callers of the matcher.
    #[error("Comparison worker failed: {0}")]
    Worker(String),
}
