//! Composition error types

use thiserror::Error;

/// Errors raised while composing a deployment
///
/// Every variant is fatal at composition time: the orchestrator aborts on the
/// first error and no partial deployment is exposed to the caller. Cleanup of
/// anything the platform already created is the platform's removal-policy job.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Resource already exists: {0}")]
    DuplicateResource(String),

    #[error("Output already registered: {0}")]
    DuplicateOutput(String),

    #[error("Deployment artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("DNS zone not found: {0}")]
    ZoneNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
