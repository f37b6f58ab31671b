//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `GenerationGateway` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("generation backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("generation backend returned no artifacts")]
    NoArtifacts,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `GenerationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("no template is attached to the request")]
    NoTemplate,

    #[error("failed to serialize exam data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
