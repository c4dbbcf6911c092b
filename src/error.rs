use thiserror::Error;

/// Top-level error type for the fairway layout kernel.
#[derive(Debug, Error)]
pub enum FairwayError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors raised while building or solving a segment chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A segment references a spec id the registry does not know.
    #[error("unknown segment spec: {0}")]
    UnknownSegment(String),

    #[error("segment instance not found in chain")]
    InstanceNotFound,
}

/// Errors related to procedural mesh generation.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Convenience type alias for results using [`FairwayError`].
pub type Result<T> = std::result::Result<T, FairwayError>;
