use thiserror::Error;

/// Top-level error type for skinmatch.
#[derive(Debug, Error)]
pub enum SkinmatchError {
    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by the vertex-group store of a [`crate::mesh::SkinnedMesh`].
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("vertex group already exists: {0}")]
    DuplicateName(String),

    #[error("vertex group not found: {0}")]
    NotFound(String),

    #[error("vertex index {vertex} is out of range for a mesh with {count} vertices")]
    VertexOutOfRange { vertex: usize, count: usize },
}

/// Errors related to matching and reordering operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`SkinmatchError`].
pub type Result<T> = std::result::Result<T, SkinmatchError>;
