use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("Schema not initialized")]
    NotInitialized,

    /// No root operation type contributed a single field. The schema is
    /// empty or malformed and the build is rejected.
    #[error("Schema indexing produced empty index - no fields found")]
    EmptyIndex,

    #[error("Type {0} not found")]
    TypeNotFound(String),
}
