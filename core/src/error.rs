use thiserror::Error;

/// Failures surfaced by the containers and the analyzers built on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// `get`/`remove` on a key that is not stored.
    #[error("no such key")]
    KeyNotFound,
    /// `peek_min`/`remove_min` on an empty heap.
    #[error("container is empty")]
    EmptyContainer,
    /// Argument rejected before any state was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, ContainerError>;
