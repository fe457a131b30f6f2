//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ScoutError`]
//! via `#[from]` (or an explicit `From` impl for boxed adapter errors).

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// An input violated a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A remote collaborator (events API, auth backend) failed.
    #[error("upstream error")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Page numbers start at 1.
    #[error("page number must be at least 1")]
    InvalidPageNumber,

    /// An event id was empty.
    #[error("event id must not be empty")]
    EmptyEventId,

    /// An event title was empty.
    #[error("event title must not be empty")]
    EmptyTitle,
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Event"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
