use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Report not found: {0}")]
    NotFound(String),

    /// Store unreachable or the query failed
    #[error("{0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
