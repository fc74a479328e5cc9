//! Rule failures shared by the workshop episodes.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Why an episode refused a request.
///
/// Basket and factory rules report through this type once they leave their
/// own crate; the dispatcher turns it into a rejection without touching the
/// journal. Storage and bus failures never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input that cannot be taken at all: an empty product name, a quantity
    /// that is not a positive finite number, an empty shipment.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A factory rule said no, for instance a full cargo bay or a daily
    /// quota already used.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A stream id that does not parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
