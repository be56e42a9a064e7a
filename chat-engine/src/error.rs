//! Engine error types
//!
//! Every failure a `handle` call can hit funnels into [`EngineError`].
//! The dispatcher is the single catch point: it logs the error and
//! answers with a generic apology, leaving the session untouched.

use crate::payment::PaymentError;
use crate::repository::RepoError;
use thiserror::Error;

/// Errors surfaced by the session engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// A repository collaborator failed or rejected the call
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// The payment gateway failed or rejected the call
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A programming invariant was violated; fatal for this message only
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
