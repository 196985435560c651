//! Crate error type.

use std::io;
use thiserror::Error;

/// Errors that can surface during an enumeration run.
///
/// The search itself has no recoverable errors by design; what can fail is
/// the emission path and parameter validation at startup. Internal invariant
/// violations (an empty chromosome where none is expected, an identity
/// missing from the segment universe) are bugs and abort with a diagnostic.
#[derive(Error, Debug)]
pub enum ScarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ScarError>;
