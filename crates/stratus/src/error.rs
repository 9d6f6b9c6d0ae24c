//! Error types for Stratus operations.

use std::io;

use thiserror::Error;

/// The main error type for Stratus operations.
///
/// Construction-time problems surface as `InvalidReference`; everything that
/// can go wrong while producing the output artifact surfaces as `Render` or
/// `Io`.
#[derive(Debug, Error)]
pub enum StratusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The rendering engine could not be invoked, or the output path cannot
    /// be written. Fatal for the diagram; there is no retry.
    #[error("Render error: {0}")]
    Render(String),

    /// An edge referenced a node handle that this diagram did not create.
    /// Rejected when the edge is recorded, never deferred to render time.
    #[error("Invalid node reference: {0}")]
    InvalidReference(String),
}

impl From<crate::export::Error> for StratusError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Render(reason) => Self::Render(reason),
            crate::export::Error::Io(err) => Self::Io(err),
        }
    }
}
