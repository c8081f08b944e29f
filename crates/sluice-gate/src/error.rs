//! Error types for gate operations

use std::io;

/// Errors that can occur while running admission checks
#[derive(thiserror::Error, Debug)]
pub enum GateError {
    /// I/O error from the slot storage
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// An exclusive lock on a bucket slot could not be taken
    #[error("Lock error: {0}")]
    Lock(String),
    /// Bucket state could not be written back or the slot task failed
    #[error("State error: {0}")]
    State(String),
}
