//! Error types shared by the engine, progression and stores
//!
//! Nothing here is fatal: callers either ignore the error (transitions),
//! surface it to the player (funds) or fall back to in-memory state (storage).

use thiserror::Error;

use crate::sim::SimPhase;

/// Errors produced by the core
#[derive(Debug, Error)]
pub enum Error {
    /// A spend request exceeded the currency balance
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    /// An operation was requested in a phase that does not allow it
    #[error("cannot {operation} while {phase:?}")]
    InvalidTransition {
        operation: &'static str,
        phase: SimPhase,
    },

    /// The profile store could not be read or written
    #[error("profile store unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Cosmetic id is not in the catalog
    #[error("unknown cosmetic: {0}")]
    UnknownCosmetic(String),

    /// Cosmetic exists but has not been unlocked
    #[error("cosmetic not unlocked: {0}")]
    CosmeticLocked(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::PersistenceUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::PersistenceUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
