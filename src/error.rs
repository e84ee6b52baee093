use thiserror::Error;

use crate::core::CoreError;
use crate::store::StoreError;

/// Crate-level convenience error.
///
/// A thin wrapper over the canonical capability errors; not a god error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(CoreError::NotFound { .. }) => 2,
            Error::Core(_) => 3,
            Error::Store(_) => 4,
            Error::Config(_) => 5,
        }
    }
}
