#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
mod paths;
pub mod store;
pub mod telemetry;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    ActorId, Clock, CoreError, Entity, EntityId, EntityState, Timestamp, Transition, Version,
};
pub use crate::store::{EntityStats, EntityStore, StoreError};
