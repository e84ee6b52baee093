//! Domain model for the lifecycle tracker, built in layers:
//!
//! - Layer 0: time primitives (Timestamp, Clock)
//! - Layer 1: identity atoms (EntityId, ActorId)
//! - Layer 2: domain enum + transition table (EntityState)
//! - Layer 3: immutable history records (Version, Transition)
//! - Layer 4: the aggregate root (Entity)
//!
//! Lower layers never import higher ones.

mod domain;
mod entity;
mod error;
mod history;
mod identity;
mod time;

pub use domain::EntityState;
pub use entity::Entity;
pub use error::{CoreError, InvalidId};
pub use history::{Transition, Version};
pub use identity::{ActorId, EntityId};
pub use time::{Clock, Timestamp};
