//! Layer 2: Lifecycle states and the transition table
//!
//! EntityState: draft, submitted, validated, rejected, archived.
//! The table is the single source of truth for which moves are legal;
//! callers never re-implement it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CoreError;

/// Lifecycle stage of an entity.
///
/// `Draft` is the sole initial state. `Archived` is terminal; `Rejected`
/// can only go back to `Draft` (resubmission).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    Draft,
    Submitted,
    Validated,
    Rejected,
    Archived,
}

impl EntityState {
    pub const ALL: [EntityState; 5] = [
        Self::Draft,
        Self::Submitted,
        Self::Validated,
        Self::Rejected,
        Self::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
        }
    }

    /// States reachable from this one.
    ///
    /// draft -> submitted; submitted -> validated | rejected;
    /// validated -> archived; rejected -> draft; archived -> nothing.
    pub fn allowed_targets(&self) -> &'static [EntityState] {
        match self {
            Self::Draft => &[Self::Submitted],
            Self::Submitted => &[Self::Validated, Self::Rejected],
            Self::Validated => &[Self::Archived],
            Self::Rejected => &[Self::Draft],
            Self::Archived => &[],
        }
    }

    /// Whether `target` is directly reachable from `self`.
    pub fn can_transition_to(&self, target: EntityState) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Validate a requested move, producing the typed refusal on violation.
    pub fn check_transition(&self, target: EntityState) -> Result<(), CoreError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// No outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "validated" => Ok(Self::Validated),
            "rejected" => Ok(Self::Rejected),
            "archived" => Ok(Self::Archived),
            _ => Err(CoreError::UnknownState { raw: s.to_string() }),
        }
    }
}
