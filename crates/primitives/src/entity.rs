//! Entity type definitions.

use std::collections::HashSet;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tradable entity.
///
/// Identifiers are stable within one pipeline invocation; the universe may
/// change between invocations, so they must not be assumed stable across days.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Human-readable label for an entity, typically a ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An entity-subset mask.
///
/// Factors carrying a mask are only evaluated for member entities; the
/// pipeline writes the missing-value marker for everyone else. Membership is
/// by ID rather than by position because the universe (and therefore column
/// order) can change every day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMask(HashSet<EntityId>);

impl EntityMask {
    /// Create an empty mask (matches no entity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the given entity is a member.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains(&id)
    }

    /// Returns the number of member entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the mask has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EntityId> for EntityMask {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
