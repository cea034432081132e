//! Claims and their owners.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;

/// Stable, opaque player identifier as handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A protected region owned by one player.
///
/// Claims are never edited in place; a new claim replaces the owner's old one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub owner: PlayerId,
    pub bounds: Bounds,
}

impl Claim {
    #[must_use]
    pub const fn new(owner: PlayerId, bounds: Bounds) -> Self {
        Self { owner, bounds }
    }

    #[must_use]
    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        &self.owner == player
    }
}
