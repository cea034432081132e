//! World events the claim system listens to.
//!
//! The host translates its own event types into [`WorldEvent`] and applies
//! the returned [`Decision`] before letting the mutation through.

use claim_core::{BlockPos, PlayerId};

/// A player acting on a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorAction {
    pub player: PlayerId,
    pub block: BlockPos,
}

impl ActorAction {
    #[must_use]
    pub const fn new(player: PlayerId, block: BlockPos) -> Self {
        Self { player, block }
    }
}

/// A player activating the item in their hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActivation {
    pub player: PlayerId,
    /// Item type id, e.g. `minecraft:stick`.
    pub item: String,
    /// Block hit by the player's view ray, if any.
    pub target: Option<BlockPos>,
}

/// An area effect touching many blocks at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Explosion {
    /// Player that caused it, if known. Never used to exempt blocks.
    pub source: Option<PlayerId>,
    pub impacted: Vec<BlockPos>,
}

/// Events that can change the world or drive claim selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    ItemActivation(ItemActivation),
    BlockInteraction(ActorAction),
    BlockBreak(ActorAction),
    EntityInteraction(ActorAction),
    ItemUseOn(ActorAction),
    Explosion(Explosion),
    PlayerLeave(PlayerId),
}

/// Event category, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ItemActivation,
    BlockInteraction,
    BlockBreak,
    EntityInteraction,
    ItemUseOn,
    Explosion,
    PlayerLeave,
}

impl EventKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ItemActivation => "item_activation",
            Self::BlockInteraction => "block_interaction",
            Self::BlockBreak => "block_break",
            Self::EntityInteraction => "entity_interaction",
            Self::ItemUseOn => "item_use_on",
            Self::Explosion => "explosion",
            Self::PlayerLeave => "player_leave",
        }
    }
}

impl WorldEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ItemActivation(_) => EventKind::ItemActivation,
            Self::BlockInteraction(_) => EventKind::BlockInteraction,
            Self::BlockBreak(_) => EventKind::BlockBreak,
            Self::EntityInteraction(_) => EventKind::EntityInteraction,
            Self::ItemUseOn(_) => EventKind::ItemUseOn,
            Self::Explosion(_) => EventKind::Explosion,
            Self::PlayerLeave(_) => EventKind::PlayerLeave,
        }
    }

    /// Player responsible for the event, if there is one.
    #[must_use]
    pub const fn actor(&self) -> Option<&PlayerId> {
        match self {
            Self::ItemActivation(ItemActivation { player, .. })
            | Self::BlockInteraction(ActorAction { player, .. })
            | Self::BlockBreak(ActorAction { player, .. })
            | Self::EntityInteraction(ActorAction { player, .. })
            | Self::ItemUseOn(ActorAction { player, .. })
            | Self::PlayerLeave(player) => Some(player),
            Self::Explosion(explosion) => explosion.source.as_ref(),
        }
    }

    /// Blocks the event would change. Empty for events that change none.
    #[must_use]
    pub fn blocks(&self) -> &[BlockPos] {
        match self {
            Self::BlockInteraction(action)
            | Self::BlockBreak(action)
            | Self::EntityInteraction(action)
            | Self::ItemUseOn(action) => core::slice::from_ref(&action.block),
            Self::Explosion(explosion) => &explosion.impacted,
            Self::ItemActivation(_) | Self::PlayerLeave(_) => &[],
        }
    }
}

/// What the host must do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    #[default]
    Allow,
    Cancel,
}

impl Decision {
    #[must_use]
    pub const fn cancel_if(cancel: bool) -> Self {
        if cancel { Self::Cancel } else { Self::Allow }
    }

    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancel)
    }
}
