//! Host engine primitives consumed by the claim system.
//!
//! The host owns players, terrain, particles and chat. These traits are the
//! only way the claim system reaches any of them.

use claim_core::{BlockPos, PlayerId, Position};
use thiserror::Error;

/// Errors reported by host primitives.
#[derive(Debug, Error)]
pub enum HostError {
    /// The chunk containing the column is not loaded.
    #[error("chunk containing ({x}, {z}) is not loaded")]
    Unloaded { x: i32, z: i32 },

    /// The position is outside the buildable height range.
    #[error("position {0:?} is outside the world")]
    OutOfWorld(BlockPos),

    /// The player is no longer connected.
    #[error("player {0} is not connected")]
    UnknownPlayer(PlayerId),

    /// Any other host-side failure.
    #[error("{0}")]
    Other(String),
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// A connected player and where they stand.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub position: Position,
}

impl PlayerSnapshot {
    #[must_use]
    pub const fn new(id: PlayerId, position: Position) -> Self {
        Self { id, position }
    }
}

/// Read access to the world.
pub trait WorldView {
    /// All currently connected players.
    fn players(&self) -> Vec<PlayerSnapshot>;

    /// Resolve the block at `pos`. Only success or failure matters to callers:
    /// an error means the terrain there is not available.
    fn probe_block(&self, pos: BlockPos) -> HostResult<()>;
}

/// Visual marker output.
pub trait ParticleSink {
    /// Spawn the named particle at `at`.
    fn spawn_particle(&mut self, particle: &str, at: Position) -> HostResult<()>;
}

/// Player chat output.
pub trait Messenger {
    /// Send one line of text to `player`.
    fn send_message(&mut self, player: &PlayerId, text: &str) -> HostResult<()>;
}

/// Whether the terrain column at `(x, z)` is loaded.
///
/// Probe failures of any kind count as "not loaded".
pub fn is_column_loaded<W: WorldView + ?Sized>(world: &W, x: i32, z: i32) -> bool {
    world.probe_block(BlockPos::new(x, 0, z)).is_ok()
}
