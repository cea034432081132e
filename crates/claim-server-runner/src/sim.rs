//! A minimal simulated world acting as the claim system's host.
//!
//! Players are just ids with positions. Chunks count as loaded while a player
//! is within the view distance, which gives the border renderer real
//! load/unload behavior to react to.

use claim_core::{BlockPos, PlayerId, Position};
use claim_protect::{HostError, HostResult, Messenger, ParticleSink, PlayerSnapshot, WorldView};
use hashbrown::HashMap;
use tracing::{info, trace};

/// Lowest buildable block height.
pub const MIN_Y: i32 = -64;
/// One above the highest buildable block height.
pub const MAX_Y: i32 = 320;

#[derive(Debug, Clone)]
struct SimPlayer {
    id: PlayerId,
    position: Position,
}

/// Simulated world state.
#[derive(Debug)]
pub struct SimWorld {
    /// Players keyed by display name.
    players: HashMap<String, SimPlayer>,
    /// View distance in chunks.
    view_distance: i32,
    particles: u64,
}

impl SimWorld {
    pub fn new(view_distance: i32) -> Self {
        Self {
            players: HashMap::new(),
            view_distance,
            particles: 0,
        }
    }

    /// Connect a player, or move them if already connected.
    pub fn join(&mut self, name: &str, position: Position) -> PlayerId {
        if let Some(player) = self.players.get_mut(name) {
            player.position = position;
            return player.id.clone();
        }

        let id = PlayerId::new(uuid::Uuid::new_v4().to_string());
        self.players.insert(
            name.to_string(),
            SimPlayer {
                id: id.clone(),
                position,
            },
        );
        id
    }

    pub fn leave(&mut self, name: &str) -> Option<PlayerId> {
        self.players.remove(name).map(|player| player.id)
    }

    pub fn move_player(&mut self, name: &str, position: Position) -> bool {
        self.players
            .get_mut(name)
            .map(|player| player.position = position)
            .is_some()
    }

    pub fn id_of(&self, name: &str) -> Option<&PlayerId> {
        self.players.get(name).map(|player| &player.id)
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.players.get(name).map(|player| player.position)
    }

    pub fn name_of(&self, id: &PlayerId) -> Option<&str> {
        self.players
            .iter()
            .find(|(_, player)| &player.id == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Total particles spawned so far.
    pub const fn particles(&self) -> u64 {
        self.particles
    }

    fn is_chunk_loaded(&self, chunk: (i32, i32)) -> bool {
        self.players.values().any(|player| {
            chebyshev_distance(player.position.chunk_coords(), chunk) <= self.view_distance
        })
    }
}

impl WorldView for SimWorld {
    fn players(&self) -> Vec<PlayerSnapshot> {
        self.players
            .values()
            .map(|player| PlayerSnapshot::new(player.id.clone(), player.position))
            .collect()
    }

    fn probe_block(&self, pos: BlockPos) -> HostResult<()> {
        if !(MIN_Y..MAX_Y).contains(&pos.y) {
            return Err(HostError::OutOfWorld(pos));
        }
        if !self.is_chunk_loaded(pos.column().chunk_coords()) {
            return Err(HostError::Unloaded { x: pos.x, z: pos.z });
        }
        Ok(())
    }
}

impl ParticleSink for SimWorld {
    fn spawn_particle(&mut self, particle: &str, at: Position) -> HostResult<()> {
        self.particles += 1;
        trace!("{particle} at ({}, {:.2}, {})", at.x, at.y, at.z);
        Ok(())
    }
}

impl Messenger for SimWorld {
    fn send_message(&mut self, player: &PlayerId, text: &str) -> HostResult<()> {
        let name = self
            .name_of(player)
            .ok_or_else(|| HostError::UnknownPlayer(player.clone()))?;
        info!("[to {name}] {text}");
        Ok(())
    }
}

/// Blocks inside a sphere of `radius` around `center`.
pub fn explosion_blocks(center: BlockPos, radius: i32) -> Vec<BlockPos> {
    let radius = radius.max(0);
    let r2 = radius * radius;
    let mut blocks = Vec::new();

    for dx in -radius..=radius {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                if dx * dx + dy * dy + dz * dz <= r2 {
                    blocks.push(BlockPos::new(center.x + dx, center.y + dy, center.z + dz));
                }
            }
        }
    }
    blocks
}

/// Compute Chebyshev distance between two chunk positions.
pub fn chebyshev_distance(a: (i32, i32), b: (i32, i32)) -> i32 {
    let dx = (a.0 - b.0).abs();
    let dz = (a.1 - b.1).abs();
    dx.max(dz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_load_around_players() {
        let mut world = SimWorld::new(2);
        assert!(world.probe_block(BlockPos::new(0, 64, 0)).is_err());

        world.join("alice", Position::new(8.0, 64.0, 8.0));
        assert!(world.probe_block(BlockPos::new(0, 0, 0)).is_ok());
        assert!(world.probe_block(BlockPos::new(47, 0, -32)).is_ok());
        assert!(world.probe_block(BlockPos::new(48, 0, 0)).is_err());

        world.move_player("alice", Position::new(100.0, 64.0, 0.0));
        assert!(world.probe_block(BlockPos::new(0, 0, 0)).is_err());
    }

    #[test]
    fn test_probe_outside_height_range() {
        let mut world = SimWorld::new(4);
        world.join("alice", Position::new(0.0, 64.0, 0.0));
        assert!(matches!(
            world.probe_block(BlockPos::new(0, MAX_Y, 0)),
            Err(HostError::OutOfWorld(_))
        ));
        assert!(world.probe_block(BlockPos::new(0, MIN_Y, 0)).is_ok());
    }

    #[test]
    fn test_rejoin_keeps_id() {
        let mut world = SimWorld::new(4);
        let first = world.join("alice", Position::new(0.0, 64.0, 0.0));
        let second = world.join("alice", Position::new(5.0, 64.0, 0.0));
        assert_eq!(first, second);
        assert_eq!(world.player_count(), 1);
        assert_eq!(world.name_of(&first), Some("alice"));

        assert_eq!(world.leave("alice"), Some(first.clone()));
        assert!(world.send_message(&first, "hello").is_err());
    }

    #[test]
    fn test_explosion_sphere() {
        let blocks = explosion_blocks(BlockPos::new(0, 64, 0), 1);
        assert_eq!(blocks.len(), 7);
        assert!(blocks.contains(&BlockPos::new(0, 65, 0)));
        assert!(!blocks.contains(&BlockPos::new(1, 65, 0)));
        assert_eq!(explosion_blocks(BlockPos::new(3, 3, 3), 0), vec![BlockPos::new(3, 3, 3)]);
    }

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance((0, 0), (0, 0)), 0);
        assert_eq!(chebyshev_distance((0, 0), (1, 1)), 1);
        assert_eq!(chebyshev_distance((0, 0), (2, 1)), 2);
        assert_eq!(chebyshev_distance((-1, -1), (1, 1)), 2);
    }
}
