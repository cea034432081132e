//! Scriptable host for driving the claim service in tests.

use std::collections::HashSet;

use claim_protect::prelude::*;

/// In-memory host recording everything the claim service emits.
#[derive(Default)]
pub struct FakeHost {
    pub players: Vec<PlayerSnapshot>,
    /// Columns whose terrain probe fails.
    pub unloaded: HashSet<(i32, i32)>,
    /// Columns where spawning a particle fails.
    pub broken: HashSet<(i32, i32)>,
    pub particles: Vec<(String, Position)>,
    pub messages: Vec<(PlayerId, String)>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, id: &str, x: f64, y: f64, z: f64) -> Self {
        self.players
            .push(PlayerSnapshot::new(id.into(), Position::new(x, y, z)));
        self
    }

    pub fn unload(&mut self, bounds: Bounds) {
        for x in bounds.min_x..=bounds.max_x {
            for z in bounds.min_z..=bounds.max_z {
                self.unloaded.insert((x, z));
            }
        }
    }

    pub fn messages_to(&self, player: &str) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| to.as_str() == player)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn marker_columns(&self) -> HashSet<(i32, i32)> {
        self.particles
            .iter()
            .map(|(_, at)| (at.x as i32, at.z as i32))
            .collect()
    }
}

impl WorldView for FakeHost {
    fn players(&self) -> Vec<PlayerSnapshot> {
        self.players.clone()
    }

    fn probe_block(&self, pos: BlockPos) -> HostResult<()> {
        if self.unloaded.contains(&(pos.x, pos.z)) {
            Err(HostError::Unloaded { x: pos.x, z: pos.z })
        } else {
            Ok(())
        }
    }
}

impl ParticleSink for FakeHost {
    fn spawn_particle(&mut self, particle: &str, at: Position) -> HostResult<()> {
        let column = (at.x as i32, at.z as i32);
        if self.broken.contains(&column) {
            return Err(HostError::Other(format!("particle limit reached at {column:?}")));
        }
        self.particles.push((particle.to_string(), at));
        Ok(())
    }
}

impl Messenger for FakeHost {
    fn send_message(&mut self, player: &PlayerId, text: &str) -> HostResult<()> {
        self.messages.push((player.clone(), text.to_string()));
        Ok(())
    }
}

pub fn stick_click(player: &str, x: i32, z: i32) -> WorldEvent {
    WorldEvent::ItemActivation(ItemActivation {
        player: player.into(),
        item: "minecraft:stick".to_string(),
        target: Some(BlockPos::new(x, 64, z)),
    })
}

pub fn bounds(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Bounds {
    Bounds {
        min_x,
        max_x,
        min_z,
        max_z,
    }
}
