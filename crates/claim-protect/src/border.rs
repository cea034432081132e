//! Claim border rendering.
//!
//! Each pass walks every claim, finds the players close enough to see it and
//! outlines the claim's perimeter with particles at each player's eye level.
//! Marker density drops with distance:
//!
//! ```text
//!   observer ──dist──► corner      spacing
//!   ─────────────────────────────  ───────
//!   dist < 32                      2
//!   32 <= dist < 48                4
//!   48 <= dist                     6
//! ```
//!
//! Rendering is best-effort. Unloaded terrain is skipped quietly and a
//! failure while drawing for one observer is logged without affecting other
//! observers or claims.

use claim_core::{Bounds, Claim, Position};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{trace, warn};

use crate::config::BorderConfig;
use crate::host::{HostError, ParticleSink, PlayerSnapshot, WorldView, is_column_loaded};

/// Failure while drawing one observer's view of a border.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to spawn marker at ({x}, {z}): {source}")]
    Spawn {
        x: i32,
        z: i32,
        #[source]
        source: HostError,
    },
}

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Claims with at least one observer in range.
    pub claims_rendered: usize,
    /// Claims nobody was close enough to see.
    pub claims_skipped: usize,
    /// Observers standing in unloaded terrain.
    pub observers_unloaded: usize,
    /// Observers whose markers failed to spawn.
    pub observers_failed: usize,
    /// Markers spawned.
    pub markers: usize,
}

/// Draws claim borders for nearby players.
#[derive(Debug, Clone)]
pub struct BorderRenderer {
    config: BorderConfig,
}

impl BorderRenderer {
    #[must_use]
    pub const fn new(config: BorderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &BorderConfig {
        &self.config
    }

    /// Render every claim once.
    pub fn render_pass<H>(&self, claims: &[Claim], host: &mut H) -> RenderStats
    where
        H: WorldView + ParticleSink + ?Sized,
    {
        let players = host.players();
        let mut stats = RenderStats::default();

        for claim in claims {
            self.render_claim(claim, &players, host, &mut stats);
        }

        trace!("Border pass: {stats:?}");
        stats
    }

    fn render_claim<H>(
        &self,
        claim: &Claim,
        players: &[PlayerSnapshot],
        host: &mut H,
        stats: &mut RenderStats,
    ) where
        H: WorldView + ParticleSink + ?Sized,
    {
        let observers: SmallVec<[&PlayerSnapshot; 8]> = players
            .iter()
            .filter(|player| {
                claim
                    .bounds
                    .contains_within(&player.position, self.config.render_distance)
            })
            .collect();

        if observers.is_empty() {
            stats.claims_skipped += 1;
            return;
        }
        stats.claims_rendered += 1;

        for observer in observers {
            match self.render_for_observer(&claim.bounds, &observer.position, host) {
                Ok(Some(markers)) => stats.markers += markers,
                Ok(None) => stats.observers_unloaded += 1,
                Err(e) => {
                    stats.observers_failed += 1;
                    warn!(
                        "Error spawning border particles for claim of {} (observer {}): {e}",
                        claim.owner, observer.id
                    );
                }
            }
        }
    }

    /// Outline `bounds` as seen from `observer`.
    ///
    /// Returns `Ok(None)` if the observer's own column is not loaded,
    /// otherwise the number of markers spawned.
    fn render_for_observer<H>(
        &self,
        bounds: &Bounds,
        observer: &Position,
        host: &mut H,
    ) -> Result<Option<usize>, RenderError>
    where
        H: WorldView + ParticleSink + ?Sized,
    {
        let feet = observer.block();
        if !is_column_loaded(&*host, feet.x, feet.z) {
            return Ok(None);
        }

        let y = marker_height(observer.y);
        let spacing = self.config.lod.spacing(lod_distance(observer, bounds));
        let step = usize::try_from(spacing).unwrap_or(1).max(1);

        let mut markers = 0;
        for x in (bounds.min_x..=bounds.max_x).step_by(step) {
            markers += self.spawn_marker(host, x, y, bounds.min_z)?;
            markers += self.spawn_marker(host, x, y, bounds.max_z)?;
        }
        for z in (bounds.min_z..=bounds.max_z).step_by(step) {
            markers += self.spawn_marker(host, bounds.min_x, y, z)?;
            markers += self.spawn_marker(host, bounds.max_x, y, z)?;
        }

        Ok(Some(markers))
    }

    fn spawn_marker<H>(&self, host: &mut H, x: i32, y: f64, z: i32) -> Result<usize, RenderError>
    where
        H: WorldView + ParticleSink + ?Sized,
    {
        if !is_column_loaded(&*host, x, z) {
            return Ok(0);
        }

        let at = Position::new(f64::from(x), y, f64::from(z));
        host.spawn_particle(&self.config.particle, at)
            .map_err(|source| RenderError::Spawn { x, z, source })?;
        Ok(1)
    }
}

/// Marker height for an observer standing at `observer_y`.
///
/// `max(floor(y), y + 1)`: at or above both feet and eye level.
#[must_use]
pub fn marker_height(observer_y: f64) -> f64 {
    observer_y.floor().max(observer_y + 1.0)
}

/// Distance used to pick marker spacing.
///
/// The smaller of the Manhattan distances to the `(minX, minZ)` and
/// `(maxX, maxZ)` corners. The other two corners are not considered.
#[must_use]
pub fn lod_distance(observer: &Position, bounds: &Bounds) -> f64 {
    let to_min = (observer.x - f64::from(bounds.min_x)).abs()
        + (observer.z - f64::from(bounds.min_z)).abs();
    let to_max = (observer.x - f64::from(bounds.max_x)).abs()
        + (observer.z - f64::from(bounds.max_z)).abs();
    to_min.min(to_max)
}
