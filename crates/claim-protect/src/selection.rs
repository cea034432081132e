//! Four-point claim selection.
//!
//! Each player collects corner points one click at a time. The fourth point
//! closes the selection: the bounding box of all four becomes the player's
//! claim if it is small enough.
//!
//! ```text
//!   0 ──click──► 1 ──click──► 2 ──click──► 3 ──click──► finalize
//!                                                          │
//!                                      area > max ─────────┼──► rejected, selection cleared
//!                                      otherwise ──────────┴──► claim replaced, selection cleared
//! ```

use claim_core::{Bounds, Claim, ColumnPos, PlayerId, is_owned_elsewhere};
use claim_store::{ClaimRegistry, StoreResult};
use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::host::Messenger;

/// Points needed to finish a selection.
pub const POINTS_PER_CLAIM: usize = 4;

type PendingPoints = SmallVec<[ColumnPos; POINTS_PER_CLAIM]>;

/// Result of submitting one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The point lies in someone else's claim and was not recorded.
    Refused,
    /// The point was recorded; `count` points are now pending.
    Pending { count: usize },
    /// The selection covered too much ground and was discarded.
    TooLarge { bounds: Bounds, area: i64 },
    /// The selection became the player's claim.
    Committed(Claim),
}

/// Per-player pending selections.
///
/// Selections live only in memory. A selection is dropped when it is
/// finalized either way, or when [`forget`](Self::forget) is called for a
/// player who left.
#[derive(Debug)]
pub struct PointCollector {
    pending: HashMap<PlayerId, PendingPoints>,
    max_area: i64,
}

impl PointCollector {
    #[must_use]
    pub fn new(max_area: i64) -> Self {
        Self {
            pending: HashMap::new(),
            max_area,
        }
    }

    /// Record `point` for `player`, finalizing the selection on the fourth point.
    ///
    /// # Errors
    /// Returns an error if committing the claim to the registry fails. The
    /// selection is cleared regardless.
    pub fn submit<M: Messenger + ?Sized>(
        &mut self,
        registry: &mut ClaimRegistry,
        player: &PlayerId,
        point: ColumnPos,
        messenger: &mut M,
    ) -> StoreResult<SelectionOutcome> {
        if is_owned_elsewhere(registry.snapshot(), point, player) {
            debug!("Refused point {point} for {player}: inside another claim");
            return Ok(SelectionOutcome::Refused);
        }

        let points = self.pending.entry(player.clone()).or_default();
        points.push(point);
        let count = points.len();

        notify(
            messenger,
            player,
            &format!("Point {count} set at ({}, {})", point.x, point.z),
        );

        if count < POINTS_PER_CLAIM {
            return Ok(SelectionOutcome::Pending { count });
        }

        let points = self.pending.remove(player).unwrap_or_default();
        let Some(bounds) = Bounds::enclosing(&points) else {
            return Ok(SelectionOutcome::Pending { count: 0 });
        };

        let area = bounds.area();
        if area > self.max_area {
            info!("Rejected claim for {player}: area {area} exceeds {}", self.max_area);
            notify(
                messenger,
                player,
                &format!(
                    "Area too large! Max area size is {} blocks.",
                    self.max_area
                ),
            );
            return Ok(SelectionOutcome::TooLarge { bounds, area });
        }

        let claim = Claim::new(player.clone(), bounds);
        registry.replace(claim.clone())?;

        info!("Protected {bounds} for {player}");
        notify(messenger, player, "Area protected!");
        Ok(SelectionOutcome::Committed(claim))
    }

    /// Drop any pending selection for `player`. Returns whether one existed.
    pub fn forget(&mut self, player: &PlayerId) -> bool {
        self.pending.remove(player).is_some()
    }

    /// Points collected so far for `player`.
    #[must_use]
    pub fn pending(&self, player: &PlayerId) -> &[ColumnPos] {
        self.pending
            .get(player)
            .map(|points| points.as_slice())
            .unwrap_or_default()
    }

    /// Number of players with an unfinished selection.
    #[must_use]
    pub fn pending_players(&self) -> usize {
        self.pending.len()
    }
}

fn notify<M: Messenger + ?Sized>(messenger: &mut M, player: &PlayerId, text: &str) {
    if let Err(e) = messenger.send_message(player, text) {
        warn!("Failed to message {player}: {e}");
    }
}
