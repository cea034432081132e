//! The claim service: one owner for the registry and pending selections.

use claim_core::{ColumnPos, PlayerId, claim_at};
use claim_store::{ClaimRegistry, KvStore, StoreResult};
use tracing::{debug, error, info};

use crate::border::{BorderRenderer, RenderStats};
use crate::config::ClaimConfig;
use crate::event::{Decision, ItemActivation, WorldEvent};
use crate::gate;
use crate::host::{Messenger, ParticleSink, WorldView};
use crate::schedule::RecurringTask;
use crate::selection::{PointCollector, SelectionOutcome};

/// Claim state plus the handlers the host calls into.
///
/// The registry is loaded once at construction and written on every commit.
/// Pending selections start empty and are never persisted.
#[derive(Debug)]
pub struct ClaimService {
    config: ClaimConfig,
    registry: ClaimRegistry,
    collector: PointCollector,
    renderer: BorderRenderer,
    border_task: RecurringTask,
}

impl ClaimService {
    /// Load claims from `store` and set up the service.
    ///
    /// # Errors
    /// Returns an error if the stored claim document cannot be read or parsed,
    /// or holds a claim larger than the configured maximum area.
    pub fn open(config: ClaimConfig, store: Box<dyn KvStore>) -> StoreResult<Self> {
        let registry =
            ClaimRegistry::load_with_limit(store, config.storage_key.clone(), config.max_area)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Build the service around an already loaded registry.
    #[must_use]
    pub fn with_registry(config: ClaimConfig, registry: ClaimRegistry) -> Self {
        info!(
            "Claim service ready: {} claim(s), max area {}, borders every {} ticks",
            registry.len(),
            config.max_area,
            config.border.interval_ticks
        );

        Self {
            collector: PointCollector::new(config.max_area),
            renderer: BorderRenderer::new(config.border.clone()),
            border_task: RecurringTask::every(config.border.interval_ticks),
            registry,
            config,
        }
    }

    /// Handle one event from the host and decide whether it may proceed.
    pub fn handle_event<M: Messenger + ?Sized>(
        &mut self,
        event: &WorldEvent,
        messenger: &mut M,
    ) -> Decision {
        match event {
            WorldEvent::ItemActivation(activation) => {
                self.handle_activation(activation, messenger);
                Decision::Allow
            }
            WorldEvent::PlayerLeave(player) => {
                if self.collector.forget(player) {
                    debug!("Dropped pending selection of {player}");
                }
                Decision::Allow
            }
            _ => {
                let claims = self.registry.snapshot();
                let decision = gate::decide(claims, event);
                if decision.is_cancelled() {
                    let owner = event
                        .blocks()
                        .iter()
                        .find_map(|block| claim_at(claims, block.column()))
                        .map_or("<unknown>", |claim| claim.owner.as_str());
                    debug!(
                        "Cancelled {} by {} in claim of {owner}",
                        event.kind().name(),
                        event.actor().map_or("<none>", PlayerId::as_str)
                    );
                }
                decision
            }
        }
    }

    fn handle_activation<M: Messenger + ?Sized>(
        &mut self,
        activation: &ItemActivation,
        messenger: &mut M,
    ) {
        if activation.item != self.config.tool_item {
            return;
        }
        let Some(target) = activation.target else {
            return;
        };

        if let Err(e) = self.submit_point(&activation.player, target.column(), messenger) {
            error!("Failed to save claim for {}: {e}", activation.player);
        }
    }

    /// Add a selection point for `player`.
    ///
    /// # Errors
    /// Returns an error if a completed claim could not be persisted.
    pub fn submit_point<M: Messenger + ?Sized>(
        &mut self,
        player: &PlayerId,
        point: ColumnPos,
        messenger: &mut M,
    ) -> StoreResult<SelectionOutcome> {
        self.collector
            .submit(&mut self.registry, player, point, messenger)
    }

    /// Advance one engine tick, rendering borders when the interval is due.
    pub fn tick<H>(&mut self, host: &mut H) -> Option<RenderStats>
    where
        H: WorldView + ParticleSink + ?Sized,
    {
        self.border_task
            .tick()
            .then(|| self.render_borders(host))
    }

    /// Render every claim border once, regardless of the interval.
    pub fn render_borders<H>(&self, host: &mut H) -> RenderStats
    where
        H: WorldView + ParticleSink + ?Sized,
    {
        self.renderer.render_pass(self.registry.snapshot(), host)
    }

    #[must_use]
    pub const fn registry(&self) -> &ClaimRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn selections(&self) -> &PointCollector {
        &self.collector
    }

    #[must_use]
    pub const fn config(&self) -> &ClaimConfig {
        &self.config
    }
}
