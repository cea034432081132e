//! Ground claim protection.
//!
//! Wires the claim registry to the host engine:
//!
//! - [`selection`] turns four stick clicks into a claim
//! - [`gate`] decides whether a world mutation must be cancelled
//! - [`border`] draws claim outlines for nearby players
//! - [`ClaimService`] owns the registry and pending selections and is the
//!   single entry point the host calls into
//!
//! # Execution Model
//!
//! ```text
//! Host event dispatch (synchronous):
//!   WorldEvent ──► ClaimService::handle_event ──► Decision (Allow | Cancel)
//!                     │
//!                     └─ item activation ──► PointCollector ──► ClaimRegistry::replace
//!
//! Host tick:
//!   ClaimService::tick ──► every N ticks ──► BorderRenderer::render_pass
//! ```
//!
//! Everything runs on the host's tick thread; nothing here blocks apart from
//! the single store write when a claim is committed.

pub mod border;
pub mod config;
pub mod event;
pub mod gate;
pub mod host;
pub mod schedule;
pub mod selection;
mod service;

pub use border::{BorderRenderer, RenderError, RenderStats};
pub use config::{BorderConfig, ClaimConfig, ConfigError, LodConfig};
pub use event::{ActorAction, Decision, EventKind, Explosion, ItemActivation, WorldEvent};
pub use host::{HostError, HostResult, Messenger, ParticleSink, PlayerSnapshot, WorldView};
pub use schedule::RecurringTask;
pub use selection::{POINTS_PER_CLAIM, PointCollector, SelectionOutcome};
pub use service::ClaimService;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ActorAction, ClaimConfig, ClaimService, Decision, Explosion, HostError, HostResult,
        ItemActivation, Messenger, ParticleSink, PlayerSnapshot, WorldEvent, WorldView,
    };
    pub use claim_core::prelude::*;
}
