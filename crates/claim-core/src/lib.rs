//! Claim geometry and containment checks.
//!
//! A claim is an axis-aligned rectangle on the ground plane (X/Z) owned by
//! exactly one player. Heights are ignored: a claim protects the whole column.
//!
//! ```text
//!        minX            maxX
//!   minZ  ┌───────────────┐
//!         │               │   edges are inclusive on all four sides
//!         │     claim     │
//!         │               │
//!   maxZ  └───────────────┘
//! ```
//!
//! The oracle functions in [`oracle`] are pure and scan every claim, which is
//! fine because there is at most one claim per player.

pub mod bounds;
pub mod claim;
pub mod oracle;
pub mod pos;

pub use bounds::{Bounds, MAX_CLAIM_AREA};
pub use claim::{Claim, PlayerId};
pub use oracle::{claim_at, is_inside_any_claim, is_owned_elsewhere};
pub use pos::{BlockPos, ColumnPos, Position};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BlockPos, Bounds, Claim, ColumnPos, MAX_CLAIM_AREA, PlayerId, Position, claim_at,
        is_inside_any_claim, is_owned_elsewhere,
    };
}
