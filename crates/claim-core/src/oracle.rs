//! Containment and ownership checks over a set of claims.
//!
//! Every world mutation passes through one of these before the host applies it.

use crate::claim::{Claim, PlayerId};
use crate::pos::ColumnPos;

/// First claim whose bounds contain `column`.
#[must_use]
pub fn claim_at(claims: &[Claim], column: ColumnPos) -> Option<&Claim> {
    claims.iter().find(|claim| claim.bounds.contains(column))
}

/// Whether `column` lies in a claim that `actor` does not own.
///
/// Used for mutations with a responsible player.
#[must_use]
pub fn is_owned_elsewhere(claims: &[Claim], column: ColumnPos, actor: &PlayerId) -> bool {
    claims
        .iter()
        .any(|claim| claim.bounds.contains(column) && !claim.is_owned_by(actor))
}

/// Whether `column` lies in any claim at all.
///
/// Used for effects without a responsible player, such as explosions.
#[must_use]
pub fn is_inside_any_claim(claims: &[Claim], column: ColumnPos) -> bool {
    claims.iter().any(|claim| claim.bounds.contains(column))
}
