//! Cancellation decisions for world mutations.

use claim_core::{Claim, is_inside_any_claim, is_owned_elsewhere};

use crate::event::{ActorAction, Decision, WorldEvent};

/// Decide whether `event` may proceed given the current claims.
///
/// - Single-player actions are cancelled inside claims the player does not own.
/// - Explosions are cancelled as a whole if any impacted block lies in any
///   claim, whoever caused them.
/// - Item activations and leaves never touch blocks and are always allowed.
#[must_use]
pub fn decide(claims: &[Claim], event: &WorldEvent) -> Decision {
    match event {
        WorldEvent::BlockInteraction(action)
        | WorldEvent::BlockBreak(action)
        | WorldEvent::EntityInteraction(action)
        | WorldEvent::ItemUseOn(action) => decide_action(claims, action),
        WorldEvent::Explosion(explosion) => Decision::cancel_if(
            explosion
                .impacted
                .iter()
                .any(|block| is_inside_any_claim(claims, block.column())),
        ),
        WorldEvent::ItemActivation(_) | WorldEvent::PlayerLeave(_) => Decision::Allow,
    }
}

fn decide_action(claims: &[Claim], action: &ActorAction) -> Decision {
    Decision::cancel_if(is_owned_elsewhere(
        claims,
        action.block.column(),
        &action.player,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Explosion, ItemActivation};
    use claim_core::{BlockPos, Bounds};

    fn claims() -> Vec<Claim> {
        vec![Claim::new(
            "p1".into(),
            Bounds {
                min_x: 0,
                max_x: 10,
                min_z: 0,
                max_z: 10,
            },
        )]
    }

    fn actions(player: &str, block: BlockPos) -> [WorldEvent; 4] {
        let action = ActorAction::new(player.into(), block);
        [
            WorldEvent::BlockInteraction(action.clone()),
            WorldEvent::BlockBreak(action.clone()),
            WorldEvent::EntityInteraction(action.clone()),
            WorldEvent::ItemUseOn(action),
        ]
    }

    #[test]
    fn test_stranger_is_cancelled_owner_is_not() {
        let claims = claims();
        for event in actions("p2", BlockPos::new(5, 0, 5)) {
            assert_eq!(decide(&claims, &event), Decision::Cancel, "{event:?}");
        }
        for event in actions("p1", BlockPos::new(5, 0, 5)) {
            assert_eq!(decide(&claims, &event), Decision::Allow, "{event:?}");
        }
    }

    #[test]
    fn test_height_is_ignored() {
        let claims = claims();
        for y in [-64, 0, 319] {
            let event =
                WorldEvent::BlockBreak(ActorAction::new("p2".into(), BlockPos::new(10, y, 0)));
            assert!(decide(&claims, &event).is_cancelled());
        }
    }

    #[test]
    fn test_outside_claim_is_allowed() {
        let claims = claims();
        for event in actions("p2", BlockPos::new(11, 64, 5)) {
            assert_eq!(decide(&claims, &event), Decision::Allow);
        }
    }

    #[test]
    fn test_explosion_touching_claim_is_cancelled() {
        let claims = claims();
        let explosion = Explosion {
            source: None,
            impacted: vec![
                BlockPos::new(-3, 60, 5),
                BlockPos::new(-1, 60, 5),
                BlockPos::new(0, 60, 5),
            ],
        };
        assert!(decide(&claims, &WorldEvent::Explosion(explosion)).is_cancelled());
    }

    #[test]
    fn test_owner_explosion_is_still_cancelled() {
        let claims = claims();
        let explosion = Explosion {
            source: Some("p1".into()),
            impacted: vec![BlockPos::new(5, 60, 5)],
        };
        assert!(decide(&claims, &WorldEvent::Explosion(explosion)).is_cancelled());
    }

    #[test]
    fn test_explosion_outside_claims_is_allowed() {
        let claims = claims();
        let explosion = Explosion {
            source: None,
            impacted: vec![BlockPos::new(-1, 60, -1), BlockPos::new(11, 60, 11)],
        };
        assert_eq!(
            decide(&claims, &WorldEvent::Explosion(explosion)),
            Decision::Allow
        );
    }

    #[test]
    fn test_item_activation_is_never_cancelled() {
        let claims = claims();
        let event = WorldEvent::ItemActivation(ItemActivation {
            player: "p2".into(),
            item: "minecraft:stick".to_string(),
            target: Some(BlockPos::new(5, 0, 5)),
        });
        assert_eq!(decide(&claims, &event), Decision::Allow);
    }
}
