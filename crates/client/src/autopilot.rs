//! Computer-controlled stand-in for a human player.
use async_trait::async_trait;
use ironclad_core::{Direction, EntityId, Position, chebyshev_distance, los, path};
use ironclad_runtime::{ActionProvider, Actor, PlayerAction, Result, World};

/// Drives the player mech: finish off the weakest hostile in reach, shoot
/// when there is a clear line, otherwise close the distance.
///
/// Ties on health go to the nearer hostile, then to the lower id, so runs
/// stay deterministic for a given seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Autopilot {
    /// Ignore hostiles further than this (None = unlimited).
    pub max_distance: Option<i32>,
}

impl Autopilot {
    fn select_target<'w>(&self, me: &Actor, world: &'w World) -> Option<&'w Actor> {
        world
            .hostiles()
            .filter(|h| {
                self.max_distance
                    .is_none_or(|max| chebyshev_distance(me.position, h.position) <= max)
            })
            .min_by_key(|h| {
                (
                    h.health_percent(),
                    chebyshev_distance(me.position, h.position),
                    h.id,
                )
            })
    }

    fn decide(&self, me: &Actor, world: &World) -> PlayerAction {
        let Some(target) = self.select_target(me, world) else {
            return PlayerAction::Wait;
        };
        let distance = chebyshev_distance(me.position, target.position);

        if distance <= me.loadout.melee.range {
            return PlayerAction::Attack(target.id);
        }
        let in_sights = me.loadout.ranged.is_some_and(|weapon| {
            los::check(world.grid(), me.position, target.position, weapon.range).can_fire()
        });
        if in_sights {
            return PlayerAction::Attack(target.id);
        }

        match next_step(me.id, me.position, target.position, world) {
            Some(direction) => PlayerAction::Move(direction),
            None => PlayerAction::Wait,
        }
    }
}

fn next_step(id: EntityId, from: Position, to: Position, world: &World) -> Option<Direction> {
    let route = path::find_path(from, to, |p| p == to || world.is_free_for(id, p), true)?;
    let step = *route.get(1)?;
    if step == to {
        return None;
    }
    Direction::from_offset(step - from)
}

#[async_trait]
impl ActionProvider for Autopilot {
    async fn provide_action(&self, entity: EntityId, world: &World) -> Result<PlayerAction> {
        let me = world.require(entity)?;
        let action = self.decide(me, world);
        tracing::trace!(?action, "autopilot");
        Ok(action)
    }
}
