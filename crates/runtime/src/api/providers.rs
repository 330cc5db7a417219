//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or a test harness. Hostile
//! actors never go through a provider; their turns come from the behavior
//! selector.
use async_trait::async_trait;
use ironclad_core::{ActionCost, AreaPattern, Direction, EntityId, Position};
use serde::{Deserialize, Serialize};

use super::errors::Result;
use crate::world::World;

/// Everything the player can do with a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Move(Direction),
    /// Melee if adjacent, otherwise the ranged weapon.
    Attack(EntityId),
    /// Ranged weapon fired at an area with falloff.
    AreaAttack {
        target: Position,
        pattern: AreaPattern,
    },
    Wait,
    /// Ends the turn at an explicit cost without acting, e.g. after an
    /// inventory screen consumed the turn.
    Complete(ActionCost),
}

/// Trait for providing the player's action.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `entity`, given a read-only view of the world.
    async fn provide_action(&self, entity: EntityId, world: &World) -> Result<PlayerAction>;
}

/// A simple action provider that always returns Wait.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(&self, _entity: EntityId, _world: &World) -> Result<PlayerAction> {
        Ok(PlayerAction::Wait)
    }
}
