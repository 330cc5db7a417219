use std::collections::VecDeque;

use async_trait::async_trait;
use ironclad_core::EntityId;
use tokio::sync::Mutex;

use crate::api::{ActionProvider, PlayerAction, Result};
use crate::world::World;

/// Replays a fixed list of actions, then repeats a fallback forever.
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<PlayerAction>>,
    fallback: PlayerAction,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
            fallback: PlayerAction::Wait,
        }
    }

    pub fn with_fallback(mut self, fallback: PlayerAction) -> Self {
        self.fallback = fallback;
        self
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, _entity: EntityId, _world: &World) -> Result<PlayerAction> {
        let next = self.actions.lock().await.pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclad_core::{Direction, TileGrid};

    #[tokio::test]
    async fn replays_then_falls_back() {
        let provider = ScriptedProvider::new([PlayerAction::Move(Direction::East)])
            .with_fallback(PlayerAction::Move(Direction::West));
        let world = World::new(TileGrid::open(3, 3));

        let first = provider.provide_action(EntityId::PLAYER, &world).await.unwrap();
        assert_eq!(first, PlayerAction::Move(Direction::East));
        assert_eq!(provider.remaining().await, 0);
        let next = provider.provide_action(EntityId::PLAYER, &world).await.unwrap();
        assert_eq!(next, PlayerAction::Move(Direction::West));
    }
}
