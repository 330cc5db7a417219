use async_trait::async_trait;
use ironclad_core::{ActionCost, EntityId};
use tokio::sync::{Mutex, mpsc};

use crate::api::{ActionProvider, PlayerAction, Result, RuntimeError};
use crate::world::World;

/// Cloneable sender side of the player's input channel.
#[derive(Clone, Debug)]
pub struct PlayerHandle {
    tx: mpsc::Sender<PlayerAction>,
}

impl PlayerHandle {
    pub async fn submit(&self, action: PlayerAction) -> Result<()> {
        self.tx
            .send(action)
            .await
            .map_err(|_| RuntimeError::PlayerInputClosed)
    }

    /// Ends the pending player turn at `cost` without acting. Used by
    /// screens (inventory, targeting) that consume the turn themselves.
    pub async fn complete_with_cost(&self, cost: ActionCost) -> Result<()> {
        self.submit(PlayerAction::Complete(cost)).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Waits on an `mpsc` channel for the player's next action.
pub struct ChannelPlayerProvider {
    rx: Mutex<mpsc::Receiver<PlayerAction>>,
}

impl ChannelPlayerProvider {
    /// Creates the provider and the handle that feeds it.
    pub fn channel(buffer: usize) -> (Self, PlayerHandle) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { rx: Mutex::new(rx) }, PlayerHandle { tx })
    }
}

#[async_trait]
impl ActionProvider for ChannelPlayerProvider {
    async fn provide_action(&self, _entity: EntityId, _world: &World) -> Result<PlayerAction> {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .ok_or(RuntimeError::PlayerInputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclad_core::TileGrid;

    #[tokio::test]
    async fn delivers_actions_in_order_then_reports_closure() {
        let (provider, handle) = ChannelPlayerProvider::channel(4);
        let world = World::new(TileGrid::open(3, 3));

        handle.submit(PlayerAction::Wait).await.unwrap();
        handle.complete_with_cost(ActionCost::Custom(50)).await.unwrap();
        drop(handle);

        let first = provider.provide_action(EntityId::PLAYER, &world).await.unwrap();
        let second = provider.provide_action(EntityId::PLAYER, &world).await.unwrap();
        assert_eq!(first, PlayerAction::Wait);
        assert_eq!(second, PlayerAction::Complete(ActionCost::Custom(50)));
        assert!(matches!(
            provider.provide_action(EntityId::PLAYER, &world).await,
            Err(RuntimeError::PlayerInputClosed)
        ));
    }
}
