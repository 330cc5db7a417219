use crate::state::{EntityId, Position};

/// Spatial index over active actors.
///
/// Implementations are expected to answer in O(1); the AI asks this for
/// every candidate step it considers.
pub trait OccupancyOracle {
    fn occupant(&self, position: Position) -> Option<EntityId>;

    fn is_occupied_by_other(&self, position: Position, exclude: EntityId) -> bool {
        self.occupant(position).is_some_and(|id| id != exclude)
    }
}

/// Entity enumeration used by area-of-effect bookkeeping and chain targeting.
pub trait EntityLocator {
    /// The hostile (non-player) actor standing on `position`, if any.
    fn enemy_at(&self, position: Position) -> Option<EntityId>;

    fn player_position(&self) -> Option<Position>;

    /// Every hostile actor with its position, in a stable order.
    fn enemies(&self) -> Vec<(EntityId, Position)>;
}

/// An occupancy oracle with nobody on the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unoccupied;

impl OccupancyOracle for Unoccupied {
    fn occupant(&self, _position: Position) -> Option<EntityId> {
        None
    }
}
