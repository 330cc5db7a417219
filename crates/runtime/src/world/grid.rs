use std::collections::HashMap;

use ironclad_core::{EntityId, OccupancyOracle, Position};

/// O(1) position index over active actors.
///
/// At most one actor stands on a tile. The index is kept in step with
/// [`World`](super::World) mutations; nothing else writes to it.
#[derive(Clone, Debug, Default)]
pub struct EntityGrid {
    by_position: HashMap<Position, EntityId>,
}

impl EntityGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `id` on `position`. Returns false (and changes nothing) if the
    /// tile already holds someone else.
    pub fn insert(&mut self, id: EntityId, position: Position) -> bool {
        match self.by_position.get(&position) {
            Some(&other) if other != id => false,
            _ => {
                self.by_position.insert(position, id);
                true
            }
        }
    }

    pub fn remove(&mut self, position: Position) -> Option<EntityId> {
        self.by_position.remove(&position)
    }

    /// Moves `id` from `from` to `to`. Fails if `id` is not at `from` or `to`
    /// is taken.
    pub fn relocate(&mut self, id: EntityId, from: Position, to: Position) -> bool {
        if self.by_position.get(&from) != Some(&id) || self.is_occupied_by_other(to, id) {
            return false;
        }
        self.by_position.remove(&from);
        self.by_position.insert(to, id);
        true
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

impl OccupancyOracle for EntityGrid {
    fn occupant(&self, position: Position) -> Option<EntityId> {
        self.by_position.get(&position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_actor_per_tile() {
        let mut grid = EntityGrid::new();
        let p = Position::new(2, 2);
        assert!(grid.insert(EntityId(1), p));
        assert!(!grid.insert(EntityId(2), p));
        assert!(grid.is_occupied_by_other(p, EntityId(2)));
        assert!(!grid.is_occupied_by_other(p, EntityId(1)));
    }

    #[test]
    fn relocate_checks_source_and_destination() {
        let mut grid = EntityGrid::new();
        grid.insert(EntityId(1), Position::new(0, 0));
        grid.insert(EntityId(2), Position::new(1, 0));
        assert!(!grid.relocate(EntityId(1), Position::new(0, 0), Position::new(1, 0)));
        assert!(!grid.relocate(EntityId(1), Position::new(5, 5), Position::new(0, 1)));
        assert!(grid.relocate(EntityId(1), Position::new(0, 0), Position::new(0, 1)));
        assert_eq!(grid.occupant(Position::new(0, 1)), Some(EntityId(1)));
        assert_eq!(grid.occupant(Position::new(0, 0)), None);
    }
}
