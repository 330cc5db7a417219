use std::collections::BTreeMap;
use std::sync::Arc;

use ironclad_core::{EntityId, EntityLocator, GridOracle, OccupancyOracle, Position};

use super::{Actor, EntityGrid, Faction};
use crate::api::{Result, RuntimeError};

/// Owner of all actors, the terrain oracle, and the occupancy index.
///
/// Terrain and occupancy are held behind `Arc` so an AI evaluation can take
/// a cheap read-only view of them. Occupancy is copy-on-write: mutations go
/// through [`Arc::make_mut`], which only clones while a view is still alive.
#[derive(Clone)]
pub struct World {
    grid: Arc<dyn GridOracle>,
    actors: BTreeMap<EntityId, Actor>,
    occupancy: Arc<EntityGrid>,
    next_id: u32,
}

impl World {
    pub fn new(grid: impl GridOracle + 'static) -> Self {
        Self::from_shared(Arc::new(grid))
    }

    pub fn from_shared(grid: Arc<dyn GridOracle>) -> Self {
        Self {
            grid,
            actors: BTreeMap::new(),
            occupancy: Arc::new(EntityGrid::new()),
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    pub fn grid(&self) -> &dyn GridOracle {
        self.grid.as_ref()
    }

    pub fn shared_grid(&self) -> Arc<dyn GridOracle> {
        Arc::clone(&self.grid)
    }

    pub fn occupancy(&self) -> &EntityGrid {
        &self.occupancy
    }

    pub fn shared_occupancy(&self) -> Arc<EntityGrid> {
        Arc::clone(&self.occupancy)
    }

    /// Adds an actor under its own id. Hostiles created with
    /// [`World::next_enemy_id`] and the player (id 0) are the usual callers.
    pub fn spawn(&mut self, actor: Actor) -> Result<EntityId> {
        let id = actor.id;
        if self.actors.contains_key(&id) {
            return Err(RuntimeError::DuplicateActor(id));
        }
        if !self.grid.is_walkable(actor.position)
            || !Arc::make_mut(&mut self.occupancy).insert(id, actor.position)
        {
            return Err(RuntimeError::SpawnBlocked {
                position: actor.position,
            });
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Reserves a fresh hostile id.
    pub fn next_enemy_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn require(&self, id: EntityId) -> Result<&Actor> {
        self.actor(id).ok_or(RuntimeError::ActorNotFound(id))
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actors.get(&EntityId::PLAYER).filter(|a| a.is_alive())
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Living hostiles in id order.
    pub fn hostiles(&self) -> impl Iterator<Item = &Actor> {
        self.actors
            .values()
            .filter(|a| a.faction == Faction::Hostile && a.is_alive())
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.actor(id).is_some_and(Actor::is_alive)
    }

    /// Whether `id` could step onto `to`: walkable and not taken by anyone else.
    pub fn is_free_for(&self, id: EntityId, to: Position) -> bool {
        self.grid.is_walkable(to) && !self.occupancy.is_occupied_by_other(to, id)
    }

    /// Moves an actor, keeping the occupancy index in step. Returns false if
    /// the destination is not free.
    pub fn move_actor(&mut self, id: EntityId, to: Position) -> Result<bool> {
        let from = self.require(id)?.position;
        if from == to {
            return Ok(true);
        }
        if !self.is_free_for(id, to) {
            return Ok(false);
        }
        if !Arc::make_mut(&mut self.occupancy).relocate(id, from, to) {
            return Ok(false);
        }
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.position = to;
        }
        Ok(true)
    }

    /// Deactivates an actor and clears its tile. The actor record stays for
    /// debug output.
    pub fn remove_from_play(&mut self, id: EntityId) -> Result<()> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(RuntimeError::ActorNotFound(id))?;
        actor.active = false;
        let position = actor.position;
        let grid = Arc::make_mut(&mut self.occupancy);
        if grid.occupant(position) == Some(id) {
            grid.remove(position);
        }
        Ok(())
    }
}

impl OccupancyOracle for World {
    fn occupant(&self, position: Position) -> Option<EntityId> {
        self.occupancy.occupant(position)
    }
}

impl EntityLocator for World {
    fn enemy_at(&self, position: Position) -> Option<EntityId> {
        self.occupancy
            .occupant(position)
            .filter(|id| self.actor(*id).is_some_and(|a| a.faction == Faction::Hostile))
    }

    fn player_position(&self) -> Option<Position> {
        self.player().map(|p| p.position)
    }

    fn enemies(&self) -> Vec<(EntityId, Position)> {
        self.hostiles().map(|a| (a.id, a.position)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclad_core::TileGrid;

    fn arena() -> World {
        World::new(TileGrid::from_ascii(".....\n..#..\n....."))
    }

    #[test]
    fn spawn_rejects_walls_and_stacking() {
        let mut world = arena();
        world.spawn(Actor::player(Position::new(0, 0))).expect("open tile");
        let id = world.next_enemy_id();
        assert!(matches!(
            world.spawn(Actor::new(id, "a", Faction::Hostile, Position::new(2, 1))),
            Err(RuntimeError::SpawnBlocked { .. })
        ));
        assert!(matches!(
            world.spawn(Actor::new(id, "a", Faction::Hostile, Position::new(0, 0))),
            Err(RuntimeError::SpawnBlocked { .. })
        ));
    }

    #[test]
    fn move_keeps_index_in_step() {
        let mut world = arena();
        world.spawn(Actor::player(Position::new(0, 0))).expect("open tile");
        assert_eq!(world.move_actor(EntityId::PLAYER, Position::new(1, 1)).ok(), Some(true));
        assert_eq!(world.occupant(Position::new(1, 1)), Some(EntityId::PLAYER));
        assert_eq!(world.occupant(Position::new(0, 0)), None);
        assert_eq!(world.move_actor(EntityId::PLAYER, Position::new(2, 1)).ok(), Some(false));
    }

    #[test]
    fn locator_reports_only_living_hostiles() {
        let mut world = arena();
        world.spawn(Actor::player(Position::new(0, 0))).expect("open tile");
        let a = world.next_enemy_id();
        let b = world.next_enemy_id();
        world
            .spawn(Actor::new(a, "a", Faction::Hostile, Position::new(4, 0)))
            .expect("open tile");
        world
            .spawn(Actor::new(b, "b", Faction::Hostile, Position::new(4, 2)))
            .expect("open tile");
        world.remove_from_play(b).expect("exists");

        assert_eq!(world.enemies(), vec![(a, Position::new(4, 0))]);
        assert_eq!(world.enemy_at(Position::new(0, 0)), None);
        assert_eq!(world.enemy_at(Position::new(4, 0)), Some(a));
        assert_eq!(world.enemy_at(Position::new(4, 2)), None);
    }

    #[test]
    fn views_survive_mutation() {
        let mut world = arena();
        world.spawn(Actor::player(Position::new(0, 0))).expect("open tile");
        let view = world.shared_occupancy();
        world
            .move_actor(EntityId::PLAYER, Position::new(1, 0))
            .expect("exists");
        assert_eq!(view.occupant(Position::new(0, 0)), Some(EntityId::PLAYER));
        assert_eq!(world.occupant(Position::new(1, 0)), Some(EntityId::PLAYER));
    }
}
