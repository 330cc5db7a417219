use bitflags::bitflags;

use crate::env::{EntityLocator, GridOracle};
use crate::los::has_clear_path_with;
use crate::state::{EntityId, Position};

use super::shape::AoeShape;

bitflags! {
    /// Per-tile markers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const CENTER = 1 << 0;
        /// Solid, or cut off from the centre by solid terrain.
        const BLOCKED = 1 << 1;
        const ENEMY = 1 << 2;
        const PLAYER = 1 << 3;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoeTile {
    pub position: Position,
    pub distance: i32,
    pub multiplier: f32,
    pub flags: TileFlags,
    pub occupant: Option<EntityId>,
}

impl AoeTile {
    pub fn new(position: Position, distance: i32, multiplier: f32) -> Self {
        Self {
            position,
            distance,
            multiplier,
            flags: TileFlags::empty(),
            occupant: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.flags.contains(TileFlags::BLOCKED)
    }
}

/// Tiles affected by one targeting action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoeResult {
    pub shape: AoeShape,
    pub center: Position,
    pub origin: Position,
    pub radius: i32,
    pub tiles: Vec<AoeTile>,
}

impl AoeResult {
    pub fn new(shape: AoeShape, center: Position, origin: Position, radius: i32) -> Self {
        Self {
            shape,
            center,
            origin,
            radius,
            tiles: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, tile: AoeTile) {
        self.tiles.push(tile);
    }

    pub fn contains(&self, position: Position) -> bool {
        self.tile_at(position).is_some()
    }

    pub fn tile_at(&self, position: Position) -> Option<&AoeTile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().map(|t| t.position)
    }

    pub fn unblocked_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles
            .iter()
            .filter(|t| !t.is_blocked())
            .map(|t| t.position)
    }

    pub fn enemy_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.flags.contains(TileFlags::ENEMY) && !t.is_blocked())
            .count()
    }

    pub fn hits_player(&self) -> bool {
        self.tiles
            .iter()
            .any(|t| t.flags.contains(TileFlags::PLAYER) && !t.is_blocked())
    }

    /// Actors standing on unblocked tiles, with the multiplier they receive.
    pub fn affected(&self) -> impl Iterator<Item = (EntityId, f32)> + '_ {
        self.tiles
            .iter()
            .filter(|t| !t.is_blocked())
            .filter_map(|t| t.occupant.map(|id| (id, t.multiplier)))
    }

    /// Marks tiles holding enemies or the player. Clears stale markers first.
    pub fn update_entity_info(&mut self, locator: &(impl EntityLocator + ?Sized)) {
        let player = locator.player_position();
        for tile in &mut self.tiles {
            tile.flags.remove(TileFlags::ENEMY | TileFlags::PLAYER);
            tile.occupant = None;
            if let Some(id) = locator.enemy_at(tile.position) {
                tile.flags.insert(TileFlags::ENEMY);
                tile.occupant = Some(id);
            }
            if player == Some(tile.position) {
                tile.flags.insert(TileFlags::PLAYER);
                tile.occupant = Some(EntityId::PLAYER);
            }
        }
    }

    /// Marks tiles that are solid or shielded from the centre by solid terrain.
    pub fn update_blocking(&mut self, grid: &(impl GridOracle + ?Sized)) {
        let center = self.center;
        for tile in &mut self.tiles {
            let blocked = grid.blocks_fire(tile.position)
                || !has_clear_path_with(center, tile.position, |p| grid.blocks_fire(p));
            tile.flags.set(TileFlags::BLOCKED, blocked);
        }
    }
}
