use crate::state::Position;

/// Read-only terrain oracle consumed by line-of-fire, pathfinding and AoE.
///
/// Walkability and transparency are independent: a glass partition is
/// transparent but not walkable, a low barricade is neither walkable nor
/// opaque and grants partial cover.
pub trait GridOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    fn is_walkable(&self, position: Position) -> bool;

    fn is_transparent(&self, position: Position) -> bool;

    /// Tiles that soften a shot passing over them without stopping it.
    fn provides_cover(&self, _position: Position) -> bool {
        false
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Full block for projectiles: solid terrain that is not cover.
    fn blocks_fire(&self, position: Position) -> bool {
        !self.is_walkable(position) && !self.provides_cover(position)
    }

    /// Full block for sight.
    fn blocks_sight(&self, position: Position) -> bool {
        !self.is_transparent(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Canonical terrain classes for battlefield tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    /// Waist-high debris: impassable, see-through, partial cover.
    Barricade,
    /// Impassable but transparent.
    Glass,
    Void,
}

impl TerrainKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn is_transparent(self) -> bool {
        matches!(
            self,
            TerrainKind::Floor | TerrainKind::Barricade | TerrainKind::Glass
        )
    }

    pub fn provides_cover(self) -> bool {
        matches!(self, TerrainKind::Barricade)
    }

    fn from_glyph(glyph: char) -> Self {
        match glyph {
            '#' => TerrainKind::Wall,
            '=' => TerrainKind::Barricade,
            '"' => TerrainKind::Glass,
            ' ' => TerrainKind::Void,
            _ => TerrainKind::Floor,
        }
    }
}

/// Dense rectangular terrain grid. Positions outside the grid are `Void`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl TileGrid {
    /// An all-floor grid.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![TerrainKind::Floor; (width * height) as usize],
        }
    }

    /// Parses a glyph layout. The first line is `y = 0`; rows shorter than
    /// the widest row are padded with `Void`.
    ///
    /// `#` wall, `=` barricade, `"` glass, space void, anything else floor.
    pub fn from_ascii(layout: &str) -> Self {
        let rows: Vec<&str> = layout.lines().collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let mut grid = Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![TerrainKind::Void; (width * height) as usize],
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid.set(Position::new(x as i32, y as i32), TerrainKind::from_glyph(glyph));
            }
        }
        grid
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| (position.y as u32 * self.dimensions.width + position.x as u32) as usize)
    }

    pub fn terrain(&self, position: Position) -> TerrainKind {
        self.index(position)
            .map(|i| self.tiles[i])
            .unwrap_or(TerrainKind::Void)
    }

    /// Overwrites a tile. Out-of-bounds writes are ignored.
    pub fn set(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(i) = self.index(position) {
            self.tiles[i] = terrain;
        }
    }
}

impl GridOracle for TileGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.terrain(position).is_walkable()
    }

    fn is_transparent(&self, position: Position) -> bool {
        self.terrain(position).is_transparent()
    }

    fn provides_cover(&self, position: Position) -> bool {
        self.terrain(position).provides_cover()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_layout_maps_glyphs() {
        let grid = TileGrid::from_ascii("#.=\n\"..");
        assert_eq!(grid.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(grid.terrain(Position::new(0, 0)), TerrainKind::Wall);
        assert_eq!(grid.terrain(Position::new(2, 0)), TerrainKind::Barricade);
        assert_eq!(grid.terrain(Position::new(0, 1)), TerrainKind::Glass);
        assert_eq!(grid.terrain(Position::new(9, 9)), TerrainKind::Void);
    }

    #[test]
    fn glass_is_transparent_but_blocks_fire() {
        let grid = TileGrid::from_ascii("\"");
        let p = Position::ORIGIN;
        assert!(!grid.is_walkable(p));
        assert!(!grid.blocks_sight(p));
        assert!(grid.blocks_fire(p));
    }

    #[test]
    fn barricade_is_cover_not_a_block() {
        let grid = TileGrid::from_ascii("=");
        let p = Position::ORIGIN;
        assert!(grid.provides_cover(p));
        assert!(!grid.blocks_fire(p));
        assert!(!grid.blocks_sight(p));
    }
}
