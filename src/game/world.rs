//! # World Representation
//!
//! The tile grid the player explores. A [`Map`] is generated once and never
//! mutated afterwards; its wall cells are the only obstacles collision knows
//! about.

use crate::config::{MAX_MAP_DIMENSION, MAX_TILE_SIZE};
use crate::{Position, Rect, WandererError, WandererResult};
use serde::{Deserialize, Serialize};

/// What occupies a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
}

impl CellKind {
    /// Whether entities can stand on this cell.
    pub fn is_passable(self) -> bool {
        matches!(self, CellKind::Floor)
    }

    /// The ASCII glyph used by [`Map::from_ascii`] and [`Map::to_ascii`].
    pub fn glyph(self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Floor => '.',
        }
    }
}

/// One grid square of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Grid coordinates of this cell
    pub position: Position,
    /// Wall or floor
    pub kind: CellKind,
}

impl Cell {
    pub fn new(position: Position, kind: CellKind) -> Self {
        Self { position, kind }
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
}

/// A fixed-size grid of cells.
///
/// # Examples
///
/// ```
/// use wanderer::{CellKind, Map, Position};
///
/// let map = Map::from_ascii(&["#..", "..."], 32).unwrap();
/// assert_eq!(map.width(), 3);
/// assert_eq!(map.cell_kind(Position::new(0, 0)), Some(CellKind::Wall));
/// assert_eq!(map.pixel_width(), 96);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: u32,
    height: u32,
    tile_size: i32,
    /// Row-major cells, `cells[y * width + x]`
    cells: Vec<Cell>,
}

impl Map {
    /// Builds a map from row-major cell kinds.
    ///
    /// Fails if `kinds.len()` does not equal `width * height` or the tile size
    /// is not positive.
    pub fn from_kinds(
        width: u32,
        height: u32,
        tile_size: i32,
        kinds: Vec<CellKind>,
    ) -> WandererResult<Self> {
        if !(1..=MAX_MAP_DIMENSION).contains(&width) || !(1..=MAX_MAP_DIMENSION).contains(&height)
        {
            return Err(WandererError::InvalidState(format!(
                "Map dimensions must be within 1..={}, got {}x{}",
                MAX_MAP_DIMENSION, width, height
            )));
        }
        if !(1..=MAX_TILE_SIZE).contains(&tile_size) {
            return Err(WandererError::InvalidState(format!(
                "Tile size must be within 1..={}, got {}",
                MAX_TILE_SIZE, tile_size
            )));
        }
        let expected = width as usize * height as usize;
        if kinds.len() != expected {
            return Err(WandererError::InvalidState(format!(
                "Expected {} cells for a {}x{} map, got {}",
                expected,
                width,
                height,
                kinds.len()
            )));
        }

        let cells = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| {
                let x = (index as u32 % width) as i32;
                let y = (index as u32 / width) as i32;
                Cell::new(Position::new(x, y), kind)
            })
            .collect();

        Ok(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    /// Parses a map from rows of `#` (wall) and `.` (floor).
    ///
    /// Every row must have the same length.
    pub fn from_ascii(rows: &[&str], tile_size: i32) -> WandererResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0) as u32;

        let mut kinds = Vec::with_capacity((width * height) as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(WandererError::InvalidState(format!(
                    "Row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for glyph in row.chars() {
                let kind = match glyph {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Floor,
                    other => {
                        return Err(WandererError::InvalidState(format!(
                            "Unknown map glyph '{}' in row {}",
                            other, y
                        )))
                    }
                };
                kinds.push(kind);
            }
        }

        Self::from_kinds(width, height, tile_size, kinds)
    }

    /// Renders the map back to `#`/`.` rows, mostly for debug logging.
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|cell| cell.kind.glyph()).collect())
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Width of the whole map in pixels.
    pub fn pixel_width(&self) -> i32 {
        self.width as i32 * self.tile_size
    }

    /// Height of the whole map in pixels.
    pub fn pixel_height(&self) -> i32 {
        self.height as i32 * self.tile_size
    }

    /// The map's full extent in pixels, anchored at the origin.
    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(0, 0, self.pixel_width(), self.pixel_height())
    }

    /// Checks if a grid position is inside the map.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the cell at a grid position.
    pub fn get_cell(&self, pos: Position) -> Option<&Cell> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.cells
            .get(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell_kind(&self, pos: Position) -> Option<CellKind> {
        self.get_cell(pos).map(|cell| cell.kind)
    }

    /// Whether the grid position holds a wall. Out-of-map positions are not walls.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_wall)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_wall())
    }

    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    /// Pixel rectangle covered by a grid cell.
    pub fn cell_rect(&self, pos: Position) -> Rect {
        Rect::new(
            pos.x * self.tile_size,
            pos.y * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// Pixel coordinates of a grid cell's center.
    pub fn cell_center(&self, pos: Position) -> Position {
        Position::new(
            pos.x * self.tile_size + self.tile_size / 2,
            pos.y * self.tile_size + self.tile_size / 2,
        )
    }

    /// Grid cell containing a pixel point.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Position {
        Position::new(x.div_euclid(self.tile_size), y.div_euclid(self.tile_size))
    }

    /// Rectangles of every wall cell touching `area`, in row-major order.
    ///
    /// Only the cells under `area` are visited, so the cost depends on the
    /// size of the query rather than the size of the map.
    pub fn wall_rects_in(&self, area: Rect) -> Vec<Rect> {
        if area.w <= 0 || area.h <= 0 {
            return Vec::new();
        }

        let top_left = self.cell_at_pixel(area.left(), area.top());
        let bottom_right = self.cell_at_pixel(area.right() - 1, area.bottom() - 1);

        let x0 = top_left.x.max(0);
        let y0 = top_left.y.max(0);
        let x1 = bottom_right.x.min(self.width as i32 - 1);
        let y1 = bottom_right.y.min(self.height as i32 - 1);

        let mut walls = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pos = Position::new(x, y);
                if self.is_wall(pos) {
                    walls.push(self.cell_rect(pos));
                }
            }
        }
        walls
    }

    /// Whether `area` overlaps any wall cell.
    pub fn overlaps_wall(&self, area: Rect) -> bool {
        self.wall_rects_in(area)
            .iter()
            .any(|wall| wall.intersects(&area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> Map {
        Map::from_ascii(&["....", ".#..", "...#"], 32).unwrap()
    }

    #[test]
    fn test_map_from_ascii() {
        let map = sample_map();
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 3);
        assert_eq!(map.wall_count(), 2);
        assert!(map.is_wall(Position::new(1, 1)));
        assert!(map.is_wall(Position::new(3, 2)));
        assert!(!map.is_wall(Position::new(0, 0)));
        assert!(!map.is_wall(Position::new(-1, 0)));
    }

    #[test]
    fn test_map_ascii_round_trip() {
        let rows = ["#.#", "...", "##."];
        let map = Map::from_ascii(&rows, 16).unwrap();
        assert_eq!(map.to_ascii(), rows.iter().map(|r| r.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_map_rejects_bad_input() {
        assert!(Map::from_ascii(&["..", "."], 32).is_err());
        assert!(Map::from_ascii(&[".x"], 32).is_err());
        assert!(Map::from_ascii(&[], 32).is_err());
        assert!(Map::from_kinds(2, 2, 32, vec![CellKind::Floor; 3]).is_err());
        assert!(Map::from_kinds(2, 2, 0, vec![CellKind::Floor; 4]).is_err());
    }

    #[test]
    fn test_map_size_limits() {
        let huge = Map::from_kinds(70_000, 70_000, 32, Vec::new());
        assert!(matches!(huge, Err(WandererError::InvalidState(_))));
        let wide_tiles = Map::from_kinds(2, 2, 100_000_000, vec![CellKind::Floor; 4]);
        assert!(matches!(wide_tiles, Err(WandererError::InvalidState(_))));

        let largest = Map::from_kinds(
            MAX_MAP_DIMENSION,
            1,
            MAX_TILE_SIZE,
            vec![CellKind::Floor; MAX_MAP_DIMENSION as usize],
        )
        .unwrap();
        assert_eq!(largest.pixel_width(), MAX_MAP_DIMENSION as i32 * MAX_TILE_SIZE);
    }

    #[test]
    fn test_cell_geometry() {
        let map = sample_map();
        assert_eq!(map.cell_rect(Position::new(1, 1)), Rect::new(32, 32, 32, 32));
        assert_eq!(map.cell_center(Position::new(1, 1)), Position::new(48, 48));
        assert_eq!(map.cell_at_pixel(63, 64), Position::new(1, 2));
        assert_eq!(map.cell_at_pixel(-1, 0), Position::new(-1, 0));
        assert_eq!(map.pixel_bounds(), Rect::new(0, 0, 128, 96));
    }

    #[test]
    fn test_cells_are_row_major() {
        let map = sample_map();
        let positions: Vec<_> = map.cells().take(5).map(|c| c.position).collect();
        assert_eq!(positions[3], Position::new(3, 0));
        assert_eq!(positions[4], Position::new(0, 1));
    }

    #[test]
    fn test_wall_rects_in_area() {
        let map = sample_map();

        // Area covering only the wall at (1,1)
        let walls = map.wall_rects_in(Rect::new(40, 40, 10, 10));
        assert_eq!(walls, vec![Rect::new(32, 32, 32, 32)]);

        // Whole map returns walls in row-major order
        let walls = map.wall_rects_in(map.pixel_bounds());
        assert_eq!(walls, vec![Rect::new(32, 32, 32, 32), Rect::new(96, 64, 32, 32)]);

        // Area partly outside the map
        let walls = map.wall_rects_in(Rect::new(-100, -100, 120, 120));
        assert!(walls.is_empty());
    }

    #[test]
    fn test_overlaps_wall_is_strict() {
        let map = sample_map();
        // Touches the (1,1) wall on its left edge only
        assert!(!map.overlaps_wall(Rect::new(0, 32, 32, 32)));
        assert!(map.overlaps_wall(Rect::new(1, 32, 32, 32)));
    }
}
