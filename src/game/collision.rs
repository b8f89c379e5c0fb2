//! # Collision Resolution
//!
//! Axis-separated rectangle-vs-wall resolution. Movement is applied on X
//! first and clamped against every wall it now overlaps, then on Y from the
//! corrected position. Resolving one axis at a time keeps the box from
//! slipping through corners while still letting it slide along a wall.

use crate::{Map, Rect};

/// Source of wall rectangles for the resolver.
///
/// Implementations must return every wall that could overlap `area`, in a
/// stable order; the resolver clamps against them in that order. The list
/// for a larger area must contain the list for any area inside it, in the
/// same relative order.
pub trait WallQuery {
    fn walls_in(&self, area: Rect) -> Vec<Rect>;
}

/// Exhaustive lookup: every rectangle is a candidate.
impl WallQuery for [Rect] {
    fn walls_in(&self, _area: Rect) -> Vec<Rect> {
        self.to_vec()
    }
}

impl WallQuery for Vec<Rect> {
    fn walls_in(&self, area: Rect) -> Vec<Rect> {
        self.as_slice().walls_in(area)
    }
}

/// Broad-phase lookup through the cells under the queried area.
impl WallQuery for Map {
    fn walls_in(&self, area: Rect) -> Vec<Rect> {
        self.wall_rects_in(area)
    }
}

/// Moves `bounds` by `(dx, dy)` and resolves overlaps with walls.
///
/// # Examples
///
/// ```
/// use wanderer::{resolve_movement, Rect};
///
/// let walls = vec![Rect::new(64, 0, 32, 32)];
/// let player = Rect::new(30, 2, 28, 28);
/// let moved = resolve_movement(player, 8, 0, &walls);
/// assert_eq!(moved.right(), 64);
/// assert_eq!(moved.y, 2);
/// ```
pub fn resolve_movement<W: WallQuery + ?Sized>(bounds: Rect, dx: i32, dy: i32, walls: &W) -> Rect {
    let after_x = resolve_axis(bounds, dx, Axis::Horizontal, walls);
    resolve_axis(after_x, dy, Axis::Vertical, walls)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn resolve_axis<W: WallQuery + ?Sized>(bounds: Rect, delta: i32, axis: Axis, walls: &W) -> Rect {
    if delta == 0 {
        return bounds;
    }

    let mut moved = match axis {
        Axis::Horizontal => bounds.translate(delta, 0),
        Axis::Vertical => bounds.translate(0, delta),
    };

    let mut covered = bounds.union(&moved);
    let mut candidates = walls.walls_in(covered);
    let mut next = 0;
    while let Some(&wall) = candidates.get(next) {
        next += 1;
        if !moved.intersects(&wall) {
            continue;
        }
        match (axis, delta > 0) {
            (Axis::Horizontal, true) => moved.set_right(wall.left()),
            (Axis::Horizontal, false) => moved.set_left(wall.right()),
            (Axis::Vertical, true) => moved.set_bottom(wall.top()),
            (Axis::Vertical, false) => moved.set_top(wall.bottom()),
        }

        // A box that started inside a wall can be pushed past the queried
        // area; widen the query and carry on after the walls already seen.
        let grown = covered.union(&moved);
        if grown != covered {
            let refreshed = walls.walls_in(grown);
            next = resume_after(&refreshed, &candidates[..next]);
            candidates = refreshed;
            covered = grown;
        }
    }

    moved
}

/// Index in `refreshed` just past the walls in `seen`, matched in order.
fn resume_after(refreshed: &[Rect], seen: &[Rect]) -> usize {
    let mut matched = 0;
    for (index, wall) in refreshed.iter().enumerate() {
        if matched == seen.len() {
            return index;
        }
        if *wall == seen[matched] {
            matched += 1;
        }
    }
    refreshed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use proptest::prelude::*;

    #[test]
    fn test_x_axis_flush_against_wall() {
        let walls = vec![Rect::new(100, 0, 32, 32)];
        let player = Rect::new(70, 4, 28, 28);

        let moved = resolve_movement(player, 4, 0, &walls);
        assert_eq!(moved.right(), walls[0].left());
        assert_eq!(moved.y, player.y);

        let from_right = Rect::new(134, 4, 28, 28);
        let moved = resolve_movement(from_right, -4, 0, &walls);
        assert_eq!(moved.left(), walls[0].right());
        assert_eq!(moved.y, from_right.y);
    }

    #[test]
    fn test_y_axis_flush_against_wall() {
        let walls = vec![Rect::new(0, 100, 32, 32)];
        let player = Rect::new(2, 70, 28, 28);
        let moved = resolve_movement(player, 0, 4, &walls);
        assert_eq!(moved.bottom(), 100);
        assert_eq!(moved.x, 2);
    }

    #[test]
    fn test_free_movement_is_unchanged() {
        let walls = vec![Rect::new(500, 500, 32, 32)];
        let player = Rect::new(10, 10, 28, 28);
        assert_eq!(resolve_movement(player, 4, -4, &walls), Rect::new(14, 6, 28, 28));
    }

    #[test]
    fn test_wall_sliding() {
        // Wall directly to the right; diagonal input keeps the vertical part
        let walls = vec![Rect::new(32, 0, 32, 96)];
        let player = Rect::new(4, 30, 28, 28);
        let moved = resolve_movement(player, 4, 4, &walls);
        assert_eq!(moved.right(), 32);
        assert_eq!(moved.y, 34);
    }

    #[test]
    fn test_diagonal_into_interior_corner() {
        let map = Map::from_ascii(&["###", "#..", "#.."], 32).unwrap();
        let player = Rect::new(34, 34, 28, 28);

        let moved = resolve_movement(player, -4, -4, &map);
        assert_eq!(moved, Rect::new(32, 32, 28, 28));
        assert!(!map.overlaps_wall(moved));
    }

    #[test]
    fn test_outer_corner_does_not_tunnel() {
        // Single wall cell diagonally ahead of the player
        let walls = vec![Rect::new(32, 32, 32, 32)];
        let player = Rect::new(2, 2, 28, 28);
        let mut rect = player;
        for _ in 0..10 {
            rect = resolve_movement(rect, 4, 4, &walls);
            assert!(!rect.intersects(&walls[0]));
        }
    }

    #[test]
    fn test_map_broad_phase_matches_exhaustive() {
        let map = Map::from_ascii(&["#.#.", "..#.", "#...", ".##."], 32).unwrap();
        let all_walls: Vec<Rect> = map.walls().map(|c| map.cell_rect(c.position)).collect();

        let start = Rect::new(34, 66, 28, 28);
        for (dx, dy) in [(4, 0), (-4, 0), (0, 4), (0, -4), (4, 4), (-4, -4), (4, -4)] {
            assert_eq!(
                resolve_movement(start, dx, dy, &map),
                resolve_movement(start, dx, dy, &all_walls),
                "delta ({}, {})",
                dx,
                dy
            );
        }

        // Starting inside a wall: the first clamp pushes the box onto a
        // wall outside the swept area
        let map = Map::from_ascii(&[".#..", "#...", "...."], 32).unwrap();
        let all_walls: Vec<Rect> = map.walls().map(|c| map.cell_rect(c.position)).collect();
        let start = Rect::new(40, 20, 28, 28);

        let exhaustive = resolve_movement(start, 4, 0, &all_walls);
        assert_eq!(exhaustive.x, -28);
        assert_eq!(resolve_movement(start, 4, 0, &map), exhaustive);
    }

    #[test]
    fn test_resume_after_skips_seen_walls() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(32, 0, 32, 32);
        let c = Rect::new(0, 32, 32, 32);
        assert_eq!(resume_after(&[a, b, c], &[a, b]), 2);
        assert_eq!(resume_after(&[a, b, c], &[b]), 2);
        assert_eq!(resume_after(&[a, b], &[a, b]), 2);
        assert_eq!(resume_after(&[a, b], &[]), 0);
    }

    fn map_strategy() -> impl Strategy<Value = Map> {
        proptest::collection::vec(proptest::bool::weighted(0.25), 8 * 8).prop_map(|walls| {
            let kinds = walls
                .into_iter()
                .map(|wall| if wall { crate::CellKind::Wall } else { crate::CellKind::Floor })
                .collect();
            Map::from_kinds(8, 8, 32, kinds).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_movement_never_ends_inside_wall(
            map in map_strategy(),
            start_x in 0i32..8,
            start_y in 0i32..8,
            moves in proptest::collection::vec((-1i32..=1, -1i32..=1), 1..60),
        ) {
            let start = Position::new(start_x, start_y);
            prop_assume!(!map.is_wall(start));

            let center = map.cell_center(start);
            let mut rect = Rect::centered_at(center.x, center.y, 28, 28);
            for (ax, ay) in moves {
                rect = resolve_movement(rect, ax * 4, ay * 4, &map);
                prop_assert!(!map.overlaps_wall(rect));
            }
        }

        #[test]
        fn prop_broad_phase_matches_exhaustive(
            map in map_strategy(),
            x in -32i32..256,
            y in -32i32..256,
            dx in -8i32..=8,
            dy in -8i32..=8,
        ) {
            let all_walls: Vec<Rect> = map.walls().map(|c| map.cell_rect(c.position)).collect();
            let start = Rect::new(x, y, 28, 28);
            prop_assert_eq!(
                resolve_movement(start, dx, dy, &map),
                resolve_movement(start, dx, dy, &all_walls)
            );
        }
    }
}
