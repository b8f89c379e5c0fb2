//! # Proximity Detection
//!
//! Finds interactable entities near the player by inflating each entity's
//! box and testing it against the player's box. Polled once per tick.

use crate::{Entity, Rect};

/// Returns the first entity whose box, inflated by `margin` pixels in total
/// (half on each side), overlaps `player_bounds`.
///
/// Ties resolve to collection order.
///
/// # Examples
///
/// ```
/// use wanderer::{nearest_within, Npc, Rect};
///
/// let npcs = vec![Npc::new(100, 100, 28, "Hi")];
/// let player = Rect::new(40, 86, 28, 28); // 18px gap to the NPC
/// assert!(nearest_within(player, &npcs, 20).is_none());
/// assert!(nearest_within(player.translate(10, 0), &npcs, 20).is_some());
/// ```
pub fn nearest_within<'a, E, I>(player_bounds: Rect, entities: I, margin: i32) -> Option<&'a E>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    entities
        .into_iter()
        .filter(|entity| entity.is_alive())
        .find(|entity| player_bounds.intersects(&entity.bounds().inflate(margin, margin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CombatStats, Monster, Npc};

    #[test]
    fn test_npc_on_inflated_edge_is_detected() {
        // NPC box 86..114; inflated by 20 -> 76..124
        let npcs = vec![Npc::new(100, 100, 28, "Hello")];

        // Overlaps the inflated box by one pixel, nowhere near the NPC center
        let player = Rect::new(49, 86, 28, 28);
        assert_eq!(player.right(), 77);
        let found = nearest_within(player, &npcs, 20);
        assert_eq!(found.map(|npc| npc.message()), Some("Hello"));
    }

    #[test]
    fn test_npc_outside_inflated_box_is_not_detected() {
        let npcs = vec![Npc::new(100, 100, 28, "Hello")];

        // Right edge touches the inflated box without overlapping
        let player = Rect::new(48, 86, 28, 28);
        assert!(nearest_within(player, &npcs, 20).is_none());

        let far = Rect::new(0, 0, 28, 28);
        assert!(nearest_within(far, &npcs, 20).is_none());
    }

    #[test]
    fn test_monster_margin_is_smaller() {
        let monsters = vec![Monster::new(100, 100, 26, CombatStats::new(20, 3))];
        // Monster box 87..113; inflated by 10 -> 82..118
        let player = Rect::new(55, 87, 28, 28); // right edge 83
        assert!(nearest_within(player, &monsters, 10).is_some());
        let player = Rect::new(54, 87, 28, 28); // right edge 82, touching
        assert!(nearest_within(player, &monsters, 10).is_none());
    }

    #[test]
    fn test_first_match_in_collection_order() {
        let npcs = vec![Npc::new(100, 100, 28, "first"), Npc::new(110, 100, 28, "second")];
        let player = Rect::new(90, 90, 28, 28);
        let found = nearest_within(player, &npcs, 20).unwrap();
        assert_eq!(found.message(), "first");
    }

    #[test]
    fn test_defeated_monsters_are_skipped() {
        let mut monsters = vec![
            Monster::new(100, 100, 26, CombatStats::new(0, 3)),
            Monster::new(100, 100, 26, CombatStats::new(10, 3)),
        ];
        let player = Rect::new(90, 90, 28, 28);
        let found = nearest_within(player, &monsters, 10).unwrap();
        assert_eq!(found.stats.hp, 10);

        monsters[1].stats.hp = -1;
        assert!(nearest_within(player, &monsters, 10).is_none());
    }
}
