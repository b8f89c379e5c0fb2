//! # Encounter Generation
//!
//! Monster placement by rejection sampling against wall cells, and placement
//! of the fixed NPC roster.

use crate::{
    CombatStats, GenerationConfig, Generator, Map, Monster, Npc, WandererError, WandererResult,
};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;

/// Places monsters on random floor cells of a map.
///
/// Candidate cells are drawn uniformly from the configured spawn area and
/// rejected when they are walls. Sampling stops once `monster_count`
/// monsters are placed or `max_spawn_attempts` candidates have been drawn,
/// so a wall-heavy map yields fewer monsters rather than an error.
#[derive(Debug, Clone)]
pub struct MonsterSpawner<'a> {
    map: &'a Map,
}

impl<'a> MonsterSpawner<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self { map }
    }
}

impl Generator<Vec<Monster>> for MonsterSpawner<'_> {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WandererResult<Vec<Monster>> {
        let target = config.monster_count as usize;
        let mut monsters = Vec::with_capacity(target.min(config.max_spawn_attempts as usize));
        let mut attempts = 0;

        while monsters.len() < target && attempts < config.max_spawn_attempts {
            attempts += 1;
            let cell = crate::Position::new(
                rng.gen_range(config.monster_spawn_min.x..=config.monster_spawn_max.x),
                rng.gen_range(config.monster_spawn_min.y..=config.monster_spawn_max.y),
            );
            if !self.map.cell_kind(cell).is_some_and(|kind| kind.is_passable()) {
                continue;
            }

            let stats = CombatStats::new(
                rng.gen_range(config.monster_hp.to_range()),
                rng.gen_range(config.monster_atk.to_range()),
            );
            let center = self.map.cell_center(cell);
            monsters.push(Monster::new(center.x, center.y, config.monster_size, stats));
        }

        if monsters.len() < target {
            warn!(
                "Placed only {} of {} monsters after {} attempts",
                monsters.len(),
                target,
                attempts
            );
        } else {
            debug!("Placed {} monsters in {} attempts", monsters.len(), attempts);
        }

        self.validate(&monsters, config)?;
        Ok(monsters)
    }

    fn validate(&self, content: &Vec<Monster>, config: &GenerationConfig) -> WandererResult<()> {
        for monster in content {
            let cell = self
                .map
                .cell_at_pixel(monster.bounds.center_x(), monster.bounds.center_y());
            if self.map.is_wall(cell) {
                return Err(WandererError::GenerationFailed(format!(
                    "Monster placed on wall cell {:?}",
                    cell
                )));
            }
            if !config.monster_hp.contains(monster.stats.hp)
                || !config.monster_atk.contains(monster.stats.atk)
            {
                return Err(WandererError::GenerationFailed(format!(
                    "Monster stats {:?} outside configured ranges",
                    monster.stats
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MonsterSpawner"
    }
}

/// Creates the configured NPCs, each centered on its cell.
///
/// NPC cells are not checked against walls; the roster is fixed content.
pub fn place_npcs(map: &Map, config: &GenerationConfig) -> Vec<Npc> {
    config
        .npcs
        .iter()
        .map(|placement| {
            let center = map.cell_center(placement.cell);
            Npc::new(center.x, center.y, config.npc_size, placement.message.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::{Entity, Position, Rect, ScatterMapGenerator};

    #[test]
    fn test_monsters_land_on_floor_with_rolled_stats() {
        let config = GenerationConfig::new(77);
        let mut rng = create_rng(&config);
        let map = ScatterMapGenerator::new().generate(&config, &mut rng).unwrap();

        let monsters = MonsterSpawner::new(&map).generate(&config, &mut rng).unwrap();
        assert_eq!(monsters.len(), 8);
        for monster in &monsters {
            let cell = map.cell_at_pixel(monster.bounds.center_x(), monster.bounds.center_y());
            assert!(!map.is_wall(cell));
            assert!((5..=40).contains(&cell.x));
            assert!((5..=30).contains(&cell.y));
            assert!((20..=40).contains(&monster.stats.hp));
            assert!((3..=7).contains(&monster.stats.atk));
            assert_eq!(monster.bounds.w, 26);
        }
    }

    #[test]
    fn test_all_wall_map_places_nothing() {
        let mut config = GenerationConfig::new(3);
        config.wall_probability = 1.0;
        let mut rng = create_rng(&config);
        let map = ScatterMapGenerator::new().generate(&config, &mut rng).unwrap();

        let monsters = MonsterSpawner::new(&map).generate(&config, &mut rng).unwrap();
        assert!(monsters.is_empty());
    }

    #[test]
    fn test_single_floor_cell_is_found() {
        let mut config = GenerationConfig::for_testing(9);
        config.width = 3;
        config.height = 3;
        config.monster_count = 1;
        config.monster_spawn_min = Position::new(0, 0);
        config.monster_spawn_max = Position::new(2, 2);
        let map = Map::from_ascii(&["###", "#.#", "###"], 32).unwrap();

        let mut rng = create_rng(&config);
        let monsters = MonsterSpawner::new(&map).generate(&config, &mut rng).unwrap();
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].bounds, Rect::centered_at(48, 48, 26, 26));
    }

    #[test]
    fn test_huge_monster_count_is_bounded_by_attempts() {
        let mut config = GenerationConfig::for_testing(4);
        config.monster_count = u32::MAX;
        config.max_spawn_attempts = 10;
        let mut rng = create_rng(&config);
        let map = ScatterMapGenerator::new().generate(&config, &mut rng).unwrap();

        let monsters = MonsterSpawner::new(&map).generate(&config, &mut rng).unwrap();
        assert_eq!(monsters.len(), 10);
    }

    #[test]
    fn test_validate_rejects_monster_on_wall() {
        let config = GenerationConfig::for_testing(1);
        let map = Map::from_ascii(&["#."], 32).unwrap();
        let on_wall = vec![Monster::new(16, 16, 26, CombatStats::new(25, 4))];
        assert!(MonsterSpawner::new(&map).validate(&on_wall, &config).is_err());
    }

    #[test]
    fn test_npcs_centered_on_cells() {
        let config = GenerationConfig::new(1);
        let map = ScatterMapGenerator::new()
            .generate(&config, &mut create_rng(&config))
            .unwrap();

        let npcs = place_npcs(&map, &config);
        assert_eq!(npcs.len(), 2);
        assert_eq!(npcs[0].bounds(), Rect::centered_at(336, 336, 28, 28));
        assert_eq!(npcs[0].message(), "Hello traveler!\nWelcome to our village.");
        assert_eq!(npcs[1].bounds().center_x(), 20 * 32 + 16);
    }
}
