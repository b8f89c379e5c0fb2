//! # Map Generation
//!
//! Scatters walls over an open grid. Each cell is decided independently, so
//! the result has no connectivity guarantee: pockets of floor can be fully
//! enclosed and the player's spawn point can end up walled in.

use crate::{CellKind, GenerationConfig, Generator, Map, WandererError, WandererResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Generator that makes each cell a wall with a fixed probability.
///
/// # Examples
///
/// ```
/// use wanderer::{GenerationConfig, Generator, ScatterMapGenerator};
/// use wanderer::generation::utils::create_rng;
///
/// let config = GenerationConfig::new(7);
/// let map = ScatterMapGenerator::new().generate(&config, &mut create_rng(&config)).unwrap();
/// assert_eq!(map.width(), 50);
/// assert_eq!(map.height(), 40);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScatterMapGenerator;

impl ScatterMapGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<Map> for ScatterMapGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WandererResult<Map> {
        config.validate_dimensions()?;
        let cell_count = config.width as usize * config.height as usize;
        let kinds = (0..cell_count)
            .map(|_| {
                if rng.gen::<f64>() < config.wall_probability {
                    CellKind::Wall
                } else {
                    CellKind::Floor
                }
            })
            .collect();

        let map = Map::from_kinds(config.width, config.height, config.tile_size, kinds)
            .map_err(|e| WandererError::GenerationFailed(e.to_string()))?;
        self.validate(&map, config)?;

        debug!(
            "{} produced {}x{} map with {} walls",
            self.generator_type(),
            map.width(),
            map.height(),
            map.wall_count()
        );
        Ok(map)
    }

    fn validate(&self, content: &Map, config: &GenerationConfig) -> WandererResult<()> {
        if content.width() != config.width || content.height() != config.height {
            return Err(WandererError::GenerationFailed(format!(
                "Expected a {}x{} map, got {}x{}",
                config.width,
                config.height,
                content.width(),
                content.height()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ScatterMapGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::Position;
    use proptest::prelude::*;

    fn generate(config: &GenerationConfig) -> Map {
        ScatterMapGenerator::new()
            .generate(config, &mut create_rng(config))
            .unwrap()
    }

    #[test]
    fn test_same_seed_same_map() {
        let config = GenerationConfig::new(2024);
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&GenerationConfig::new(1));
        let b = generate(&GenerationConfig::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_extreme_probabilities() {
        let mut config = GenerationConfig::new(5);
        config.wall_probability = 0.0;
        assert_eq!(generate(&config).wall_count(), 0);

        config.wall_probability = 1.0;
        let map = generate(&config);
        assert_eq!(map.wall_count(), (config.width * config.height) as usize);
    }

    #[test]
    fn test_wall_ratio_matches_probability() {
        let mut config = GenerationConfig::new(31337);
        config.width = 200;
        config.height = 200;
        config.wall_probability = 0.1;

        let map = generate(&config);
        let ratio = map.wall_count() as f64 / 40_000.0;
        // Standard deviation is 0.0015 at this sample size
        assert!((ratio - 0.1).abs() < 0.01, "wall ratio {}", ratio);
    }

    #[test]
    fn test_oversized_config_is_an_error() {
        let mut config = GenerationConfig::new(1);
        config.width = 70_000;
        config.height = 70_000;
        let result = ScatterMapGenerator::new().generate(&config, &mut create_rng(&config));
        assert!(matches!(result, Err(WandererError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let config = GenerationConfig::new(1);
        let map = Map::from_ascii(&["..", ".."], 32).unwrap();
        assert!(ScatterMapGenerator::new().validate(&map, &config).is_err());
    }

    proptest! {
        #[test]
        fn prop_every_cell_is_in_the_grid(seed in any::<u64>(), p in 0.0f64..=1.0) {
            let mut config = GenerationConfig::new(seed);
            config.width = 16;
            config.height = 12;
            config.wall_probability = p;

            let map = generate(&config);
            prop_assert_eq!(map.cells().count(), 16 * 12);
            for cell in map.cells() {
                prop_assert!(map.is_valid_position(cell.position));
                prop_assert!(matches!(cell.kind, CellKind::Wall | CellKind::Floor));
                prop_assert_eq!(map.get_cell(cell.position).map(|c| c.position), Some(cell.position));
            }
            prop_assert!(map.get_cell(Position::new(16, 0)).is_none());
        }
    }
}
