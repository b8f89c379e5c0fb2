//! # Game State Module
//!
//! Central game state and the per-tick update.
//!
//! [`GameState`] owns the map, every entity, the camera, and the current
//! [`GameMode`]. It is advanced by [`GameState::update`] from an
//! [`InputSnapshot`] and a [`Dice`] source and never touches the window or
//! the clock itself, so a session can be replayed tick for tick.

use crate::generation::utils::create_rng;
use crate::{
    nearest_within, place_npcs, resolve_movement, BattleSession, Camera, CombatStats, Dice,
    Direction, Entity, EntityId, Exchange, GameConfig, Generator, InputEvent, InputSnapshot, Map,
    Monster, MonsterSpawner, Npc, PlayerCharacter, ScatterMapGenerator, TurnOutcome,
    WandererError, WandererResult, EXIT_CODE_GAME_OVER, EXIT_CODE_QUIT,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// What the player is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Free movement; monsters engage on contact
    Exploring,
    /// A dialog box is open; movement is suspended
    Dialog { message: String },
    /// Fighting one monster; movement is suspended
    Battle(BattleSession),
}

impl GameMode {
    pub fn is_exploring(&self) -> bool {
        matches!(self, GameMode::Exploring)
    }

    /// The engaged monster, if a battle is running.
    pub fn battle(&self) -> Option<&BattleSession> {
        match self {
            GameMode::Battle(session) => Some(session),
            _ => None,
        }
    }
}

/// Why the game loop should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameExit {
    /// The window was closed
    Quit,
    /// The player's hp reached zero
    Defeated,
}

impl GameExit {
    /// Process exit code; quitting and losing are distinguishable.
    pub fn exit_code(self) -> i32 {
        match self {
            GameExit::Quit => EXIT_CODE_QUIT,
            GameExit::Defeated => EXIT_CODE_GAME_OVER,
        }
    }
}

/// Result of applying one input event to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event does not apply in the current mode; nothing changed
    Ignored,
    DialogOpened,
    DialogClosed,
    /// One battle turn was resolved and both sides are still standing
    TurnResolved(Exchange),
    Victory { monster_id: EntityId },
    Fled { monster_id: EntityId },
    Defeated,
    QuitRequested,
}

/// Result of a whole tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Exit(GameExit),
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Ticks simulated so far
    pub ticks: u64,
    /// Ticks on which the player actually moved
    pub ticks_moving: u64,
    pub battles_started: u32,
    pub monsters_defeated: u32,
    pub battles_fled: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub dialogs_opened: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the damage from one battle turn.
    pub fn record_exchange(&mut self, exchange: &Exchange) {
        self.damage_dealt += exchange.dealt.max(0) as u64;
        if let Some(taken) = exchange.taken {
            self.damage_taken += taken.max(0) as u64;
        }
    }
}

/// Central game state containing all game data.
///
/// This is the main coordination point for all game operations. It is
/// created once at startup and lives for the whole process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The immutable tile grid
    pub map: Map,
    /// NPCs in placement order
    pub npcs: Vec<Npc>,
    /// Monsters still alive, in spawn order
    pub monsters: Vec<Monster>,
    pub player: PlayerCharacter,
    pub mode: GameMode,
    pub camera: Camera,
    /// Monster the player fled from and has not yet walked away from
    pub fled_from: Option<EntityId>,
    pub statistics: GameStatistics,
    pub config: GameConfig,
}

impl GameState {
    /// Generates a fresh world from the configuration.
    ///
    /// The map, monster positions, and monster stats all come from `rng`.
    pub fn generate(config: GameConfig, rng: &mut StdRng) -> WandererResult<Self> {
        config.validate()?;

        let map = ScatterMapGenerator::new().generate(&config.generation, rng)?;
        let monsters = MonsterSpawner::new(&map).generate(&config.generation, rng)?;
        let npcs = place_npcs(&map, &config.generation);

        info!(
            "Generated {}x{} map with {} walls, {} monsters, {} NPCs",
            map.width(),
            map.height(),
            map.wall_count(),
            monsters.len(),
            npcs.len()
        );

        Self::from_parts(config, map, npcs, monsters)
    }

    /// Generates a world seeded from `config.generation.seed`, drawing a
    /// random seed first if none is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::{GameConfig, GameState};
    ///
    /// let state = GameState::new(GameConfig::with_seed(12345)).unwrap();
    /// assert!(state.mode.is_exploring());
    /// assert_eq!(state.player.stats.hp, 50);
    /// ```
    pub fn new(mut config: GameConfig) -> WandererResult<Self> {
        let seed = config.generation.resolve_seed();
        debug!("Generating world from seed {}", seed);
        let mut rng = create_rng(&config.generation);
        Self::generate(config, &mut rng)
    }

    /// Assembles a state from pre-built pieces, placing the player at the
    /// configured start point.
    pub fn from_parts(
        config: GameConfig,
        map: Map,
        npcs: Vec<Npc>,
        monsters: Vec<Monster>,
    ) -> WandererResult<Self> {
        config.validate()?;

        let player_config = &config.player;
        let player = PlayerCharacter::new(
            player_config.start.x,
            player_config.start.y,
            player_config.size,
            player_config.speed,
            CombatStats::new(player_config.hp, player_config.atk),
        );

        if map.overlaps_wall(player.bounds) {
            warn!(
                "Player spawn {:?} overlaps a wall; the player may be stuck",
                player.bounds
            );
        }

        let mut state = Self {
            camera: Camera::new(config.screen_width, config.screen_height),
            map,
            npcs,
            monsters,
            player,
            mode: GameMode::Exploring,
            fled_from: None,
            statistics: GameStatistics::new(),
            config,
        };
        state.update_camera();
        Ok(state)
    }

    /// Advances the game by one tick.
    ///
    /// Events are applied in order; a quit or a defeat ends the tick
    /// immediately. Afterwards, if the player is exploring, they move and
    /// may engage a monster. The camera is always brought up to date.
    pub fn update<D: Dice + ?Sized>(&mut self, input: &InputSnapshot, dice: &mut D) -> TickOutcome {
        self.statistics.ticks += 1;

        for event in &input.events {
            match self.apply_event(*event, dice) {
                Transition::QuitRequested => return TickOutcome::Exit(GameExit::Quit),
                Transition::Defeated => return TickOutcome::Exit(GameExit::Defeated),
                Transition::Ignored => debug!("Ignored {:?} while {}", event, self.mode_name()),
                _ => {}
            }
        }

        if self.mode.is_exploring() {
            let (axis_x, axis_y) = input.held.axis();
            self.move_player(axis_x, axis_y);
        }

        if self.mode.is_exploring() {
            self.check_engagement();
        }

        self.update_camera();
        TickOutcome::Continue
    }

    /// Applies a single input event to the mode state machine.
    pub fn apply_event<D: Dice + ?Sized>(&mut self, event: InputEvent, dice: &mut D) -> Transition {
        let in_dialog = matches!(self.mode, GameMode::Dialog { .. });
        let in_battle = self.mode.battle().is_some();

        match event {
            InputEvent::Quit => Transition::QuitRequested,
            InputEvent::Interact if !in_battle => self.open_dialog(),
            InputEvent::Confirm | InputEvent::Cancel if in_dialog => {
                self.mode = GameMode::Exploring;
                Transition::DialogClosed
            }
            InputEvent::Confirm if in_battle => self.attack(dice),
            InputEvent::Cancel if in_battle => self.flee(),
            _ => Transition::Ignored,
        }
    }

    /// Opens the dialog of the nearest NPC, if any is in range. An open
    /// dialog is replaced; with no NPC in range it stays as it is.
    fn open_dialog(&mut self) -> Transition {
        let message = match self.nearby_npc() {
            Some(npc) => npc.message().to_string(),
            None => return Transition::Ignored,
        };

        debug!("Dialog opened: {:?}", message);
        self.statistics.dialogs_opened += 1;
        self.mode = GameMode::Dialog { message };
        Transition::DialogOpened
    }

    /// Resolves one battle turn against the engaged monster.
    fn attack<D: Dice + ?Sized>(&mut self, dice: &mut D) -> Transition {
        let GameMode::Battle(session) = &mut self.mode else {
            return Transition::Ignored;
        };
        let monster_id = session.monster_id;

        let Some(index) = self.monsters.iter().position(|m| m.id == monster_id) else {
            warn!("Engaged monster {} is gone; leaving battle", monster_id);
            self.mode = GameMode::Exploring;
            return Transition::Ignored;
        };

        let (exchange, outcome) = session.resolve_turn(
            &mut self.player.stats,
            &mut self.monsters[index].stats,
            &self.config.damage,
            dice,
        );
        self.statistics.record_exchange(&exchange);
        debug!(
            "Turn {}: dealt {}, took {:?}; player hp {}, monster hp {}",
            session.turns,
            exchange.dealt,
            exchange.taken,
            self.player.stats.hp,
            self.monsters[index].stats.hp
        );

        match outcome {
            TurnOutcome::Continue => Transition::TurnResolved(exchange),
            TurnOutcome::MonsterDefeated => {
                if let Err(e) = self.remove_monster(monster_id) {
                    warn!("{}", e);
                }
                self.mode = GameMode::Exploring;
                self.statistics.monsters_defeated += 1;
                info!("Monster defeated ({} remaining)", self.monsters.len());
                Transition::Victory { monster_id }
            }
            TurnOutcome::PlayerDefeated => {
                info!("GAME OVER");
                Transition::Defeated
            }
        }
    }

    /// Leaves the battle without exchanging damage.
    fn flee(&mut self) -> Transition {
        let GameMode::Battle(session) = &self.mode else {
            return Transition::Ignored;
        };
        let monster_id = session.monster_id;

        self.mode = GameMode::Exploring;
        self.fled_from = Some(monster_id);
        self.statistics.battles_fled += 1;
        info!("Fled from battle");
        Transition::Fled { monster_id }
    }

    /// Moves the player by held input and updates facing and animation.
    fn move_player(&mut self, axis_x: i32, axis_y: i32) {
        let moving = axis_x != 0 || axis_y != 0;
        if let Some(facing) = Direction::from_movement(axis_x, axis_y) {
            self.player.facing = facing;
        }

        if moving {
            let (dx, dy) = self.player.displacement(axis_x, axis_y);
            let mut bounds = resolve_movement(self.player.bounds, dx, dy, &self.map);
            if self.config.confine_to_map {
                bounds = bounds.clamp_within(&self.map.pixel_bounds());
            }
            if bounds != self.player.bounds {
                self.statistics.ticks_moving += 1;
            }
            self.player.bounds = bounds;
        }

        self.player.animation.update(moving);
    }

    /// Starts a battle if a monster is in range.
    ///
    /// A monster the player just fled from is skipped until the player has
    /// stepped out of its range once.
    fn check_engagement(&mut self) {
        let margin = self.config.monster_engage_margin;
        let bounds = self.player.bounds;

        if let Some(fled_id) = self.fled_from {
            let still_close = self.monsters.iter().any(|monster| {
                monster.id == fled_id && bounds.intersects(&monster.bounds.inflate(margin, margin))
            });
            if !still_close {
                self.fled_from = None;
            }
        }

        let fled_from = self.fled_from;
        let engaged = nearest_within(
            bounds,
            self.monsters.iter().filter(|monster| Some(monster.id) != fled_from),
            margin,
        )
        .map(|monster| (monster.id, monster.stats));

        if let Some((monster_id, stats)) = engaged {
            info!("Monster engaged (hp {}, atk {})", stats.hp, stats.atk);
            self.statistics.battles_started += 1;
            self.mode = GameMode::Battle(BattleSession::new(monster_id));
        }
    }

    /// Re-centers the camera on the player.
    pub fn update_camera(&mut self) {
        let (width, height) = (self.map.pixel_width(), self.map.pixel_height());
        self.camera.follow(&self.player.bounds, width, height);
    }

    /// The NPC the player could talk to right now.
    pub fn nearby_npc(&self) -> Option<&Npc> {
        nearest_within(self.player.bounds, &self.npcs, self.config.npc_interact_margin)
    }

    /// The monster currently in battle.
    pub fn engaged_monster(&self) -> Option<&Monster> {
        let session = self.mode.battle()?;
        self.get_monster(session.monster_id)
    }

    pub fn get_monster(&self, id: EntityId) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    /// Takes a monster out of the world, ending the battle if it was the
    /// engaged one.
    fn remove_monster(&mut self, id: EntityId) -> WandererResult<Monster> {
        let index = self
            .monsters
            .iter()
            .position(|monster| monster.id == id)
            .ok_or_else(|| WandererError::InvalidState(format!("No monster with id {}", id)))?;
        if self.mode.battle().is_some_and(|session| session.monster_id == id) {
            self.mode = GameMode::Exploring;
        }
        Ok(self.monsters.remove(index))
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            GameMode::Exploring => "exploring",
            GameMode::Dialog { .. } => "in dialog",
            GameMode::Battle(_) => "in battle",
        }
    }

    /// Serializes the state for debugging.
    pub fn to_debug_json(&self) -> WandererResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The player's entity id.
    pub fn player_id(&self) -> EntityId {
        self.player.id()
    }
}
