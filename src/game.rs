use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::actor::{Actor, Position};
use crate::collectable::Collectable;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::frame::TextFrame;
use crate::grid::{Cell, Glyphs, Grid};
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::level::Level;

/// Run status reported to the driver after every transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Start screen; waiting for the player to confirm.
    AwaitingStart,
    /// Normal play; the driver keeps ticking.
    Tick,
    /// A collision cost one health point and the actor respawned.
    HealthLost,
    /// Health ran out. Acknowledging resets the whole game.
    GameOver,
    /// The first level was cleared and the next map is loaded.
    LevelAdvanced,
}

impl GameStatus {
    /// Returns true when ticking is suspended until the player confirms.
    #[must_use]
    pub fn awaits_acknowledgement(self) -> bool {
        self != Self::Tick
    }
}

/// Outcome of validating the cell the head is about to enter.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum StepCheck {
    Clear(Position),
    Collision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    actor: Actor,
    collectable: Option<Collectable>,
    level: Level,
    health: u32,
    tick_delay_ms: u64,
    heading: Option<Direction>,
    status: GameStatus,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Validates `config` and builds the initial state with an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let start = Position::new(config.start_row, config.start_col);
        let mut state = Self {
            grid: Grid::new(config.bounds()),
            actor: Actor::new(start),
            collectable: None,
            level: Level::First,
            health: config.starting_health,
            tick_delay_ms: config.base_delay_ms,
            heading: None,
            status: GameStatus::AwaitingStart,
            tick_count: 0,
            rng,
            config,
        };
        state.refill_map();

        Ok(state)
    }

    /// Restores the state produced by construction, keeping the RNG stream.
    pub fn reset(&mut self) {
        self.actor = Actor::new(self.start());
        self.level = Level::First;
        self.health = self.config.starting_health;
        self.tick_delay_ms = self.config.base_delay_ms;
        self.heading = None;
        self.status = GameStatus::AwaitingStart;
        self.tick_count = 0;
        self.refill_map();

        info!("game reset");
    }

    /// Applies one external input event. Quit is left to the driver.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.steer(direction);
            }
            GameInput::Confirm => self.acknowledge(),
            GameInput::Quit => {}
        }
    }

    /// Accepts `direction` unless it reverses the current heading.
    ///
    /// Returns whether the heading now points in `direction`. Steering only
    /// works while the game is ticking.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Tick || !direction_change_is_valid(self.heading, direction) {
            return false;
        }

        self.heading = Some(direction);
        true
    }

    /// Confirms the current status screen and resumes ticking.
    ///
    /// The actor stands still until a new direction arrives. Confirming
    /// `GameOver` resets the game back to the start screen.
    pub fn acknowledge(&mut self) {
        match self.status {
            GameStatus::Tick => {}
            GameStatus::GameOver => self.reset(),
            GameStatus::AwaitingStart | GameStatus::HealthLost | GameStatus::LevelAdvanced => {
                self.heading = None;
                self.status = GameStatus::Tick;
            }
        }
    }

    /// Advances the simulation by one step and returns the new status.
    ///
    /// Does nothing while a status screen awaits acknowledgement.
    pub fn tick(&mut self) -> GameStatus {
        if self.status != GameStatus::Tick {
            return self.status;
        }

        self.tick_count += 1;

        let Some(direction) = self.heading else {
            self.grid.set(self.actor.head(), Cell::Actor);
            return self.status;
        };

        if let Some(vacated) = self.actor.advance_trail() {
            self.grid.set(vacated, Cell::Empty);
        }

        match self.check_step(direction) {
            StepCheck::Clear(next) => self.advance_head(next),
            StepCheck::Collision => self.collide(),
        }

        self.status
    }

    fn check_step(&self, direction: Direction) -> StepCheck {
        let Some(next) = self.actor.head().step(direction) else {
            return StepCheck::Collision;
        };

        let on_collectable = self
            .collectable
            .is_some_and(|collectable| collectable.position == next);

        match self.grid.get(next) {
            Some(Cell::Empty) => StepCheck::Clear(next),
            Some(_) if on_collectable => StepCheck::Clear(next),
            _ => StepCheck::Collision,
        }
    }

    fn collide(&mut self) {
        if self.health > 1 {
            self.health -= 1;
            self.actor = Actor::new(self.start());
            self.refill_map();
            self.status = GameStatus::HealthLost;
            info!("collision, {} health left", self.health);
        } else {
            self.health = 0;
            self.status = GameStatus::GameOver;
            info!(
                "game over on level {} with size {}",
                self.level.name(),
                self.actor.size()
            );
        }
    }

    fn advance_head(&mut self, next: Position) {
        self.grid.set(next, Cell::Actor);
        self.actor.move_head(next);

        let Some(eaten) = self.collectable.filter(|collectable| collectable.position == next)
        else {
            return;
        };

        self.collectable = None;
        self.actor.grow(eaten.growth());
        if self.level.ramps_speed() {
            self.ramp_speed();
        }

        let threshold_reached = self.actor.size() >= self.config.score_threshold;
        if let Some(next_level) = self.level.successor().filter(|_| threshold_reached) {
            self.level = next_level;
            self.actor.relocate(self.start());
            self.refill_map();
            self.status = GameStatus::LevelAdvanced;
            info!("advanced to level {}", next_level.name());
            return;
        }

        self.place_random_collectable();
    }

    fn ramp_speed(&mut self) {
        let reduced = self
            .tick_delay_ms
            .saturating_sub(self.config.delay_decrement_ms);
        if reduced > self.config.min_delay_ms {
            self.tick_delay_ms = reduced;
            debug!("tick delay now {reduced}ms");
        }
    }

    fn refill_map(&mut self) {
        self.grid.fill(self.level, self.start());
        self.collectable = None;
        self.place_random_collectable();
    }

    fn place_random_collectable(&mut self) {
        self.collectable = Collectable::spawn(&mut self.rng, &self.grid);

        match self.collectable {
            Some(collectable) => {
                self.grid.set(collectable.position, collectable.cell());
                debug!(
                    "collectable {} placed at {:?}",
                    collectable.value, collectable.position
                );
            }
            None => warn!("no empty cell left for a collectable"),
        }
    }

    /// Replaces the active collectable with `collectable`.
    ///
    /// Returns false and keeps the current one when the target cell is not
    /// empty. Used for scripted and deterministic play.
    pub fn place_collectable(&mut self, collectable: Collectable) -> bool {
        let previous = self.collectable.take();
        if let Some(previous) = previous {
            self.grid.set(previous.position, Cell::Empty);
        }

        if self.grid.get(collectable.position) != Some(Cell::Empty) {
            if let Some(previous) = previous {
                self.grid.set(previous.position, previous.cell());
            }
            self.collectable = previous;
            return false;
        }

        self.grid.set(collectable.position, collectable.cell());
        self.collectable = Some(collectable);
        true
    }

    /// Serializes status lines and the map for the display.
    #[must_use]
    pub fn frame(&self) -> TextFrame {
        let size = self.actor.size();
        let mut header = vec![
            format!("Health: {}", self.health),
            format!("Level: {}", self.level.name()),
            String::new(),
            format!("Size: {size}"),
        ];

        if self.level.successor().is_some() {
            let remaining = self.config.score_threshold.saturating_sub(size);
            header.push(format!("{remaining} to unlock next level"));
        } else {
            header.push("Desc: endless run with speed increase".to_owned());
            header.push(format!("Speed: 1 step/{}ms", self.tick_delay_ms));
        }

        TextFrame {
            header,
            rows: self.grid.render_rows(self.glyphs()),
        }
    }

    #[must_use]
    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            actor: self.config.actor_glyph,
            wall: self.config.wall_glyph,
        }
    }

    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.config.start_row, self.config.start_col)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.actor.size()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.actor.head()
    }

    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    #[must_use]
    pub fn collectable(&self) -> Option<Collectable> {
        self.collectable
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn tick_delay_ms(&self) -> u64 {
        self.tick_delay_ms
    }

    /// Time the driver waits between two ticks.
    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
