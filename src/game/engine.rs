use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Command, Direction},
    config::{FOOD_SCORE, GRID_SIZE, GameConfig},
    state::{CollisionType, GameState, Position, Snake, Snapshot, Status},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over, nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The move was rejected and the game ended
    Collided(CollisionType),
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// State after the step
    pub snapshot: Snapshot,
    pub outcome: TickOutcome,
}

/// The game engine that owns the state and applies all game rules.
///
/// All mutation goes through `tick`, `set_direction`, `toggle_pause` and
/// `restart`; callers only ever see [`Snapshot`] copies.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration and start a game
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Self::fresh_state(&config, &mut rng);

        Self { config, state, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the current state
    pub fn current_state(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) -> Snapshot {
        self.step().snapshot
    }

    /// Advance the simulation by one frame and report what happened
    pub fn step(&mut self) -> StepResult {
        let outcome = self.advance();
        debug!("tick: {:?}", outcome);

        StepResult {
            snapshot: self.current_state(),
            outcome,
        }
    }

    /// Change the active direction unless it would reverse the snake
    pub fn set_direction(&mut self, direction: Direction) -> Snapshot {
        if self.state.direction.is_opposite(direction) {
            debug!(
                "ignoring reversal from {:?} to {:?}",
                self.state.direction, direction
            );
        } else {
            self.state.direction = direction;
        }

        self.current_state()
    }

    /// Pause a running game or resume a paused one. Finished games stay finished.
    pub fn toggle_pause(&mut self) -> Snapshot {
        if !self.state.game_over {
            self.state.running = !self.state.running;
            info!(
                "game {}",
                if self.state.running { "resumed" } else { "paused" }
            );
        }

        self.current_state()
    }

    /// Discard the current game and start over
    pub fn restart(&mut self) -> Snapshot {
        self.state = Self::fresh_state(&self.config, &mut self.rng);
        info!("game restarted, food at {:?}", self.state.food);

        self.current_state()
    }

    /// Dispatch a driver command
    pub fn apply(&mut self, command: Command) -> Snapshot {
        match command {
            Command::SetDirection(direction) => self.set_direction(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
        }
    }

    fn advance(&mut self) -> TickOutcome {
        if self.state.game_over || !self.state.running {
            return TickOutcome::Idle;
        }

        // Read the direction now, so a turn accepted since the last tick applies
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        if let Some(collision) = Self::check_collision(&self.state.snake, new_head) {
            self.state.end();
            info!(
                "game over ({:?}) at {:?}, score {}",
                collision, new_head, self.state.score
            );
            return TickOutcome::Collided(collision);
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.state.score += FOOD_SCORE;
        let previous_interval = self.state.tick_interval_ms;
        self.state.tick_interval_ms = self.config.next_tick_ms(previous_interval);
        self.state.food = Self::spawn_food_avoid_snake(&mut self.rng, &self.state.snake);

        info!(
            "food eaten, score {}, interval {}ms -> {}ms, next food at {:?}",
            self.state.score, previous_interval, self.state.tick_interval_ms, self.state.food
        );

        TickOutcome::Ate
    }

    /// Check if the new head position causes a collision.
    /// The whole pre-move body counts, since the tail has not moved yet.
    fn check_collision(snake: &Snake, pos: Position) -> Option<CollisionType> {
        if !pos.is_in_bounds() {
            return Some(CollisionType::Wall);
        }

        if snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a uniformly random cell not covered by the snake.
    ///
    /// Rejection sampling only terminates while the snake leaves a free cell.
    /// A snake covering all `GRID_SIZE * GRID_SIZE` cells cannot happen under
    /// the current rules and is not handled: the loop would never return.
    fn spawn_food_avoid_snake(rng: &mut StdRng, snake: &Snake) -> Position {
        debug_assert!(snake.len() < (GRID_SIZE * GRID_SIZE) as usize);

        loop {
            let pos = Position::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));

            if !snake.contains(pos) {
                return pos;
            }
        }
    }

    fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let snake = Snake::initial();
        let food = Self::spawn_food_avoid_snake(rng, &snake);

        GameState::initial(config, food)
    }

    #[cfg(test)]
    fn with_state(config: GameConfig, state: GameState) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
        Self { config, state, rng }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
