use serde::Serialize;
use std::time::Duration;

use super::action::Direction;
use super::config::{GRID_SIZE, GameConfig, INITIAL_SNAKE_LENGTH};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether the cell lies on the grid
    pub fn is_in_bounds(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake of `length` cells trailing behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit cells, head first. Returns `None` for an empty list.
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { body: cells })
        }
    }

    /// The canonical starting snake: `[(10,10), (9,10), (8,10)]`
    pub fn initial() -> Self {
        Self::new(
            Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        )
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Check if the position is any part of the snake, tail included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; the tail is dropped unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Coarse engine state derived from the running and game-over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub fn from_flags(running: bool, game_over: bool) -> Self {
        match (running, game_over) {
            (_, true) => Status::GameOver,
            (true, false) => Status::Running,
            (false, false) => Status::Paused,
        }
    }
}

/// Complete game state, owned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub tick_interval_ms: u64,
    pub score: u32,
    pub running: bool,
    pub game_over: bool,
}

impl GameState {
    /// Fresh game with the canonical snake heading right
    pub fn initial(config: &GameConfig, food: Position) -> Self {
        Self::new(Snake::initial(), food, Direction::Right, config.initial_tick_ms)
    }

    pub fn new(snake: Snake, food: Position, direction: Direction, tick_interval_ms: u64) -> Self {
        Self {
            snake,
            food,
            direction,
            tick_interval_ms,
            score: 0,
            running: true,
            game_over: false,
        }
    }

    pub fn status(&self) -> Status {
        Status::from_flags(self.running, self.game_over)
    }

    /// End the game, leaving snake, food and score as they were
    pub fn end(&mut self) {
        self.game_over = true;
        self.running = false;
    }
}

/// Immutable copy of the game state handed to renderers and drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub tick_interval_ms: u64,
    pub score: u32,
    pub running: bool,
    pub game_over: bool,
}

impl Snapshot {
    /// First cell of the snake.
    ///
    /// # Panics
    ///
    /// Panics if `snake` is empty. Snapshots taken from a `GameEngine` always
    /// hold at least the head; only hand-built ones can trip this.
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    pub fn status(&self) -> Status {
        Status::from_flags(self.running, self.game_over)
    }

    /// Period the driver's tick timer should run at
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            snake: state.snake.cells().to_vec(),
            food: state.food,
            direction: state.direction,
            tick_interval_ms: state.tick_interval_ms,
            score: state.score,
            running: state.running,
            game_over: state.game_over,
        }
    }
}
