use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Width and height of the square playing field
pub const GRID_SIZE: i32 = 20;

/// Points awarded for each piece of food
pub const FOOD_SCORE: u32 = 10;

/// Length of the snake at the start of every game
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// No configuration may run the game faster than this
pub const MIN_TICK_FLOOR_MS: u64 = 50;

/// Errors raised while loading or checking a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
///
/// Only the speed curve and the random seed are tunable. The grid and the
/// starting layout are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tick interval at the start of a game, in milliseconds
    pub initial_tick_ms: u64,
    /// The interval never drops below this
    pub min_tick_ms: u64,
    /// How much faster the game gets per food eaten
    pub tick_step_ms: u64,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_tick_ms: 200,
            min_tick_ms: 50,
            tick_step_ms: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_tick_ms < MIN_TICK_FLOOR_MS {
            return Err(ConfigError::Invalid(format!(
                "min_tick_ms ({}) is below {}ms",
                self.min_tick_ms, MIN_TICK_FLOOR_MS
            )));
        }
        if self.min_tick_ms > self.initial_tick_ms {
            return Err(ConfigError::Invalid(format!(
                "min_tick_ms ({}) exceeds initial_tick_ms ({})",
                self.min_tick_ms, self.initial_tick_ms
            )));
        }
        Ok(())
    }

    /// Interval after one more piece of food, clamped to the floor
    pub fn next_tick_ms(&self, current: u64) -> u64 {
        current.saturating_sub(self.tick_step_ms).max(self.min_tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.initial_tick_ms, 200);
        assert_eq!(config.min_tick_ms, 50);
        assert_eq!(config.tick_step_ms, 5);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_speed_curve_floors_at_minimum() {
        let config = GameConfig::default();
        assert_eq!(config.next_tick_ms(200), 195);
        assert_eq!(config.next_tick_ms(55), 50);
        assert_eq!(config.next_tick_ms(52), 50);
        assert_eq!(config.next_tick_ms(50), 50);
    }

    #[test]
    fn test_invalid_configs() {
        let zero_floor = GameConfig {
            min_tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(zero_floor.validate(), Err(ConfigError::Invalid(_))));

        let inverted = GameConfig {
            initial_tick_ms: 40,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_interval_floor_cannot_be_lowered() {
        let too_fast = GameConfig {
            initial_tick_ms: 30,
            min_tick_ms: 10,
            ..Default::default()
        };
        assert!(matches!(too_fast.validate(), Err(ConfigError::Invalid(_))));

        let at_floor = GameConfig {
            initial_tick_ms: 50,
            min_tick_ms: 50,
            ..Default::default()
        };
        assert!(at_floor.validate().is_ok());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_tick_ms": 30, "min_tick_ms": 10, "seed": 1 }}"#).unwrap();
        assert!(matches!(
            GameConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_tick_ms": 150, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.initial_tick_ms, 150);
        assert_eq!(config.min_tick_ms, 50);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            GameConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            GameConfig::from_file(&missing),
            Err(ConfigError::Io(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_tick_ms": 500 }}"#).unwrap();
        assert!(matches!(
            GameConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
