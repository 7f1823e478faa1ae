use std::io::Read;
use std::path::Path;

use crate::engine::BoardError;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Game settings. Every field may be omitted from the TOML file.
///
/// ```
/// use tile_merge::config::GameConfig;
/// let cfg = GameConfig::from_toml_str("rows = 3\nseed = 7\n").unwrap();
/// assert_eq!((cfg.rows, cfg.cols, cfg.seed), (3, 4, Some(7)));
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default = "defaults::rows")]
    pub rows: usize,
    #[serde(default = "defaults::cols")]
    pub cols: usize,
    /// Tiles spawned before the first move.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,
    /// Chance that a spawned tile is a 4 rather than a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
            initial_tiles: defaults::initial_tiles(),
            four_probability: defaults::four_probability(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BoardError::EmptyDimension { rows: self.rows, cols: self.cols }.into());
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Invalid(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        let cells = self
            .rows
            .checked_mul(self.cols)
            .ok_or(BoardError::TooLarge { rows: self.rows, cols: self.cols })?;
        if self.initial_tiles > cells {
            return Err(ConfigError::Invalid(format!(
                "initial_tiles ({}) exceeds board cells ({})",
                self.initial_tiles, cells
            )));
        }
        Ok(())
    }
}

mod defaults {
    pub fn rows() -> usize { 4 }
    pub fn cols() -> usize { 4 }
    pub fn initial_tiles() -> usize { 1 }
    pub fn four_probability() -> f64 { 0.05 }
}
