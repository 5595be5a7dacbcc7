//! Launch-time configuration.
//!
//! Read once from environment variables; anything unset falls back to the
//! defaults in `tui_snake_types`. Values are never changed while running.
//!
//! - `SNAKE_GRID_WIDTH`, `SNAKE_GRID_HEIGHT`: grid size in cells
//! - `SNAKE_TICK_MS`: interval between simulation steps
//! - `SNAKE_CELL_WIDTH`, `SNAKE_CELL_HEIGHT`: terminal cells per grid cell
//! - `SNAKE_SEED`: food RNG seed (random when unset)
//! - `SNAKE_LOG_PATH`: log file; logging is off when unset

use std::str::FromStr;

use thiserror::Error;

use crate::types::{
    GridSize, CELL_HEIGHT, CELL_WIDTH, GRID_HEIGHT, GRID_WIDTH, MAX_CELL_SIDE, MAX_GRID_SIDE,
    MIN_GRID_SIDE, TICK_MS,
};

pub const ENV_GRID_WIDTH: &str = "SNAKE_GRID_WIDTH";
pub const ENV_GRID_HEIGHT: &str = "SNAKE_GRID_HEIGHT";
pub const ENV_TICK_MS: &str = "SNAKE_TICK_MS";
pub const ENV_CELL_WIDTH: &str = "SNAKE_CELL_WIDTH";
pub const ENV_CELL_HEIGHT: &str = "SNAKE_CELL_HEIGHT";
pub const ENV_SEED: &str = "SNAKE_SEED";
pub const ENV_LOG_PATH: &str = "SNAKE_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("grid {width}x{height} is smaller than {min}x{min}")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("grid {width}x{height} exceeds {max} cells per side")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,
    #[error("cell size must be at least 1x1")]
    ZeroCellSize,
    #[error("cell size {cell_w}x{cell_h} exceeds {max} per side")]
    CellTooLarge { cell_w: u16, cell_h: u16, max: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub grid: GridSize,
    pub tick_ms: u32,
    pub cell_w: u16,
    pub cell_h: u16,
    /// `None` means pick a random seed at launch.
    pub seed: Option<u32>,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(GRID_WIDTH, GRID_HEIGHT),
            tick_ms: TICK_MS,
            cell_w: CELL_WIDTH,
            cell_h: CELL_HEIGHT,
            seed: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create from any variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            grid: GridSize::new(
                parse_var(&lookup, ENV_GRID_WIDTH)?.unwrap_or(defaults.grid.width),
                parse_var(&lookup, ENV_GRID_HEIGHT)?.unwrap_or(defaults.grid.height),
            ),
            tick_ms: parse_var(&lookup, ENV_TICK_MS)?.unwrap_or(defaults.tick_ms),
            cell_w: parse_var(&lookup, ENV_CELL_WIDTH)?.unwrap_or(defaults.cell_w),
            cell_h: parse_var(&lookup, ENV_CELL_HEIGHT)?.unwrap_or(defaults.cell_h),
            seed: parse_var(&lookup, ENV_SEED)?,
            log_path: lookup(ENV_LOG_PATH)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_SIDE,
            });
        }
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIDE,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.cell_w == 0 || self.cell_h == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.cell_w > MAX_CELL_SIDE || self.cell_h > MAX_CELL_SIDE {
            return Err(ConfigError::CellTooLarge {
                cell_w: self.cell_w,
                cell_h: self.cell_h,
                max: MAX_CELL_SIDE,
            });
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}
