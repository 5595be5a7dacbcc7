//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same food sequence
//! - **Testable**: Every rule is reachable from plain method calls
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`game_state`]: Snake, food, score and the running/game-over lifecycle
//! - [`snake`]: Ordered body cells, head first
//! - [`rng`]: Seeded LCG and uniform food placement
//! - [`snapshot`]: Renderable copy of the state for the view layer
//!
//! # Game Rules
//!
//! - Each tick the head moves one cell in the current direction
//! - Leaving the grid or hitting any current segment ends the game
//! - Landing on food grows the snake by one and scores one point
//! - Reversing straight into the neck is not allowed; the request is ignored
//! - After game over, only a restart brings the game back
//!
//! # Example
//!
//! ```
//! use tui_snake_core::GameState;
//! use tui_snake_types::{Direction, GameAction, GridSize};
//!
//! let mut game = GameState::new(GridSize::default(), 12345);
//!
//! game.apply_action(GameAction::Turn(Direction::Down));
//! game.tick();
//!
//! assert!(game.is_running());
//! assert_eq!(game.segments().next().unwrap().y, 6);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. The host calls [`GameState::tick`](game_state::GameState::tick)
//! once per fixed interval (`TICK_MS` by default) and applies input between ticks.

pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use game_state::GameState;
pub use rng::{FoodSpawner, SimpleRng};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
