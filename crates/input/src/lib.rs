//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and buffers them between ticks.

pub mod handler;
pub mod map;

pub use tui_snake_types as types;

pub use handler::{InputHandler, INPUT_BUFFER_CAPACITY};
pub use map::{handle_key_event, should_quit};
