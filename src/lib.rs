//! TUI Snake (workspace facade crate).
//!
//! This package exposes `tui_snake::{core,input,term,types}` as one public API
//! while the implementation lives in dedicated crates under `crates/`, plus
//! the launch-time [`config`] shared by the binary.

pub mod config;

pub use tui_snake_core as core;
pub use tui_snake_input as input;
pub use tui_snake_term as term;
pub use tui_snake_types as types;
