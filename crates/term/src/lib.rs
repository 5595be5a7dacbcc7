//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is flushed to the terminal as a diff, with no
//! widget or layout library in between.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep view code pure: snapshot in, framebuffer out
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, FieldLayout, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
