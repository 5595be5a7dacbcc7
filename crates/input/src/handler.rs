//! Per-tick input buffer for terminal environments.
//!
//! Key presses arrive between ticks; the host drains them in arrival order
//! right before the next tick. The buffer is fixed-size and never allocates.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

/// Maximum number of actions held between two ticks.
pub const INPUT_BUFFER_CAPACITY: usize = 8;

/// Collects actions between ticks.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pending: ArrayVec<GameAction, INPUT_BUFFER_CAPACITY>,
    dropped: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal key event.
    ///
    /// Only presses count; auto-repeat and release events are ignored.
    /// Returns the buffered action, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = handle_key_event(key)?;
        self.push(action);
        Some(action)
    }

    /// Buffer an action. When full, the newest action is dropped.
    pub fn push(&mut self, action: GameAction) -> bool {
        if self.pending.try_push(action).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }
        true
    }

    /// Take all buffered actions, oldest first.
    pub fn drain(&mut self) -> ArrayVec<GameAction, INPUT_BUFFER_CAPACITY> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[GameAction] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Actions dropped because the buffer was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
