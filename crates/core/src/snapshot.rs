use std::hash::{Hash, Hasher};

use crate::types::{Direction, GridSize, Point, START_DIRECTION};

/// Renderable copy of the engine state.
///
/// Callers that render every frame should keep one snapshot around and
/// refill it with `GameState::snapshot_into`, which reuses `segments`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: GridSize,
    /// Head first.
    pub segments: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub running: bool,
    pub score: u32,
    pub best_score: u32,
    pub episode_id: u32,
    pub ticks: u32,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.segments.first().copied()
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    /// Cheap hash used to tell frames apart.
    pub fn fingerprint(&self) -> u64 {
        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            segments: Vec::new(),
            food: Point::default(),
            direction: START_DIRECTION,
            running: false,
            score: 0,
            best_score: 0,
            episode_id: 0,
            ticks: 0,
        }
    }
}
