//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid
//!
//! The playfield is a fixed-size grid of cells addressed by `(x, y)`:
//!
//! - `x` grows to the right, `y` grows downward (screen coordinates)
//! - **Default size**: 25 x 25 cells
//! - **Start layout**: head at (5, 5), body trailing to the left, moving right
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Interval between simulation steps |
//! | `GAME_OVER_REDRAW_MS` | 250 | Minimum redraw interval while the frame is static |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, GameAction, GridSize, Point, GRID_HEIGHT, GRID_WIDTH};
//!
//! // Directions know their opposite
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//!
//! // Step a point one cell
//! let head = Point::new(5, 5);
//! assert_eq!(head.step(Direction::Right), Point::new(6, 5));
//!
//! // Bounds
//! let grid = GridSize::new(GRID_WIDTH, GRID_HEIGHT);
//! assert!(grid.contains(Point::new(0, 24)));
//! assert!(!grid.contains(Point::new(-1, 5)));
//!
//! // Turning is an action; the engine decides whether it applies
//! let action = GameAction::Turn(Direction::Up);
//! assert_ne!(action, GameAction::Restart);
//! ```

/// Default grid width in cells (25 columns)
pub const GRID_WIDTH: u16 = 25;

/// Default grid height in cells (25 rows)
pub const GRID_HEIGHT: u16 = 25;

/// Smallest grid the start layout fits in.
pub const MIN_GRID_SIDE: u16 = 6;

/// Largest accepted grid side. Keeps every coordinate inside `i16`.
pub const MAX_GRID_SIDE: u16 = 1000;

/// Fixed interval between simulation steps in milliseconds
pub const TICK_MS: u32 = 100;

/// Terminal columns per grid cell (2 compensates for glyph aspect ratio)
pub const CELL_WIDTH: u16 = 2;

/// Terminal rows per grid cell
pub const CELL_HEIGHT: u16 = 1;

/// Largest accepted cell side, in terminal columns or rows.
pub const MAX_CELL_SIDE: u16 = 8;

/// Minimum redraw interval for a static (game over) frame
pub const GAME_OVER_REDRAW_MS: u64 = 250;

/// Snake layout on start and after every reset, head first.
pub const START_SEGMENTS: [Point; 3] = [Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];

/// Heading on start and after every reset.
pub const START_DIRECTION: Direction = Direction::Right;

/// A grid cell coordinate.
///
/// Signed so that a head stepped past the left or top edge is representable
/// before the bounds check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Playfield dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check whether `p` lies on the grid.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u16) < self.width && (p.y as u16) < self.height
    }

    pub fn cell_count(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The reverse heading (Left/Right, Up/Down)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Cell offset `(dx, dy)` for one step.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Request a new heading (ignored if it reverses the current one)
    Turn(Direction),
    /// Start a new game (honoured only after game over)
    Restart,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The head left the grid.
    OutOfBounds,
    /// The head ran into the body.
    SelfCollision,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::OutOfBounds => "out_of_bounds",
            GameOverCause::SelfCollision => "self_collision",
        }
    }
}

/// Core-side event emitted by the most recent tick.
///
/// Consumed by the host loop (for logging); never affects simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    AteFood { score: u32 },
    GameOver { cause: GameOverCause, score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_layout_fits_the_minimum_grid() {
        let grid = GridSize::new(MIN_GRID_SIDE, MIN_GRID_SIDE);
        for p in START_SEGMENTS {
            assert!(grid.contains(p), "{:?} outside minimum grid", p);
        }
    }

    #[test]
    fn start_layout_is_contiguous_and_trails_heading() {
        for pair in START_SEGMENTS.windows(2) {
            assert_eq!(pair[1].step(START_DIRECTION), pair[0]);
        }
    }

    #[test]
    fn directions_pair_with_their_opposite() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn game_over_causes_have_distinct_log_labels() {
        assert_eq!(GameOverCause::OutOfBounds.as_str(), "out_of_bounds");
        assert_eq!(GameOverCause::SelfCollision.as_str(), "self_collision");
    }

    #[test]
    fn grid_contains_edges_only() {
        let grid = GridSize::new(25, 25);
        assert!(grid.contains(Point::new(0, 0)));
        assert!(grid.contains(Point::new(24, 24)));
        assert!(!grid.contains(Point::new(25, 0)));
        assert!(!grid.contains(Point::new(0, 25)));
        assert!(!grid.contains(Point::new(0, -1)));
        assert_eq!(grid.cell_count(), 625);
    }
}
