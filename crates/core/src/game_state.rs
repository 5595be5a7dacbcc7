//! Game state module - manages the complete game state
//!
//! This module ties together the snake, food placement and scoring, and owns
//! the `Running -> GameOver -> (reset) -> Running` lifecycle.

use log::{debug, info};

use crate::snapshot::GameSnapshot;
use crate::{FoodSpawner, Snake};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Point,
    food_spawner: FoodSpawner,
    direction: Direction,
    score: u32,
    /// Highest score reached this session (kept across resets).
    best_score: u32,
    running: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Successful moves in the current episode.
    ticks: u32,
    /// Last tick outcome (consumed by observers).
    last_event: Option<TickEvent>,
}

impl GameState {
    /// Create a running game on `grid` with the start layout.
    pub fn new(grid: GridSize, seed: u32) -> Self {
        let mut food_spawner = FoodSpawner::new(grid, seed);
        let food = food_spawner.spawn();

        Self {
            snake: Snake::start(),
            food,
            food_spawner,
            direction: START_DIRECTION,
            score: 0,
            best_score: 0,
            running: true,
            episode_id: 0,
            ticks: 0,
            last_event: None,
        }
    }

    /// Create a running game with an explicit layout.
    ///
    /// `segments` is ordered head to tail. Later food is still drawn from
    /// `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_layout(
        grid: GridSize,
        seed: u32,
        segments: &[Point],
        direction: Direction,
        food: Point,
    ) -> Self {
        Self {
            snake: Snake::from_segments(segments),
            food,
            food_spawner: FoodSpawner::new(grid, seed),
            direction,
            score: 0,
            best_score: 0,
            running: true,
            episode_id: 0,
            ticks: 0,
            last_event: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        !self.running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Segments head first.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.snake.segments()
    }

    pub fn grid(&self) -> GridSize {
        self.food_spawner.grid()
    }

    pub fn seed(&self) -> u32 {
        self.food_spawner.seed()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid();
        self.snake.write_segments(&mut out.segments);
        out.food = self.food;
        out.direction = self.direction;
        out.running = self.running;
        out.score = self.score;
        out.best_score = self.best_score;
        out.episode_id = self.episode_id;
        out.ticks = self.ticks;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the simulation by one step.
    ///
    /// Ends the episode when the new head leaves the grid or lands on any
    /// current segment (the tail counts even though it would move away).
    /// No-op after game over.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        let new_head = self.snake.head().step(self.direction);

        let cause = if !self.grid().contains(new_head) {
            Some(GameOverCause::OutOfBounds)
        } else if self.snake.occupies(new_head) {
            Some(GameOverCause::SelfCollision)
        } else {
            None
        };

        if let Some(cause) = cause {
            self.running = false;
            self.last_event = Some(TickEvent::GameOver {
                cause,
                score: self.score,
            });
            info!(
                "game over: {} at ({}, {}), episode {} score {}",
                cause.as_str(),
                new_head.x,
                new_head.y,
                self.episode_id,
                self.score
            );
            return;
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);
        self.ticks = self.ticks.wrapping_add(1);

        if ate {
            self.score += 1;
            self.best_score = self.best_score.max(self.score);
            self.food = self.food_spawner.spawn();
            self.last_event = Some(TickEvent::AteFood { score: self.score });
            debug!(
                "ate food, score {} length {} next food ({}, {})",
                self.score,
                self.snake.len(),
                self.food.x,
                self.food.y
            );
        } else {
            self.last_event = Some(TickEvent::Moved);
        }
    }

    /// Request a new heading.
    ///
    /// Reversals are ignored silently, as is any request after game over.
    /// Returns whether the heading changed.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !self.running || requested == self.direction.opposite() {
            return false;
        }
        let changed = requested != self.direction;
        self.direction = requested;
        changed
    }

    /// Start a new episode with the start layout.
    ///
    /// Valid from any state. The food RNG continues its sequence, and the
    /// best score is kept.
    pub fn reset(&mut self) {
        self.snake = Snake::start();
        self.food = self.food_spawner.spawn();
        self.direction = START_DIRECTION;
        self.score = 0;
        self.running = true;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.ticks = 0;
        self.last_event = None;
        info!("reset: episode {}", self.episode_id);
    }

    pub fn take_last_event(&mut self) -> Option<TickEvent> {
        self.last_event.take()
    }

    /// Apply a game action
    ///
    /// `Restart` is honoured only after game over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Turn(direction) => self.set_direction(direction),
            GameAction::Restart => {
                if self.running {
                    return false;
                }
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GridSize::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(segments: &[(i16, i16)]) -> Vec<Point> {
        segments.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn game(segments: &[(i16, i16)], direction: Direction, food: (i16, i16)) -> GameState {
        GameState::from_layout(
            GridSize::new(25, 25),
            12345,
            &layout(segments),
            direction,
            Point::new(food.0, food.1),
        )
    }

    #[test]
    fn test_new_game_starts_running_with_start_layout() {
        let state = GameState::new(GridSize::default(), 12345);
        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.segments().collect::<Vec<_>>(), START_SEGMENTS.to_vec());
        assert!(state.grid().contains(state.food()));
    }

    #[test]
    fn test_tick_moves_without_growing() {
        let mut state = game(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (20, 20));
        state.tick();

        assert_eq!(
            state.segments().collect::<Vec<_>>(),
            layout(&[(6, 5), (5, 5), (4, 5)])
        );
        assert_eq!(state.score(), 0);
        assert!(state.is_running());
        assert_eq!(state.ticks(), 1);
        assert_eq!(state.take_last_event(), Some(TickEvent::Moved));
    }

    #[test]
    fn test_tick_onto_food_grows_and_scores() {
        let mut state = game(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        state.tick();

        assert_eq!(
            state.segments().collect::<Vec<_>>(),
            layout(&[(6, 5), (5, 5), (4, 5), (3, 5)])
        );
        assert_eq!(state.score(), 1);
        assert_eq!(state.best_score(), 1);
        assert_eq!(state.take_last_event(), Some(TickEvent::AteFood { score: 1 }));
        assert!(state.grid().contains(state.food()));
    }

    #[test]
    fn test_tick_out_of_bounds_ends_game_without_moving() {
        let mut state = game(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (20, 20));
        state.tick();

        assert!(!state.is_running());
        assert_eq!(
            state.segments().collect::<Vec<_>>(),
            layout(&[(0, 5), (1, 5), (2, 5)])
        );
        assert_eq!(
            state.take_last_event(),
            Some(TickEvent::GameOver {
                cause: GameOverCause::OutOfBounds,
                score: 0
            })
        );
    }

    #[test]
    fn test_tick_out_of_bounds_on_each_edge() {
        let cases = [
            (&[(24, 5), (23, 5), (22, 5)][..], Direction::Right),
            (&[(5, 0), (5, 1), (5, 2)][..], Direction::Up),
            (&[(5, 24), (5, 23), (5, 22)][..], Direction::Down),
        ];
        for (segments, direction) in cases {
            let mut state = game(segments, direction, (12, 12));
            state.tick();
            assert!(state.game_over(), "{:?} should leave the grid", direction);
        }
    }

    #[test]
    fn test_tick_into_body_ends_game() {
        // Head at (5,5) heading down into (5,6), which is part of the body.
        let mut state = game(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Down,
            (20, 20),
        );
        state.tick();

        assert!(state.game_over());
        assert_eq!(state.snake().len(), 5);
        assert_eq!(
            state.take_last_event(),
            Some(TickEvent::GameOver {
                cause: GameOverCause::SelfCollision,
                score: 0
            })
        );
    }

    #[test]
    fn test_tick_into_current_tail_ends_game() {
        // A 2x2 loop: the head would step onto the tail cell before it moves away.
        let mut state = game(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down, (20, 20));
        state.tick();
        assert!(state.game_over());
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut state = game(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (20, 20));
        state.tick();
        let _ = state.take_last_event();
        let before = state.snapshot();

        state.tick();
        state.tick();

        assert_eq!(state.snapshot(), before);
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_set_direction_rejects_reversal() {
        let mut state = GameState::default();
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);

        assert!(state.set_direction(Direction::Up));
        assert!(!state.set_direction(Direction::Down));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_set_direction_same_heading_reports_unchanged() {
        let mut state = GameState::default();
        assert!(!state.set_direction(Direction::Right));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_set_direction_ignored_after_game_over() {
        let mut state = game(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (20, 20));
        state.tick();
        assert!(!state.set_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Left);
    }

    #[test]
    fn test_reset_restores_start_from_game_over() {
        let mut state = game(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        state.tick();
        state.set_direction(Direction::Up);
        for _ in 0..10 {
            state.tick();
        }
        assert!(state.game_over());

        state.reset();
        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 1);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.segments().collect::<Vec<_>>(), START_SEGMENTS.to_vec());
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_reset_while_running() {
        let mut state = GameState::default();
        state.set_direction(Direction::Down);
        state.tick();
        state.reset();
        assert!(state.is_running());
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.segments().collect::<Vec<_>>(), START_SEGMENTS.to_vec());
    }

    #[test]
    fn test_restart_action_only_after_game_over() {
        let mut state = GameState::default();
        state.tick();
        assert!(!state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.ticks(), 1);

        let mut over = game(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (20, 20));
        over.tick();
        assert!(over.apply_action(GameAction::Restart));
        assert!(over.is_running());
        assert_eq!(over.episode_id(), 1);
    }

    #[test]
    fn test_turn_action_routes_to_set_direction() {
        let mut state = GameState::default();
        assert!(state.apply_action(GameAction::Turn(Direction::Down)));
        assert_eq!(state.direction(), Direction::Down);
        assert!(!state.apply_action(GameAction::Turn(Direction::Up)));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = game(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (6, 5));
        state.tick();
        let snap = state.snapshot();

        assert_eq!(snap.segments, layout(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(snap.head(), Some(Point::new(6, 5)));
        assert_eq!(snap.food, state.food());
        assert_eq!(snap.score, 1);
        assert!(snap.running);
        assert_eq!(snap.grid, GridSize::new(25, 25));
    }

    #[test]
    fn test_same_seed_same_food_sequence() {
        let mut a = GameState::new(GridSize::default(), 777);
        let mut b = GameState::new(GridSize::default(), 777);
        assert_eq!(a.food(), b.food());
        for _ in 0..5 {
            a.reset();
            b.reset();
            assert_eq!(a.food(), b.food());
        }
    }

    #[test]
    #[should_panic(expected = "snake needs at least a head")]
    fn test_from_layout_without_segments_panics_up_front() {
        let _ = GameState::from_layout(
            GridSize::new(25, 25),
            1,
            &[],
            Direction::Right,
            Point::new(0, 0),
        );
    }
}
