//! RNG module - deterministic food placement
//!
//! Food cells are drawn uniformly from the whole grid. Occupancy is not
//! consulted, so a fresh food cell can land under the snake.
//!
//! A small LCG keeps games reproducible from a seed, which the tests and
//! benches rely on.

use crate::types::{GridSize, Point};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with
    /// a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }
}

/// Draws food cells for one grid.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    grid: GridSize,
    rng: SimpleRng,
    seed: u32,
}

impl FoodSpawner {
    pub fn new(grid: GridSize, seed: u32) -> Self {
        Self {
            grid,
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Pick a cell uniformly from the full grid.
    pub fn spawn(&mut self) -> Point {
        let idx = self.rng.next_range(self.grid.cell_count());
        let w = self.grid.width as u32;
        Point::new((idx % w) as i16, (idx / w) as i16)
    }

    /// Seed this spawner was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_below_max() {
        let mut rng = SimpleRng::new(7);
        for max in [1u32, 2, 25, 625, 1_000_000] {
            for _ in 0..1000 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_spawn_stays_on_grid() {
        let grid = GridSize::new(7, 11);
        let mut spawner = FoodSpawner::new(grid, 99);
        for _ in 0..5000 {
            let p = spawner.spawn();
            assert!(grid.contains(p), "{:?} off grid", p);
        }
    }

    #[test]
    fn test_spawn_reaches_every_cell() {
        let grid = GridSize::new(25, 25);
        let mut spawner = FoodSpawner::new(grid, 12345);
        let mut seen = vec![false; grid.cell_count() as usize];
        for _ in 0..50_000 {
            let p = spawner.spawn();
            seen[(p.y as usize) * 25 + (p.x as usize)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some cells never drawn");
    }

    #[test]
    fn test_spawner_sequence_depends_only_on_seed() {
        let grid = GridSize::default();
        let mut a = FoodSpawner::new(grid, 42);
        let mut b = FoodSpawner::new(grid, 42);
        for _ in 0..50 {
            assert_eq!(a.spawn(), b.spawn());
        }
        assert_eq!(a.seed(), 42);
    }
}
