//! Snake body: an ordered run of cells, head first.

use std::collections::VecDeque;

use crate::types::{Point, START_SEGMENTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// Build a snake from cells ordered head to tail.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments(segments: &[Point]) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head");
        Self {
            body: segments.iter().copied().collect(),
        }
    }

    /// The three-segment start layout.
    pub fn start() -> Self {
        Self::from_segments(&START_SEGMENTS)
    }

    pub fn head(&self) -> Point {
        // Never empty: constructed non-empty and `advance` adds before it removes.
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check whether any segment (tail included) sits on `p`.
    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// Push `new_head`; drop the tail unless the snake is growing.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Copy segments into `out`, head first, reusing its allocation.
    pub fn write_segments(&self, out: &mut Vec<Point>) {
        out.clear();
        out.extend(self.body.iter().copied());
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::start()
    }
}
