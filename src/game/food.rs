use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use super::error::{GameError, GameResult};
use super::position::{Position, is_occupied};

/// Source of random cells for food placement
pub trait RandomCellSource {
    /// A uniformly random cell of a `width` x `height` grid
    fn random_cell(&mut self, width: usize, height: usize) -> Position;

    /// A uniformly random index in `0..len`; `len` is never zero
    fn random_index(&mut self, len: usize) -> usize;
}

/// ChaCha-backed cell source, reproducible when built from a seed
#[derive(Debug, Clone)]
pub struct SeededCells {
    rng: ChaCha8Rng,
}

impl SeededCells {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomCellSource for SeededCells {
    fn random_cell(&mut self, width: usize, height: usize) -> Position {
        let x = self.rng.gen_range(0..width) as i32;
        let y = self.rng.gen_range(0..height) as i32;
        Position::new(x, y)
    }

    fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// The food pellet
pub struct Food {
    position: Position,
    grid_width: usize,
    grid_height: usize,
    max_attempts: usize,
    source: Box<dyn RandomCellSource>,
}

impl Food {
    /// Place the first pellet away from `occupied`
    pub fn new<'a, C>(
        grid_width: usize,
        grid_height: usize,
        max_attempts: usize,
        source: Box<dyn RandomCellSource>,
        occupied: C,
    ) -> GameResult<Self>
    where
        C: IntoIterator<Item = &'a Position> + Copy,
    {
        let mut food = Self {
            position: Position::new(0, 0),
            grid_width,
            grid_height,
            max_attempts,
            source,
        };
        food.relocate(occupied)?;
        Ok(food)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Put the pellet on a specific cell, bypassing placement rules
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Move the pellet to a random cell not in `occupied`
    ///
    /// Samples random cells up to the configured number of attempts, then
    /// picks uniformly among the remaining free cells. Fails with
    /// [`GameError::BoardFull`] when `occupied` covers the whole board.
    pub fn relocate<'a, C>(&mut self, occupied: C) -> GameResult<Position>
    where
        C: IntoIterator<Item = &'a Position> + Copy,
    {
        let covered: HashSet<Position> = occupied
            .into_iter()
            .filter(|cell| cell.is_within(self.grid_width, self.grid_height))
            .copied()
            .collect();
        if covered.len() >= self.grid_width * self.grid_height {
            return Err(GameError::BoardFull {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for _ in 0..self.max_attempts {
            let candidate = self.source.random_cell(self.grid_width, self.grid_height);
            if !is_occupied(candidate, occupied) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        warn!(
            "no free cell after {} random samples, scanning the board",
            self.max_attempts
        );

        let free: Vec<Position> = (0..self.grid_height as i32)
            .flat_map(|y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|cell| !covered.contains(cell))
            .collect();
        let pick = self.source.random_index(free.len()) % free.len();
        self.position = free[pick];
        Ok(self.position)
    }
}

impl std::fmt::Debug for Food {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Food")
            .field("position", &self.position)
            .field("grid_width", &self.grid_width)
            .field("grid_height", &self.grid_height)
            .finish_non_exhaustive()
    }
}
