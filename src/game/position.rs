use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
///
/// Coordinates are signed so a head that has just left the board (`x == -1`)
/// can still be represented and detected as an edge collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies inside a `width` x `height` grid
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

/// Occupancy test: true iff `target` equals some cell of `cells`
pub fn is_occupied<'a, I>(target: Position, cells: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    cells.into_iter().any(|cell| *cell == target)
}
