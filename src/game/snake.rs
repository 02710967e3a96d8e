use std::collections::VecDeque;

use super::direction::Direction;
use super::position::{Position, is_occupied};

/// The snake in the game
///
/// Turns are latched: `set_direction` only records a turn, and the turn is
/// applied by the next `tick`. With a capacity of one the last accepted press
/// wins. Larger capacities queue quick presses for consecutive ticks. A turn
/// is rejected when it reverses the current direction or the turn it follows,
/// so a burst of key presses between two ticks can never fold the head back
/// onto the neck.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
    /// Direction of the last movement; `None` while halted after a reset
    heading: Option<Direction>,
    /// Turns waiting for the next ticks, oldest first
    turns: VecDeque<Direction>,
    turn_capacity: usize,
    grow_pending: bool,
    /// Layout restored by `reset`
    start_layout: Vec<Position>,
}

impl Snake {
    /// Create a snake in the given layout (head first), facing `heading`
    ///
    /// # Panics
    ///
    /// Panics if `layout` is empty.
    pub fn new(layout: Vec<Position>, heading: Option<Direction>, turn_capacity: usize) -> Self {
        assert!(!layout.is_empty(), "a snake needs at least one cell");

        Self {
            body: layout.iter().copied().collect(),
            heading,
            turns: VecDeque::with_capacity(turn_capacity.max(1)),
            turn_capacity: turn_capacity.max(1),
            grow_pending: false,
            start_layout: layout,
        }
    }

    /// Replace the body with arbitrary cells (head first), keeping the start layout
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn set_body<I>(&mut self, cells: I, heading: Option<Direction>)
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");

        self.body = body;
        self.heading = heading;
        self.turns.clear();
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        is_occupied(pos, self.body_segments())
    }

    /// True when the head shares a cell with another segment
    pub fn bites_itself(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Direction the snake travelled on its last move
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Direction the snake will travel once every queued turn is applied
    pub fn direction(&self) -> Option<Direction> {
        self.turns.back().copied().or(self.heading)
    }

    /// Latch a turn for the next tick
    ///
    /// Returns false, leaving the snake untouched, when the turn is the
    /// reverse of `direction()` or of the turn it would follow. When the queue
    /// is full the newest turn replaces the last queued one. Pressing the
    /// direction already in effect is accepted but queues nothing.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self
            .direction()
            .is_some_and(|current| current.is_opposite(direction))
        {
            return false;
        }

        let full = self.turns.len() >= self.turn_capacity;
        // The turn this one follows: the last queued turn that will survive it
        let previous = if full {
            self.turns.len().checked_sub(2).map(|i| self.turns[i])
        } else {
            self.turns.back().copied()
        };
        let anchor = previous.or(self.heading);

        if anchor.is_some_and(|current| current.is_opposite(direction)) {
            return false;
        }

        if full {
            self.turns.pop_back();
        }
        if anchor != Some(direction) {
            self.turns.push_back(direction);
        }
        true
    }

    /// Grow by one segment on the next tick
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    /// Advance one cell
    ///
    /// Applies the oldest queued turn, pushes the new head and drops the tail
    /// unless growth is pending. No bounds checking happens here. A halted
    /// snake does not move.
    pub fn tick(&mut self) {
        if let Some(turn) = self.turns.pop_front() {
            self.heading = Some(turn);
        }

        let Some(direction) = self.heading else {
            return;
        };

        let new_head = self.head().moved_in_direction(direction);
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Restore the starting layout and wait for input
    pub fn reset(&mut self) {
        self.body = self.start_layout.iter().copied().collect();
        self.heading = None;
        self.turns.clear();
        self.grow_pending = false;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least one cell
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
