use super::ticker::Ticker;

/// Whether the simulation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first directional input (start of session, after a round ends)
    #[default]
    Halted,
    Running,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Collision(CollisionType),
    /// The snake filled the board, leaving nowhere to put food
    BoardCleared,
}

/// Round bookkeeping owned by the game controller
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    /// Tick clock; its interval shrinks as food is eaten
    pub ticker: Ticker,
    /// Outcome of the previous round, if one has finished
    pub last_round: Option<RoundEnd>,
    /// Final score of the previous round
    pub last_score: u32,
}

impl GameState {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            phase: Phase::Halted,
            score: 0,
            ticker,
            last_round: None,
            last_score: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
