//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer feeds it directional input and a clock, and reads back
//! cells to draw and sound cues to play.

pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod food;
pub mod position;
pub mod snake;
pub mod state;
pub mod ticker;

// Re-export commonly used types
pub use config::GameConfig;
pub use controller::{Game, SoundCue, StepInfo};
pub use direction::{Direction, DirectionalInput};
pub use error::{GameError, GameResult};
pub use food::{Food, RandomCellSource, SeededCells};
pub use position::{Position, is_occupied};
pub use snake::Snake;
pub use state::{CollisionType, GameState, Phase, RoundEnd};
pub use ticker::Ticker;
