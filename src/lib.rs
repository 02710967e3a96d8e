//! Retro Snake - the classic arcade Snake for the terminal
//!
//! This library provides:
//! - Core simulation (game module): snake, food, tick clock and the game controller
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Sound cues as terminal bells (audio module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
