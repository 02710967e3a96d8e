use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::audio::CuePlayer;
use crate::game::{DirectionalInput, Game, GameConfig, RoundEnd, StepInfo};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Frames per second of the draw/input loop; ticks are timed separately
const FRAME_RATE: u64 = 60;

pub struct HumanMode {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    cues: Box<dyn CuePlayer>,
    sound_on: bool,
    should_quit: bool,
    /// Keys pressed since the last frame
    frame_input: DirectionalInput,
    clock: Instant,
}

impl HumanMode {
    pub fn new(config: GameConfig, cues: Box<dyn CuePlayer>) -> Result<Self> {
        let game = Game::new(config).context("Failed to set up the board")?;

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            cues,
            sound_on: true,
            should_quit: false,
            frame_input: DirectionalInput::default(),
            clock: Instant::now(),
        })
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(Duration::from_millis(1000 / FRAME_RATE));
        self.clock = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Input, simulation and drawing
                _ = frame_timer.tick() => {
                    self.on_frame();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics, self.sound_on);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.frame_input.press(direction),
                KeyAction::ToggleSound => {
                    self.sound_on = !self.sound_on;
                    info!("sound {}", if self.sound_on { "on" } else { "off" });
                }
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// One frame: apply buffered input, then let the tick clock decide whether to step
    fn on_frame(&mut self) {
        let input = std::mem::take(&mut self.frame_input);
        let was_running = self.game.is_running();
        if self.game.handle_input(input) && !was_running {
            self.metrics.on_round_start();
        }

        let now = self.clock.elapsed().as_secs_f64();
        if let Some(info) = self.game.update(now) {
            self.record_step(&info);
        }

        self.metrics.update();
    }

    fn record_step(&mut self, info: &StepInfo) {
        if self.sound_on {
            for cue in info.cues() {
                if let Err(err) = self.cues.play(cue) {
                    warn!("muting sound: {err:#}");
                    self.sound_on = false;
                    break;
                }
            }
        }

        match info.round_end {
            Some(RoundEnd::BoardCleared) => {
                self.metrics.on_food_eaten(self.game.config().cell_count());
            }
            Some(_) => {}
            None if info.ate_food => {
                // Growth lands on the next tick
                self.metrics.on_food_eaten(self.game.snake().len() + 1);
            }
            None => {}
        }

        if let Some(end) = info.round_end {
            self.metrics.on_round_end(end, self.game.state().last_score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Muted;
    use crate::game::{Direction, Phase, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        let config = GameConfig {
            seed: Some(4),
            ..Default::default()
        };
        let mut mode = HumanMode::new(config, Box::new(Muted)).unwrap();
        mode.game.food_mut().set_position(Position::new(39, 29));
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.game.phase(), Phase::Halted);
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.metrics.is_round_active());
    }

    #[test]
    fn test_key_press_starts_round_on_next_frame() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.game.phase(), Phase::Halted);

        mode.on_frame();
        assert_eq!(mode.game.phase(), Phase::Running);
        assert_eq!(mode.game.snake().direction(), Some(Direction::Up));
        assert!(mode.metrics.is_round_active());
        assert!(mode.frame_input.is_empty());
    }

    #[test]
    fn test_quit_and_sound_keys() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('m')));
        assert!(!mode.sound_on);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_round_end_updates_metrics() {
        let mut mode = mode();
        mode.game.turn(Direction::Right);
        mode.metrics.on_round_start();
        mode.game.food_mut().set_position(Position::new(10, 10));

        let info = mode.game.step();
        mode.record_step(&info);
        assert_eq!(mode.metrics.food_eaten, 1);
        assert_eq!(mode.metrics.longest_snake, 4);

        mode.game.food_mut().set_position(Position::new(39, 29));
        mode.game.turn(Direction::Up);
        let mut ended = None;
        for _ in 0..11 {
            let info = mode.game.step();
            mode.record_step(&info);
            if info.round_end.is_some() {
                ended = info.round_end;
                break;
            }
        }

        assert!(ended.is_some());
        assert_eq!(mode.metrics.rounds_played, 1);
        assert_eq!(mode.metrics.high_score, 1);
        assert!(!mode.metrics.is_round_active());
    }
}
