use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, Game, Position, RoundEnd};
use crate::metrics::GameMetrics;

const FIELD_GREEN: Color = Color::Rgb(125, 183, 59);
const DARK_GREEN: Color = Color::Rgb(0, 117, 44);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game, metrics: &GameMetrics, sound_on: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title and score
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Round status
                Constraint::Length(1), // Session stats
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(game), chunks[0]);
        frame.render_widget(self.render_board(game), chunks[1]);
        frame.render_widget(self.render_status(game), chunks[2]);
        frame.render_widget(self.render_stats(metrics), chunks[3]);
        frame.render_widget(self.render_controls(sound_on), chunks[4]);
    }

    fn render_header(&self, game: &Game) -> Paragraph<'_> {
        let bold = Style::default().fg(DARK_GREEN).add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(vec![
            Span::styled("RETRO SNAKE", bold),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(game.score().to_string(), bold),
        ]))
        .alignment(Alignment::Center)
    }

    /// Grid of two-column cells: snake segments, the food and empty field
    pub fn board_lines(game: &Game) -> Vec<Line<'static>> {
        let config = game.config();
        let head = game.snake().head();
        let field = Style::default().bg(FIELD_GREEN);

        (0..config.grid_height as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..config.grid_width as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled("◉ ", field.fg(Color::Black).add_modifier(Modifier::BOLD))
                        } else if game.snake_cells().contains(&pos) {
                            Span::styled("● ", field.fg(Color::Black))
                        } else if pos == game.food() {
                            Span::styled("◆ ", field.fg(Color::Red).add_modifier(Modifier::BOLD))
                        } else {
                            Span::styled("  ", field)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_board(&self, game: &Game) -> Paragraph<'_> {
        Paragraph::new(Self::board_lines(game))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(DARK_GREEN)),
            )
            .alignment(Alignment::Center)
    }

    fn render_status(&self, game: &Game) -> Paragraph<'_> {
        let line = if game.is_running() {
            Line::from(Span::styled(
                format!("Speed: {:.0} ms/tick", game.interval() * 1000.0),
                Style::default().fg(Color::Gray),
            ))
        } else {
            let state = game.state();
            let outcome = match state.last_round {
                None => Span::styled("Ready", Style::default().fg(Color::Green)),
                Some(RoundEnd::BoardCleared) => Span::styled(
                    format!("BOARD CLEARED! Final score {}", state.last_score),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Some(RoundEnd::Collision(kind)) => {
                    let what = match kind {
                        CollisionType::Wall => "hit the wall",
                        CollisionType::SelfCollision => "bit itself",
                    };
                    Span::styled(
                        format!("GAME OVER: the snake {}. Final score {}", what, state.last_score),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                }
            };
            Line::from(vec![
                outcome,
                Span::styled(
                    "  Press an arrow key to start",
                    Style::default().fg(Color::Gray),
                ),
            ])
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_stats(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        Paragraph::new(Line::from(vec![
            Span::styled("High: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Rounds: ", label),
            Span::styled(metrics.rounds_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Longest: ", label),
            Span::styled(metrics.longest_snake.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]))
        .alignment(Alignment::Center)
    }

    fn render_controls(&self, sound_on: bool) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(if sound_on { " sound on | " } else { " sound off | " }),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
