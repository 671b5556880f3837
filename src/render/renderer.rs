use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GRID_SIZE, Position, Snapshot, Status};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.status() {
            Status::GameOver => frame.render_widget(self.render_game_over(state, metrics), game_area),
            status => frame.render_widget(self.render_grid(state, status), game_area),
        }

        frame.render_widget(self.render_controls(state.status()), chunks[2]);
    }

    fn render_grid(&self, state: &Snapshot, status: Status) -> Paragraph<'_> {
        let head = state.head();
        let mut lines = Vec::with_capacity(GRID_SIZE as usize);

        for y in 0..GRID_SIZE {
            let spans: Vec<Span> = (0..GRID_SIZE)
                .map(|x| Self::cell(state, head, Position::new(x, y)))
                .collect();
            lines.push(Line::from(spans));
        }

        let (title, border) = match status {
            Status::Paused => (" Snake - PAUSED ", Color::Yellow),
            _ => (" Snake ", Color::White),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn cell(state: &Snapshot, head: Position, pos: Position) -> Span<'static> {
        if pos == head {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.contains(pos) {
            Span::styled("□ ", Style::default().fg(Color::Green))
        } else if pos == state.food {
            Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_stats(&self, state: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.tick_interval_ms), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled("GAME OVER", bold(Color::Red))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.score.to_string(), bold(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("Enter", bold(Color::Green)),
                Span::styled(" or ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: Status) -> Paragraph<'_> {
        let pause_hint = if status == Status::Paused {
            " to resume | "
        } else {
            " to pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw("/"),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &Snapshot) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_board_and_score() {
        let engine = GameEngine::new(GameConfig::seeded(4));
        let screen = draw(&engine.current_state());

        assert!(screen.contains("Score: "));
        assert!(screen.contains("200ms"));
        assert!(screen.contains("■"));
        assert!(screen.contains("O"));
    }

    #[test]
    fn test_renders_pause_banner() {
        let mut engine = GameEngine::new(GameConfig::seeded(4));
        let screen = draw(&engine.toggle_pause());

        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("resume"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut engine = GameEngine::new(GameConfig::seeded(4));
        let mut state = engine.current_state();
        // Heading right from (10,10) reaches the wall within 10 ticks
        for _ in 0..12 {
            state = engine.tick();
        }
        assert!(state.game_over);

        let screen = draw(&state);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score"));
        assert!(screen.contains("Enter"));
    }

    #[test]
    fn test_controls_list_every_key() {
        let engine = GameEngine::new(GameConfig::seeded(4));
        let screen = draw(&engine.current_state());

        assert!(screen.contains("Space/P to pause"));
        assert!(screen.contains("R to restart"));
        assert!(screen.contains("Q to quit"));
    }
}
