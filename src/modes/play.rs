use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{Command, GameConfig, GameEngine, Snapshot, Status, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive terminal driver around a [`GameEngine`]
pub struct PlayMode {
    engine: GameEngine,
    state: Snapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let state = engine.current_state();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
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

        self.cleanup_terminal(&mut terminal)?;

        info!(
            "session over: {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_period = self.state.tick_duration();
        let mut tick_timer = new_tick_timer(tick_period);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // The engine speeds up on food and resets on restart; follow it
            let wanted = self.state.tick_duration();
            if wanted != tick_period {
                debug!("re-arming tick timer: {:?} -> {:?}", tick_period, wanted);
                tick_period = wanted;
                tick_timer = new_tick_timer(tick_period);
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
                KeyAction::Game(command) => self.apply(command),
                KeyAction::Acknowledge => {
                    if self.state.game_over {
                        self.apply(Command::Restart);
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let before = self.state.status();
        let abandoned_score = self.state.score;
        self.state = self.engine.apply(command);

        match (command, before, self.state.status()) {
            (Command::Restart, Status::GameOver, _) => self.metrics.on_game_start(),
            (Command::Restart, _, _) => {
                // A game cut short still counts towards the session
                self.metrics.on_game_over(abandoned_score);
                self.metrics.on_game_start();
            }
            (Command::TogglePause, Status::Running, Status::Paused) => self.metrics.on_pause(),
            (Command::TogglePause, Status::Paused, Status::Running) => self.metrics.on_resume(),
            _ => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step();
        self.state = result.snapshot;

        if let TickOutcome::Collided(_) = result.outcome {
            self.metrics.on_game_over(self.state.score);
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

/// Timer whose first tick fires one full period from now
fn new_tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::seeded(1));
        assert!(mode.state.running);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.tick_interval_ms, 200);
    }

    #[test]
    fn test_direction_key_reaches_next_tick() {
        let mut mode = PlayMode::new(GameConfig::seeded(1));

        mode.handle_event(key(KeyCode::Up));
        mode.update_game();

        assert_eq!(mode.state.direction, Direction::Up);
        assert_eq!(mode.state.head(), crate::game::Position::new(10, 9));
    }

    #[test]
    fn test_pause_key_stops_ticks() {
        let mut mode = PlayMode::new(GameConfig::seeded(1));

        mode.handle_event(key(KeyCode::Char(' ')));
        let paused = mode.state.clone();
        assert!(!paused.running);

        mode.update_game();
        assert_eq!(mode.state, paused);
    }

    #[test]
    fn test_acknowledge_only_restarts_finished_games() {
        let mut mode = PlayMode::new(GameConfig::seeded(1));
        mode.update_game();
        let moved = mode.state.clone();

        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.state, moved);

        while !mode.state.game_over {
            mode.update_game();
        }
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Enter));
        assert!(mode.state.running);
        assert!(!mode.state.game_over);
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_restart_mid_game_counts_abandoned_game() {
        let mut mode = PlayMode::new(GameConfig::seeded(1));
        mode.update_game();

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.metrics.games_played, 1);
        assert!(mode.state.running);

        // Restarting a finished game must not count it twice
        while !mode.state.game_over {
            mode.update_game();
        }
        assert_eq!(mode.metrics.games_played, 2);
        let best = mode.metrics.high_score;
        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.metrics.games_played, 2);
        assert_eq!(mode.metrics.high_score, best);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = PlayMode::new(GameConfig::seeded(1));
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
