use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval_at};

use crate::log;
use crate::games::SessionRng;
use crate::games::snake::{
    Autopilot, AutopilotKind, GameSnapshot, SnakeGameState, StepOutcome, TimingSettings,
};
use super::broadcaster::GameBroadcaster;
use super::clock::SessionClock;
use super::command::SessionCommand;

#[derive(Clone, Debug, Default)]
pub struct SnakeSessionConfig {
    pub timing: TimingSettings,
    pub autopilot: Option<AutopilotKind>,
    /// Start a new game on the tick after a game ends.
    pub auto_restart: bool,
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub games_played: u32,
    pub best_score: u32,
    pub ticks: u64,
    pub final_snapshot: GameSnapshot,
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives one game until `Shutdown` arrives or every command sender is
    /// dropped. The session task is the only writer of `game_state`.
    pub async fn run(
        config: SnakeSessionConfig,
        mut game_state: SnakeGameState,
        mut rng: SessionRng,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: impl GameBroadcaster,
    ) -> SessionSummary {
        let clock = SessionClock::start();
        let tick_interval_ms = config.timing.tick_interval_ms;

        let mut simulation_timer =
            interval_at(clock.origin(), Duration::from_millis(tick_interval_ms));
        let mut render_timer = interval_at(
            clock.origin(),
            Duration::from_secs_f64(config.timing.frame_interval_ms() / 1000.0),
        );
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut pending: Vec<SessionCommand> = Vec::new();
        let mut games_played = 0u32;
        let mut best_score = 0u32;
        let mut ticks = 0u64;

        log!(
            "Session started: {}x{} field, tick {}ms, render {}fps, seed {}",
            game_state.field_size().width,
            game_state.field_size().height,
            tick_interval_ms,
            config.timing.render_fps,
            rng.seed()
        );

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => break,
                    Some(command) => pending.push(command),
                },

                scheduled = simulation_timer.tick() => {
                    ticks += 1;

                    for command in pending.drain(..) {
                        Self::apply_command(&mut game_state, &mut rng, command);
                    }

                    if !game_state.is_running() && config.auto_restart {
                        game_state.reset(&mut rng);
                    }

                    if let Some(kind) = config.autopilot
                        && let Some(direction) = Autopilot::calculate_move(kind, &game_state, &mut rng)
                    {
                        game_state.set_direction(direction);
                    }

                    let now_ms = clock.at_ms(scheduled);
                    if let Some(StepOutcome::Ended(reason)) =
                        game_state.advance(now_ms, tick_interval_ms, &mut rng)
                    {
                        games_played += 1;
                        best_score = best_score.max(game_state.score());
                        log!(
                            "Game {} ended by {:?} with score {} (best {})",
                            games_played,
                            reason,
                            game_state.score(),
                            best_score
                        );
                        broadcaster.broadcast_game_over(game_state.snapshot()).await;
                    }
                }

                _ = render_timer.tick() => {
                    broadcaster.broadcast_state(game_state.snapshot()).await;
                }
            }
        }

        log!(
            "Session finished after {}ms and {} ticks, {} games, best score {}",
            clock.now_ms(),
            ticks,
            games_played,
            best_score
        );

        SessionSummary {
            games_played,
            best_score: best_score.max(game_state.score()),
            ticks,
            final_snapshot: game_state.snapshot(),
        }
    }

    fn apply_command(game_state: &mut SnakeGameState, rng: &mut SessionRng, command: SessionCommand) {
        match command {
            SessionCommand::Turn(direction) => {
                game_state.set_direction(direction);
            }
            SessionCommand::Restart => {
                game_state.reset(rng);
            }
            SessionCommand::Shutdown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::engine::session::WatchBroadcaster;
    use crate::games::snake::{Direction, GameEndReason, Point, SnakeSettings};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        frames: Arc<Mutex<Vec<GameSnapshot>>>,
        game_overs: Arc<Mutex<Vec<GameSnapshot>>>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: GameSnapshot) {
            self.frames.lock().unwrap().push(snapshot);
        }

        async fn broadcast_game_over(&self, snapshot: GameSnapshot) {
            self.game_overs.lock().unwrap().push(snapshot);
        }
    }

    fn fast_config() -> SnakeSessionConfig {
        SnakeSessionConfig {
            timing: TimingSettings {
                tick_interval_ms: 10,
                render_fps: 100,
            },
            ..SnakeSessionConfig::default()
        }
    }

    fn create_game(settings: SnakeSettings, seed: u64) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(seed);
        let state = SnakeGameState::new(settings, &mut rng).expect("valid settings");
        (state, rng)
    }

    fn edge_start_settings() -> SnakeSettings {
        SnakeSettings {
            field_width: 20,
            field_height: 20,
            start_head: Point::new(1, 10),
            ..SnakeSettings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_session() {
        let (state, rng) = create_game(SnakeSettings::default(), 1);
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = WatchBroadcaster::new();
        let mut frames = broadcaster.subscribe();

        let handle = tokio::spawn(SnakeSession::run(
            fast_config(),
            state,
            rng,
            rx,
            broadcaster.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(45)).await;
        tx.send(SessionCommand::Shutdown).unwrap();
        let summary = handle.await.unwrap();

        assert_eq!(summary.ticks, 5);
        assert!(summary.final_snapshot.running);
        assert_eq!(summary.final_snapshot.head(), Some(Point::new(9, 10)));
        assert!(frames.has_changed().unwrap());
        assert!(frames.borrow_and_update().is_some());
        assert!(broadcaster.latest().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_turn_applies_on_next_tick() {
        let (state, rng) = create_game(SnakeSettings::default(), 2);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::Turn(Direction::Down)).unwrap();

        let handle = tokio::spawn(SnakeSession::run(
            fast_config(),
            state,
            rng,
            rx,
            RecordingBroadcaster::default(),
        ));

        tokio::time::sleep(Duration::from_millis(45)).await;
        drop(tx);
        let summary = handle.await.unwrap();

        assert_eq!(summary.final_snapshot.head(), Some(Point::new(5, 14)));
        assert_eq!(summary.final_snapshot.direction, Direction::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_commands_apply_in_arrival_order() {
        // Left is a reversal while heading right, so only the later Down counts
        let (state, rng) = create_game(SnakeSettings::default(), 4);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::Turn(Direction::Left)).unwrap();
        tx.send(SessionCommand::Turn(Direction::Down)).unwrap();

        let handle = tokio::spawn(SnakeSession::run(
            fast_config(),
            state,
            rng,
            rx,
            RecordingBroadcaster::default(),
        ));

        tokio::time::sleep(Duration::from_millis(15)).await;
        drop(tx);
        let summary = handle.await.unwrap();

        assert!(summary.final_snapshot.running);
        assert_eq!(summary.final_snapshot.head(), Some(Point::new(5, 11)));

        // Down first makes the later Left legal, and it runs into the body
        let (state, rng) = create_game(SnakeSettings::default(), 4);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::Turn(Direction::Down)).unwrap();
        tx.send(SessionCommand::Turn(Direction::Left)).unwrap();

        let handle = tokio::spawn(SnakeSession::run(
            fast_config(),
            state,
            rng,
            rx,
            RecordingBroadcaster::default(),
        ));

        tokio::time::sleep(Duration::from_millis(15)).await;
        drop(tx);
        let summary = handle.await.unwrap();

        assert_eq!(summary.games_played, 1);
        assert!(!summary.final_snapshot.running);
        assert_eq!(
            summary.final_snapshot.end_reason,
            Some(GameEndReason::SelfCollision)
        );
        assert_eq!(summary.final_snapshot.head(), Some(Point::new(5, 10)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_game_over() {
        let (state, rng) = create_game(edge_start_settings(), 3);
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = RecordingBroadcaster::default();

        let handle = tokio::spawn(SnakeSession::run(
            fast_config(),
            state,
            rng,
            rx,
            broadcaster.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(300)).await;
        tx.send(SessionCommand::Restart).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(SessionCommand::Shutdown).unwrap();
        let summary = handle.await.unwrap();

        assert_eq!(summary.games_played, 1);
        assert!(summary.final_snapshot.running);

        let game_overs = broadcaster.game_overs.lock().unwrap();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].end_reason, Some(GameEndReason::WallCollision));

        let frames = broadcaster.frames.lock().unwrap();
        let first_over = frames
            .iter()
            .position(|s| !s.running)
            .expect("a game over frame was rendered");
        assert!(frames[first_over..].iter().any(|s| s.running));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_restart_starts_next_game() {
        let (state, rng) = create_game(edge_start_settings(), 5);
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = RecordingBroadcaster::default();
        let config = SnakeSessionConfig {
            auto_restart: true,
            ..fast_config()
        };

        let handle = tokio::spawn(SnakeSession::run(config, state, rng, rx, broadcaster.clone()));

        // the first game hits the right wall on the step at 190ms
        tokio::time::sleep(Duration::from_millis(255)).await;
        tx.send(SessionCommand::Shutdown).unwrap();
        let summary = handle.await.unwrap();

        assert_eq!(summary.games_played, 1);
        assert!(summary.final_snapshot.running);
        assert_eq!(summary.final_snapshot.head(), Some(Point::new(7, 10)));
        assert_eq!(broadcaster.game_overs.lock().unwrap().len(), 1);
    }
}
