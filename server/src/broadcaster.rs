use std::sync::{Arc, Mutex};

use common::engine::session::GameBroadcaster;
use common::games::snake::GameSnapshot;
use common::log;

/// Text front end for a headless session. Logs score and status changes and,
/// when enabled, prints the board each time the snake moves.
#[derive(Clone)]
pub struct TerminalBroadcaster {
    ascii: bool,
    last_frame: Arc<Mutex<Option<GameSnapshot>>>,
}

impl TerminalBroadcaster {
    pub fn new(ascii: bool) -> Self {
        Self {
            ascii,
            last_frame: Arc::new(Mutex::new(None)),
        }
    }

    fn report(&self, snapshot: GameSnapshot) {
        let Ok(mut last_frame) = self.last_frame.lock() else {
            return;
        };

        if last_frame.as_ref() == Some(&snapshot) {
            return;
        }

        let previous_score = last_frame.as_ref().map(|s| s.score);
        let was_running = last_frame.as_ref().is_none_or(|s| s.running);

        if previous_score.is_some_and(|score| score != snapshot.score) {
            log!("Score: {}", snapshot.score);
        }
        if !was_running && snapshot.running {
            log!("New game started");
        }

        if self.ascii {
            println!("{}", render_frame(&snapshot));
        }

        *last_frame = Some(snapshot);
    }
}

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        self.report(snapshot);
    }

    async fn broadcast_game_over(&self, snapshot: GameSnapshot) {
        log!(
            "GAME OVER ({:?}), score {}. Type 'r' or 'space' to restart",
            snapshot.end_reason,
            snapshot.score
        );
        self.report(snapshot);
    }
}

/// Draws the field: `#` head, `o` body, `*` food, `.` empty.
pub fn render_frame(snapshot: &GameSnapshot) -> String {
    let width = snapshot.field_size.width;
    let height = snapshot.field_size.height;
    let mut cells = vec![vec!['.'; width]; height];

    if let Some(food) = snapshot.food {
        cells[food.y][food.x] = '*';
    }
    for (index, segment) in snapshot.snake.iter().enumerate() {
        cells[segment.y][segment.x] = if index == 0 { '#' } else { 'o' };
    }

    let mut frame = String::with_capacity((width + 1) * (height + 1));
    frame.push_str(&format!(
        "score {}{}\n",
        snapshot.score,
        if snapshot.running { "" } else { " - GAME OVER" }
    ));
    for row in cells {
        frame.extend(row);
        frame.push('\n');
    }
    frame
}
