use crate::{debug_log, log};
use crate::config::Validate;
use crate::games::SessionRng;
use super::settings::SnakeSettings;
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::types::{Direction, FieldSize, GameEndReason, GameStatus, Point, StepOutcome};

/// Single-player snake simulation. Owns all mutable game state; readers get
/// `GameSnapshot` copies.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSettings,
    field_size: FieldSize,
    snake: Snake,
    direction: Direction,
    food: Option<Point>,
    score: u32,
    status: GameStatus,
    last_move_ms: u64,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSettings, rng: &mut SessionRng) -> Result<Self, String> {
        settings.validate()?;

        let mut state = Self {
            field_size: settings.field_size(),
            snake: Snake::new(
                settings.start_head,
                settings.start_direction,
                settings.start_length,
            ),
            direction: settings.start_direction,
            food: None,
            score: 0,
            status: GameStatus::Running,
            last_move_ms: 0,
            settings,
        };
        state.spawn_food(rng);
        Ok(state)
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn last_move_ms(&self) -> u64 {
        self.last_move_ms
    }

    /// Commits `direction` for the next step. Reversals onto the body and
    /// any change after game over are dropped; returns whether it was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() || direction.is_opposite(&self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Steps once if at least `tick_interval_ms` passed since the last move.
    pub fn advance(
        &mut self,
        now_ms: u64,
        tick_interval_ms: u64,
        rng: &mut SessionRng,
    ) -> Option<StepOutcome> {
        if !self.is_running() || now_ms.saturating_sub(self.last_move_ms) < tick_interval_ms {
            return None;
        }
        let outcome = self.step(rng);
        self.last_move_ms = now_ms;
        Some(outcome)
    }

    pub fn step(&mut self, rng: &mut SessionRng) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Idle;
        }

        let next_head = match self.next_head() {
            Ok(point) => point,
            Err(reason) => {
                self.end(reason);
                return StepOutcome::Ended(reason);
            }
        };

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.score = self.score.saturating_add(self.settings.score_per_food);
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            if !self.spawn_food(rng) {
                self.end(GameEndReason::BoardFilled);
                return StepOutcome::Ended(GameEndReason::BoardFilled);
            }
            StepOutcome::Ate
        } else {
            self.snake.pop_tail();
            StepOutcome::Moved
        }
    }

    /// Restores the start layout. Only honoured once the game is over.
    pub fn reset(&mut self, rng: &mut SessionRng) -> bool {
        if self.is_running() {
            return false;
        }

        self.snake = Snake::new(
            self.settings.start_head,
            self.settings.start_direction,
            self.settings.start_length,
        );
        self.direction = self.settings.start_direction;
        self.score = 0;
        self.status = GameStatus::Running;
        self.food = None;
        self.spawn_food(rng);
        log!("Game restarted");
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            field_size: self.field_size,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            direction: self.direction,
            running: self.is_running(),
            end_reason: match self.status {
                GameStatus::Running => None,
                GameStatus::GameOver(reason) => Some(reason),
            },
        }
    }

    fn next_head(&self) -> Result<Point, GameEndReason> {
        let next_head = self
            .field_size
            .step(self.snake.head(), self.direction)
            .ok_or(GameEndReason::WallCollision)?;

        // the tail still counts: it only moves after the head is placed
        if self.snake.occupies(&next_head) {
            return Err(GameEndReason::SelfCollision);
        }

        Ok(next_head)
    }

    fn end(&mut self, reason: GameEndReason) {
        self.status = GameStatus::GameOver(reason);
        log!("Game over ({:?}). Final score: {}", reason, self.score);
    }

    /// Places food on a uniformly chosen free cell. Returns `false` and
    /// clears the food when the snake covers the whole field.
    fn spawn_food(&mut self, rng: &mut SessionRng) -> bool {
        let free_cells: Vec<Point> = (0..self.field_size.width)
            .flat_map(|x| (0..self.field_size.height).map(move |y| Point::new(x, y)))
            .filter(|point| !self.snake.occupies(point))
            .collect();

        match rng.pick(&free_cells) {
            Some(&food) => {
                self.food = Some(food);
                debug_log!("Food spawned at ({}, {})", food.x, food.y);
                true
            }
            None => {
                self.food = None;
                log!("No free cell left for food");
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: Vec<Point>, direction: Direction) {
        self.snake = Snake::from_segments(segments);
        self.direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }
}
