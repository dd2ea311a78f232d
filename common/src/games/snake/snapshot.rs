use super::types::{Direction, FieldSize, GameEndReason, Point};

/// Read-only copy of the game handed to the render layer.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub field_size: FieldSize,
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub direction: Direction,
    pub running: bool,
    pub end_reason: Option<GameEndReason>,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}
