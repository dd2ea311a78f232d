use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn square(side: usize) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Neighbour of `from` one cell towards `direction`, or `None` when that
    /// cell is off the grid.
    pub fn step(&self, from: Point, direction: Direction) -> Option<Point> {
        let next = match direction {
            Direction::Up => Point::new(from.x, from.y.checked_sub(1)?),
            Direction::Down => Point::new(from.x, from.y + 1),
            Direction::Left => Point::new(from.x.checked_sub(1)?, from.y),
            Direction::Right => Point::new(from.x + 1, from.y),
        };
        self.contains(&next).then_some(next)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameEndReason),
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// What a single call to `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game was already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Ended(GameEndReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_step_stops_at_edges() {
        let field = FieldSize::square(36);
        assert_eq!(field.step(Point::new(0, 5), Direction::Left), None);
        assert_eq!(field.step(Point::new(5, 0), Direction::Up), None);
        assert_eq!(field.step(Point::new(35, 5), Direction::Right), None);
        assert_eq!(field.step(Point::new(5, 35), Direction::Down), None);
        assert_eq!(
            field.step(Point::new(5, 10), Direction::Right),
            Some(Point::new(6, 10))
        );
        assert_eq!(
            field.step(Point::new(5, 10), Direction::Up),
            Some(Point::new(5, 9))
        );
    }
}
