use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Snake body, head first, with a set index of the occupied cells.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and trailing away from
    /// `direction`. Callers check that every segment fits on the field.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut body_set = HashSet::with_capacity(length.max(1));

        let mut segment = head;
        for i in 0..length.max(1) {
            if i > 0 {
                segment = match direction {
                    Direction::Up => Point::new(segment.x, segment.y + 1),
                    Direction::Down => Point::new(segment.x, segment.y.saturating_sub(1)),
                    Direction::Left => Point::new(segment.x + 1, segment.y),
                    Direction::Right => Point::new(segment.x.saturating_sub(1), segment.y),
                };
            }
            body.push_back(segment);
            body_set.insert(segment);
        }

        Self { body, body_set }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        assert!(!body.is_empty(), "Snake body should never be empty");
        let body_set = body.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    pub fn pop_tail(&mut self) -> Point {
        let tail = self
            .body
            .pop_back()
            .expect("Snake body should never be empty");
        self.body_set.remove(&tail);
        tail
    }
}
