use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{Direction, FieldSize, Point};

pub const DEFAULT_FIELD_SIDE: usize = 36;
pub const DEFAULT_SCORE_PER_FOOD: u32 = 10;
pub const MAX_SCORE_PER_FOOD: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub start_head: Point,
    pub start_length: usize,
    pub start_direction: Direction,
    pub score_per_food: u32,
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }

    fn start_tail(&self) -> Option<Point> {
        let trail = self.start_length.checked_sub(1)?;
        let head = self.start_head;
        match self.start_direction {
            Direction::Up => Some(Point::new(head.x, head.y.checked_add(trail)?)),
            Direction::Down => Some(Point::new(head.x, head.y.checked_sub(trail)?)),
            Direction::Left => Some(Point::new(head.x.checked_add(trail)?, head.y)),
            Direction::Right => Some(Point::new(head.x.checked_sub(trail)?, head.y)),
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 2 || self.field_height < 2 {
            return Err("field dimensions must be at least 2x2".to_string());
        }
        if self.field_width > 1000 || self.field_height > 1000 {
            return Err("field dimensions must not exceed 1000x1000".to_string());
        }
        if self.start_length == 0 {
            return Err("start_length must be at least 1".to_string());
        }
        if self.start_length >= self.field_size().cell_count() {
            return Err("start_length must leave room for food".to_string());
        }
        let field = self.field_size();
        if !field.contains(&self.start_head) {
            return Err(format!(
                "start_head ({}, {}) is outside the {}x{} field",
                self.start_head.x, self.start_head.y, self.field_width, self.field_height
            ));
        }
        match self.start_tail() {
            Some(tail) if field.contains(&tail) => {}
            _ => {
                return Err(format!(
                    "a snake of length {} heading {:?} from ({}, {}) does not fit on the field",
                    self.start_length, self.start_direction, self.start_head.x, self.start_head.y
                ));
            }
        }
        if self.score_per_food == 0 {
            return Err("score_per_food must be greater than 0".to_string());
        }
        if self.score_per_food > MAX_SCORE_PER_FOOD {
            return Err(format!(
                "score_per_food must not exceed {}",
                MAX_SCORE_PER_FOOD
            ));
        }
        Ok(())
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_SIDE,
            field_height: DEFAULT_FIELD_SIDE,
            start_head: Point::new(5, 10),
            start_length: 2,
            start_direction: Direction::Right,
            score_per_food: DEFAULT_SCORE_PER_FOOD,
        }
    }
}

/// Rates of the two periodic tasks that drive a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub tick_interval_ms: u64,
    pub render_fps: u32,
}

impl TimingSettings {
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.render_fps as f64
    }
}

impl Validate for TimingSettings {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms < 10 {
            return Err("tick_interval_ms must be at least 10".to_string());
        }
        if self.tick_interval_ms > 5000 {
            return Err("tick_interval_ms must not exceed 5000".to_string());
        }
        if self.render_fps == 0 || self.render_fps > 240 {
            return Err("render_fps must be between 1 and 240".to_string());
        }
        Ok(())
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 90,
            render_fps: 60,
        }
    }
}
