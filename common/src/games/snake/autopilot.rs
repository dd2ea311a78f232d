use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::game_state::SnakeGameState;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutopilotKind {
    /// Greedy move towards the food among the safe ones.
    Efficient,
    Random,
}

/// Computes turns for an unattended snake. Only ever suggests a direction;
/// the engine still applies its own reversal rule.
pub struct Autopilot;

impl Autopilot {
    pub fn calculate_move(
        kind: AutopilotKind,
        state: &SnakeGameState,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if !state.is_running() {
            return None;
        }
        match kind {
            AutopilotKind::Efficient => Self::efficient_pathfinding(state, rng),
            AutopilotKind::Random => Self::random_valid_move(state, rng),
        }
    }

    fn efficient_pathfinding(state: &SnakeGameState, rng: &mut SessionRng) -> Option<Direction> {
        let Some(food) = state.food() else {
            return Self::random_valid_move(state, rng);
        };

        let head = state.snake().head();
        let best = Self::safe_directions(state)
            .into_iter()
            .filter_map(|dir| {
                let next = state.field_size().step(head, dir)?;
                Some((dir, next.manhattan_distance(&food)))
            })
            .min_by_key(|&(_, distance)| distance)
            .map(|(dir, _)| dir);

        best.or_else(|| Self::random_valid_move(state, rng))
    }

    fn random_valid_move(state: &SnakeGameState, rng: &mut SessionRng) -> Option<Direction> {
        let safe = Self::safe_directions(state);
        match rng.pick(&safe) {
            Some(&dir) => Some(dir),
            None => Some(state.direction()),
        }
    }

    fn safe_directions(state: &SnakeGameState) -> Vec<Direction> {
        let head = state.snake().head();
        let current = state.direction();
        Direction::ALL
            .into_iter()
            .filter(|dir| !dir.is_opposite(&current))
            .filter(|&dir| {
                state
                    .field_size()
                    .step(head, dir)
                    .is_some_and(|next| Self::is_safe_position(next, state))
            })
            .collect()
    }

    fn is_safe_position(pos: Point, state: &SnakeGameState) -> bool {
        !state.snake().occupies(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{SnakeSettings, StepOutcome};

    fn create_state(seed: u64) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(seed);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng)
            .expect("default settings are valid");
        (state, rng)
    }

    #[test]
    fn test_efficient_heads_for_food() {
        let (mut state, mut rng) = create_state(5);
        state.set_food(Some(Point::new(5, 3)));
        assert_eq!(
            Autopilot::calculate_move(AutopilotKind::Efficient, &state, &mut rng),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_avoids_wall() {
        let (mut state, mut rng) = create_state(6);
        state.set_snake(vec![Point::new(35, 0), Point::new(34, 0)], Direction::Right);
        state.set_food(Some(Point::new(0, 0)));
        for kind in [AutopilotKind::Efficient, AutopilotKind::Random] {
            assert_eq!(
                Autopilot::calculate_move(kind, &state, &mut rng),
                Some(Direction::Down)
            );
        }
    }

    #[test]
    fn test_efficient_eats_several_times() {
        let (mut state, mut rng) = create_state(11);
        let mut eaten = 0;
        for _ in 0..500 {
            if let Some(dir) = Autopilot::calculate_move(AutopilotKind::Efficient, &state, &mut rng) {
                state.set_direction(dir);
            }
            match state.step(&mut rng) {
                StepOutcome::Ate => eaten += 1,
                StepOutcome::Ended(_) => break,
                _ => {}
            }
        }
        assert!(eaten >= 3, "ate only {} times", eaten);
    }
}
