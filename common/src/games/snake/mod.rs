mod autopilot;
mod game_state;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use autopilot::{Autopilot, AutopilotKind};
pub use game_state::SnakeGameState;
pub use settings::{
    DEFAULT_FIELD_SIDE, DEFAULT_SCORE_PER_FOOD, MAX_SCORE_PER_FOOD, SnakeSettings, TimingSettings,
};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
pub use types::{Direction, FieldSize, GameEndReason, GameStatus, Point, StepOutcome};
