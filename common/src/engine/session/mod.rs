mod broadcaster;
mod clock;
mod command;
mod snake_session;

pub use broadcaster::{GameBroadcaster, WatchBroadcaster};
pub use clock::SessionClock;
pub use command::SessionCommand;
pub use snake_session::{SessionSummary, SnakeSession, SnakeSessionConfig};
