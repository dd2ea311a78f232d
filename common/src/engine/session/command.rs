use crate::games::snake::Direction;

/// Input delivered to a running session. Queued on arrival and applied at
/// the start of the next simulation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Restart,
    Shutdown,
}
