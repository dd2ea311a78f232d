use common::engine::session::SessionCommand;
use common::games::snake::Direction;

/// Maps browser-style key codes (`ArrowUp`, `KeyW`, `Space`, ...).
pub fn command_for_key_code(code: &str) -> Option<SessionCommand> {
    match code {
        "ArrowUp" | "KeyW" => Some(SessionCommand::Turn(Direction::Up)),
        "ArrowDown" | "KeyS" => Some(SessionCommand::Turn(Direction::Down)),
        "ArrowLeft" | "KeyA" => Some(SessionCommand::Turn(Direction::Left)),
        "ArrowRight" | "KeyD" => Some(SessionCommand::Turn(Direction::Right)),
        "Space" => Some(SessionCommand::Restart),
        _ => None,
    }
}

/// Parses one line typed on stdin. Accepts key codes as well as short
/// aliases; anything else is ignored.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if let Some(command) = command_for_key_code(line) {
        return Some(command);
    }

    match line.to_ascii_lowercase().as_str() {
        "w" | "up" => Some(SessionCommand::Turn(Direction::Up)),
        "s" | "down" => Some(SessionCommand::Turn(Direction::Down)),
        "a" | "left" => Some(SessionCommand::Turn(Direction::Left)),
        "d" | "right" => Some(SessionCommand::Turn(Direction::Right)),
        "r" | "space" | "restart" => Some(SessionCommand::Restart),
        "q" | "quit" | "exit" => Some(SessionCommand::Shutdown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(
            command_for_key_code("KeyW"),
            Some(SessionCommand::Turn(Direction::Up))
        );
        assert_eq!(
            command_for_key_code("ArrowLeft"),
            Some(SessionCommand::Turn(Direction::Left))
        );
        assert_eq!(command_for_key_code("Space"), Some(SessionCommand::Restart));
        assert_eq!(command_for_key_code("KeyQ"), None);
    }

    #[test]
    fn test_aliases_are_case_insensitive() {
        assert_eq!(
            parse_command("  D \n"),
            Some(SessionCommand::Turn(Direction::Right))
        );
        assert_eq!(
            parse_command("Down"),
            Some(SessionCommand::Turn(Direction::Down))
        );
        assert_eq!(parse_command("quit"), Some(SessionCommand::Shutdown));
        assert_eq!(parse_command("r"), Some(SessionCommand::Restart));
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command(""), None);
    }
}
