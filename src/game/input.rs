use super::direction::Direction;
use crate::command::Command;

/// What the player wants the game to do in response to a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Intent {
    /// Head this way starting with the next tick
    Turn(Direction),
    /// Pause a running game or resume a paused one
    TogglePause,
}

impl Intent {
    pub(crate) fn from_command(cmd: Command) -> Option<Intent> {
        match cmd {
            Command::Up => Some(Intent::Turn(Direction::North)),
            Command::Down => Some(Intent::Turn(Direction::South)),
            Command::Left => Some(Intent::Turn(Direction::West)),
            Command::Right => Some(Intent::Turn(Direction::East)),
            Command::Space | Command::P | Command::Esc => Some(Intent::TogglePause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Command::Up, Some(Intent::Turn(Direction::North)))]
    #[case(Command::Down, Some(Intent::Turn(Direction::South)))]
    #[case(Command::Left, Some(Intent::Turn(Direction::West)))]
    #[case(Command::Right, Some(Intent::Turn(Direction::East)))]
    #[case(Command::Space, Some(Intent::TogglePause))]
    #[case(Command::P, Some(Intent::TogglePause))]
    #[case(Command::Esc, Some(Intent::TogglePause))]
    #[case(Command::Enter, None)]
    #[case(Command::R, None)]
    #[case(Command::Q, None)]
    #[case(Command::Next, None)]
    fn test_from_command(#[case] cmd: Command, #[case] intent: Option<Intent>) {
        assert_eq!(Intent::from_command(cmd), intent);
    }
}
