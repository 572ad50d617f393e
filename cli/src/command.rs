use ied_core::{Action, Coord, Coord2, InputMode, MarkKind};
use thiserror::Error;

/// A line typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    /// Primary click, interpreted through the current input mode.
    Click(Coord2),
    SetMode(InputMode),
    CycleMode,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("Expected two coordinates after '{0}'")]
    MissingCoords(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoord(String),
    #[error("({0}, {1}) is outside the {2}x{3} board")]
    OutOfBounds(u16, u16, Coord, Coord),
}

pub const HELP: &str = "\
Commands:
  <x> <y>            act on a tile with the current mode
  s|search <x> <y>   search a tile
  m|mine <x> <y>     toggle an IED marker
  f|safe <x> <y>     toggle a safe marker
  1 / 2 / 3          switch mode to search / mark IED / mark safe
  mode               cycle the input mode
  done               finish the mission (asks for confirmation)
  yes / no           confirm or cancel finishing
  next               start the next mission after clearing one
  restart            start a new campaign after failing
  show | help | quit";

/// Parses one input line against a board of `size` `(cols, rows)`.
///
/// Blank lines parse as [`Command::Show`].
pub fn parse(line: &str, size: Coord2) -> Result<Command, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(Command::Show);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "s" | "search" => Command::Act(Action::Search(coords(rest, size, "search")?)),
        "m" | "mine" => Command::Act(Action::Mark(coords(rest, size, "mine")?, MarkKind::Mine)),
        "f" | "safe" => Command::Act(Action::Mark(coords(rest, size, "safe")?, MarkKind::Safe)),
        "1" if rest.is_empty() => Command::SetMode(InputMode::Search),
        "2" if rest.is_empty() => Command::SetMode(InputMode::MarkMine),
        "3" if rest.is_empty() => Command::SetMode(InputMode::MarkSafe),
        "mode" => Command::CycleMode,
        "done" => Command::Act(Action::RequestComplete),
        "yes" | "y" => Command::Act(Action::ConfirmComplete),
        "no" | "n" => Command::Act(Action::CancelComplete),
        "next" => Command::Act(Action::Advance),
        "restart" => Command::Act(Action::Restart),
        "show" => Command::Show,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ if head.parse::<u16>().is_ok() => Command::Click(coords(&words, size, head)?),
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn coords(words: &[&str], (cols, rows): Coord2, name: &str) -> Result<Coord2, ParseError> {
    let &[x, y] = words else {
        return Err(ParseError::MissingCoords(name.to_string()));
    };
    let parse = |word: &str| {
        word.parse::<u16>()
            .map_err(|_| ParseError::InvalidCoord(word.to_string()))
    };
    let (x, y) = (parse(x)?, parse(y)?);

    if x >= u16::from(cols) || y >= u16::from(rows) {
        return Err(ParseError::OutOfBounds(x, y, cols, rows));
    }
    Ok((x as Coord, y as Coord))
}
