use serde::{Deserialize, Serialize};

use crate::*;

/// A single player command for the [`MissionController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Search(Coord2),
    Mark(Coord2, MarkKind),
    RequestComplete,
    CancelComplete,
    ConfirmComplete,
    Advance,
    Restart,
}

/// What a primary click on a tile does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    Search,
    MarkMine,
    MarkSafe,
}

impl InputMode {
    /// The mode after this one, wrapping back to search.
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::MarkMine,
            Self::MarkMine => Self::MarkSafe,
            Self::MarkSafe => Self::Search,
        }
    }

    pub const fn action_at(self, pos: Coord2) -> Action {
        match self {
            Self::Search => Action::Search(pos),
            Self::MarkMine => Action::Mark(pos, MarkKind::Mine),
            Self::MarkSafe => Action::Mark(pos, MarkKind::Safe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_cycle_back_to_search() {
        let mode = InputMode::default();

        assert_eq!(mode.next(), InputMode::MarkMine);
        assert_eq!(mode.next().next().next(), InputMode::Search);
    }

    #[test]
    fn mode_decides_click_action() {
        assert_eq!(InputMode::Search.action_at((1, 2)), Action::Search((1, 2)));
        assert_eq!(
            InputMode::MarkSafe.action_at((1, 2)),
            Action::Mark((1, 2), MarkKind::Safe)
        );
    }
}
