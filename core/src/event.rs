use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// A mine went off with no armor left.
    Detonation { at: Coord2 },
    /// Completion was confirmed with unmarked mines on the board.
    UnresolvedMines,
}

/// Mission-level happenings a presentation layer may want to announce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionEvent {
    MissionStarted { level: u32, armor: u8 },
    SearchRestricted { at: Coord2 },
    /// Armor absorbed a blast, `triggered` when the mine was set off by its neighbours.
    MineBlocked { at: Coord2, armor: u8, triggered: bool },
    CompletionPending,
    MissionCleared {
        markers: CellCount,
        disarmed: CellCount,
        score: u32,
    },
    MissionFailed {
        reason: FailReason,
        active_mines: CellCount,
    },
    NewHighScore { score: u32 },
}

/// Everything that changed in response to one action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub changes: Vec<TileChange>,
    pub events: Vec<MissionEvent>,
}

impl Frame {
    /// Whether anything needs to be redrawn or announced.
    pub fn has_update(&self) -> bool {
        !self.changes.is_empty() || !self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_has_no_update() {
        assert!(!Frame::default().has_update());
        assert!(Frame {
            changes: vec![],
            events: vec![MissionEvent::CompletionPending],
        }
        .has_update());
    }

    #[test]
    fn events_serialize_externally_tagged() {
        let event = MissionEvent::MissionFailed {
            reason: FailReason::Detonation { at: (2, 0) },
            active_mines: 1,
        };

        let json = serde_json::to_value(event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "MissionFailed": {
                    "reason": { "Detonation": { "at": [2, 0] } },
                    "active_mines": 1
                }
            })
        );
    }

    #[test]
    fn frame_survives_json() {
        let frame = Frame {
            changes: vec![TileChange {
                pos: (1, 3),
                kind: TileKind::Blocked,
                visibility: Visibility::Revealed,
                danger: 2,
            }],
            events: vec![MissionEvent::MineBlocked {
                at: (1, 3),
                armor: 2,
                triggered: false,
            }],
        };

        let text = serde_json::to_string(&frame).unwrap();

        assert_eq!(serde_json::from_str::<Frame>(&text).unwrap(), frame);
    }
}
