use std::io::{self, Write};

use ied_core::*;
use ndarray::Array2;

/// Character shown for a tile in its current state.
pub fn glyph(change: &TileChange) -> char {
    match change.visibility {
        Visibility::Hidden => '.',
        Visibility::MarkedMine => '!',
        Visibility::MarkedSafe => '?',
        Visibility::Revealed => match change.kind {
            TileKind::Empty if change.danger == 0 => ' ',
            TileKind::Empty => char::from_digit(change.danger.into(), 10).unwrap_or('+'),
            TileKind::Mine => '*',
            TileKind::Disarmed => 'x',
            TileKind::Blocked => '#',
        },
    }
}

pub fn describe(event: &MissionEvent) -> String {
    match *event {
        MissionEvent::MissionStarted { level, armor } => {
            format!("Mission {} begins. Armor: {}", level + 1, armor)
        }
        MissionEvent::SearchRestricted { at: (x, y) } => {
            format!("Cannot reach ({}, {}) from the cleared area", x, y)
        }
        MissionEvent::MineBlocked {
            at: (x, y),
            armor,
            triggered,
        } => {
            let cause = if triggered { "A surrounded IED went off" } else { "IED hit" };
            format!("{} at ({}, {}), armor absorbed the blast. Armor left: {}", cause, x, y, armor)
        }
        MissionEvent::CompletionPending => {
            "End the mission and sweep the area? Type 'yes' or 'no'.".to_string()
        }
        MissionEvent::MissionCleared {
            markers,
            disarmed,
            score,
        } => format!(
            "Mission cleared! {} markers placed, {} IEDs disarmed, {} points. Type 'next'.",
            markers, disarmed, score
        ),
        MissionEvent::MissionFailed {
            reason,
            active_mines,
        } => {
            let cause = match reason {
                FailReason::Detonation { at: (x, y) } => format!("IED detonated at ({}, {})", x, y),
                FailReason::UnresolvedMines => "Live IEDs were left behind".to_string(),
            };
            format!(
                "Mission failed: {}. {} live IEDs remained. Type 'restart'.",
                cause, active_mines
            )
        }
        MissionEvent::NewHighScore { score } => format!("New high score: {}", score),
    }
}

/// Keeps a character picture of the board up to date from frames.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    cells: Array2<char>,
}

impl TextRenderer {
    pub fn new((cols, rows): Coord2) -> Self {
        Self {
            cells: Array2::from_elem([usize::from(rows), usize::from(cols)], '.'),
        }
    }

    /// Applies tile changes and returns the messages for the frame's events.
    pub fn apply(&mut self, frame: &Frame) -> Vec<String> {
        for change in &frame.changes {
            self.cells[change.pos.to_nd_index()] = glyph(change);
        }
        frame.events.iter().map(describe).collect()
    }

    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let (_, cols) = self.cells.dim();

        write!(out, "    ")?;
        for x in 0..cols {
            write!(out, "{}", x % 10)?;
        }
        writeln!(out)?;

        for (y, row) in self.cells.rows().into_iter().enumerate() {
            write!(out, "{:>3} ", y)?;
            for &cell in row {
                write!(out, "{}", cell)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
