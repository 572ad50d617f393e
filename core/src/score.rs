use serde::{Deserialize, Serialize};

use crate::CellCount;

const BASE_SCORE: f64 = 500.0;
const DISARM_BONUS: f64 = 15.0;
const WRONG_MARKER_PENALTY: f64 = 20.0;
/// Wrong mine markers tolerated before the marker penalty kicks in.
const FREE_WRONG_MARKERS: CellCount = 2;
const IDEAL_MOVES_PER_TILE: f64 = 0.333;
const MIN_SCORE: f64 = 20.0;

/// Everything the score of a cleared mission depends on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub markers: CellCount,
    pub disarmed: CellCount,
    pub moves: u32,
    pub mines_placed: CellCount,
    pub total_tiles: CellCount,
}

impl ScoreCard {
    pub fn ideal_moves(&self) -> f64 {
        f64::from(self.mines_placed) + f64::from(self.total_tiles) * IDEAL_MOVES_PER_TILE
    }

    pub fn marker_penalty(&self) -> f64 {
        let wrong = self.markers.saturating_sub(self.disarmed);
        WRONG_MARKER_PENALTY * f64::from(wrong.saturating_sub(FREE_WRONG_MARKERS))
    }

    pub fn moves_penalty(&self) -> f64 {
        (f64::from(self.moves) - self.ideal_moves()).max(0.0)
    }

    pub fn score(&self) -> u32 {
        let raw = BASE_SCORE + DISARM_BONUS * f64::from(self.disarmed)
            - self.marker_penalty()
            - self.moves_penalty();
        raw.round().max(MIN_SCORE) as u32
    }
}
