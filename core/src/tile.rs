use serde::{Deserialize, Serialize};

use crate::Coord2;

/// What a tile actually contains.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Mine,
    /// A mine that was correctly marked when the mission ended.
    Disarmed,
    /// A mine whose blast was absorbed by armor.
    Blocked,
}

/// What the player currently sees on a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    MarkedMine,
    MarkedSafe,
}

impl Visibility {
    pub const fn is_marked(self) -> bool {
        matches!(self, Self::MarkedMine | Self::MarkedSafe)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// The annotation a player puts on a hidden tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkKind {
    Mine,
    Safe,
}

impl MarkKind {
    pub const fn visibility(self) -> Visibility {
        match self {
            Self::Mine => Visibility::MarkedMine,
            Self::Safe => Visibility::MarkedSafe,
        }
    }
}

/// Whether a board distinguishes "mine" and "safe" markers or has a single flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkStyle {
    /// A single flag state, every mark request becomes [`MarkKind::Mine`].
    Single,
    #[default]
    Dual,
}

impl MarkStyle {
    pub const fn normalize(self, kind: MarkKind) -> MarkKind {
        match self {
            Self::Single => MarkKind::Mine,
            Self::Dual => kind,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub danger: u8,
    pub visibility: Visibility,
}

impl Tile {
    /// Empty with no adjacent mines, the only tiles a flood fill expands through.
    pub const fn is_safe(&self) -> bool {
        matches!(self.kind, TileKind::Empty) && self.danger == 0
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, TileKind::Mine)
    }
}

/// Snapshot of one tile after it changed, as handed to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChange {
    pub pos: Coord2,
    pub kind: TileKind,
    pub visibility: Visibility,
    pub danger: u8,
}

impl TileChange {
    pub const fn new(pos: Coord2, tile: Tile) -> Self {
        Self {
            pos,
            kind: tile.kind,
            visibility: tile.visibility,
            danger: tile.danger,
        }
    }
}
