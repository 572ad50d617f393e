use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Limits on where the player may search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchRestriction {
    #[default]
    Unrestricted,
    /// Once anything is revealed, searches must touch an already revealed tile.
    Frontier,
}

/// Totals produced by the terminal [`Board::reveal_all`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSummary {
    /// Tiles that were marked as mines.
    pub markers: CellCount,
    /// Markers that were actually on a mine.
    pub disarmed: CellCount,
    /// Mines left unmarked.
    pub active: CellCount,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub hidden: CellCount,
    pub revealed: CellCount,
    pub marked_mine: CellCount,
    pub marked_safe: CellCount,
    pub mines: CellCount,
}

/// The grid of tiles for one mission.
///
/// Tiles are stored row-major and addressed only through `(x, y)` coordinates.
/// Coordinates outside the board are a contract violation and panic.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Array2<Tile>,
    mark_style: MarkStyle,
    restriction: SearchRestriction,
    curve: DifficultyCurve,
    mine_count: CellCount,
    revealed_count: CellCount,
    // keyed (y, x) so draining yields row-major order
    changed: BTreeSet<(Coord, Coord)>,
}

impl Board {
    /// Creates a hidden, empty board of `(cols, rows)` tiles.
    pub fn new((cols, rows): Coord2) -> Self {
        debug_assert!(cols > 0 && rows > 0, "board must not be empty");
        Self {
            tiles: Array2::default([usize::from(rows), usize::from(cols)]),
            mark_style: MarkStyle::default(),
            restriction: SearchRestriction::default(),
            curve: DifficultyCurve::default(),
            mine_count: 0,
            revealed_count: 0,
            changed: BTreeSet::new(),
        }
    }

    pub fn with_mark_style(mut self, mark_style: MarkStyle) -> Self {
        self.mark_style = mark_style;
        self
    }

    pub fn with_search_restriction(mut self, restriction: SearchRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    pub fn with_difficulty_curve(mut self, curve: DifficultyCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Board size as `(cols, rows)`.
    pub fn size(&self) -> Coord2 {
        // built from a Coord2, so both sides fit
        let (rows, cols) = self.tiles.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_tiles(&self) -> CellCount {
        let (cols, rows) = self.size();
        tile_count((cols, rows))
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (cols, rows) = self.size();
        x < cols && y < rows
    }

    pub fn tile(&self, pos: Coord2) -> Tile {
        self.tiles[pos.to_nd_index()]
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mark_style(&self) -> MarkStyle {
        self.mark_style
    }

    /// All tiles with their coordinates, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((y, x), &tile)| ((x as Coord, y as Coord), tile))
    }

    pub fn iter_neighbors(&self, pos: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(pos)
    }

    pub fn stats(&self) -> BoardStats {
        let mut stats = BoardStats::default();
        for tile in self.tiles.iter() {
            match tile.visibility {
                Visibility::Hidden => stats.hidden += 1,
                Visibility::Revealed => stats.revealed += 1,
                Visibility::MarkedMine => stats.marked_mine += 1,
                Visibility::MarkedSafe => stats.marked_safe += 1,
            }
            if tile.is_mine() {
                stats.mines += 1;
            }
        }
        stats
    }

    /// Places mines for a fresh mission, keeping `safe` clear.
    ///
    /// Returns the number of mines placed.
    pub fn generate<S: MineSampler + ?Sized>(
        &mut self,
        safe: Coord2,
        difficulty: u32,
        sampler: &mut S,
    ) -> CellCount {
        debug_assert!(self.contains(safe), "safe tile {safe:?} is out of bounds");

        let target = self
            .curve
            .mine_target(difficulty, self.total_tiles(), sampler);
        let size = self.size();
        let mut placed = 0;

        while placed < target {
            let pos = sampler.coords(size);
            if pos == safe || self.tiles[pos.to_nd_index()].is_mine() {
                continue;
            }
            self.place_mine(pos);
            placed += 1;
        }

        self.mine_count += placed;
        log::debug!(
            "Generated {} mines at difficulty {} around start {:?}",
            placed,
            difficulty,
            safe
        );
        placed
    }

    /// Puts a mine at `pos` and bumps the danger count of its neighbours.
    ///
    /// Used by [`Board::generate`], and directly to lay out fixed boards.
    pub fn place_mine(&mut self, pos: Coord2) {
        let tile = &mut self.tiles[pos.to_nd_index()];
        if tile.is_mine() {
            return;
        }
        // hidden state is unchanged, nothing for a renderer to redraw
        tile.kind = TileKind::Mine;

        for neighbor in self.tiles.iter_neighbors(pos) {
            self.tiles[neighbor.to_nd_index()].danger += 1;
        }
    }

    /// Searches a tile, flood filling from it when it is safe.
    ///
    /// Returns how many tiles became revealed. Marked, already revealed and
    /// restricted tiles return 0 and change nothing.
    pub fn reveal(&mut self, pos: Coord2) -> CellCount {
        if !matches!(self.tile(pos).visibility, Visibility::Hidden) {
            return 0;
        }
        if !self.search_allowed(pos) {
            log::trace!("Search at {:?} is restricted", pos);
            return 0;
        }
        self.open(pos)
    }

    /// Reveals a hidden tile regardless of the search restriction.
    ///
    /// Used for mines that detonate because their whole neighbourhood is open.
    pub fn force_reveal(&mut self, pos: Coord2) -> CellCount {
        if !matches!(self.tile(pos).visibility, Visibility::Hidden) {
            return 0;
        }
        self.open(pos)
    }

    pub fn search_allowed(&self, pos: Coord2) -> bool {
        match self.restriction {
            SearchRestriction::Unrestricted => true,
            SearchRestriction::Frontier => {
                self.revealed_count == 0
                    || self
                        .iter_neighbors(pos)
                        .any(|n| self.tile(n).visibility.is_revealed())
            }
        }
    }

    fn open(&mut self, pos: Coord2) -> CellCount {
        self.set_visibility(pos, Visibility::Revealed);
        let mut count = 1;

        if !self.tile(pos).is_safe() {
            return count;
        }

        let mut stack = vec![pos];
        while let Some(current) = stack.pop() {
            for neighbor in self.tiles.iter_neighbors(current) {
                if !matches!(self.tile(neighbor).visibility, Visibility::Hidden) {
                    continue;
                }
                self.set_visibility(neighbor, Visibility::Revealed);
                count += 1;

                if self.tile(neighbor).is_safe() {
                    stack.push(neighbor);
                }
            }
        }

        count
    }

    /// Cycles the mark on a tile.
    ///
    /// Returns the change in the number of marked tiles: `+1` when a hidden tile
    /// gets marked, `-1` when the same mark is removed and `0` when one mark is
    /// swapped for the other or the tile is already revealed.
    pub fn toggle_mark(&mut self, pos: Coord2, kind: MarkKind) -> i8 {
        let target = self.mark_style.normalize(kind).visibility();

        match self.tile(pos).visibility {
            Visibility::Revealed => 0,
            Visibility::Hidden => {
                self.set_visibility(pos, target);
                1
            }
            current if current == target => {
                self.set_visibility(pos, Visibility::Hidden);
                -1
            }
            _ => {
                self.set_visibility(pos, target);
                0
            }
        }
    }

    /// Removes any mark from a tile, returning the change in marked tiles.
    pub fn clear_mark(&mut self, pos: Coord2) -> i8 {
        if self.tile(pos).visibility.is_marked() {
            self.set_visibility(pos, Visibility::Hidden);
            -1
        } else {
            0
        }
    }

    /// Turns a mine whose blast was absorbed into an inert blocked tile.
    pub fn block_mine(&mut self, pos: Coord2) -> bool {
        let tile = &mut self.tiles[pos.to_nd_index()];
        if !tile.is_mine() {
            return false;
        }
        tile.kind = TileKind::Blocked;
        self.changed.insert((pos.1, pos.0));
        true
    }

    /// Unrevealed mines next to `pos` whose whole neighbourhood is revealed.
    pub fn check_adjacent_triggers(&self, pos: Coord2) -> Vec<Coord2> {
        self.iter_neighbors(pos)
            .filter(|&n| {
                let tile = self.tile(n);
                tile.is_mine() && !tile.visibility.is_revealed()
            })
            .filter(|&n| {
                self.iter_neighbors(n)
                    .all(|m| self.tile(m).visibility.is_revealed())
            })
            .collect()
    }

    /// Reveals the whole board at the end of a mission.
    ///
    /// Mine markers on mines disarm them. Calling this twice counts twice.
    pub fn reveal_all(&mut self) -> RevealSummary {
        let mut summary = RevealSummary::default();

        for ((y, x), tile) in self.tiles.indexed_iter_mut() {
            let before = *tile;

            if matches!(tile.visibility, Visibility::MarkedMine) {
                summary.markers += 1;
                if tile.is_mine() {
                    tile.kind = TileKind::Disarmed;
                    summary.disarmed += 1;
                }
            } else if tile.is_mine() {
                summary.active += 1;
            }
            tile.visibility = Visibility::Revealed;

            if *tile != before {
                self.changed.insert((y as Coord, x as Coord));
            }
        }

        self.revealed_count = self.total_tiles();
        log::debug!("Revealed board: {:?}", summary);
        summary
    }

    /// Puts every tile back to hidden and empty.
    pub fn reset(&mut self) {
        for ((y, x), tile) in self.tiles.indexed_iter_mut() {
            if *tile != Tile::default() {
                *tile = Tile::default();
                self.changed.insert((y as Coord, x as Coord));
            }
        }
        self.mine_count = 0;
        self.revealed_count = 0;
    }

    /// Drains the tiles changed since the last call, in row-major order.
    pub fn take_changes(&mut self) -> Vec<TileChange> {
        std::mem::take(&mut self.changed)
            .into_iter()
            .map(|(y, x)| TileChange::new((x, y), self.tile((x, y))))
            .collect()
    }

    fn set_visibility(&mut self, pos: Coord2, visibility: Visibility) {
        let tile = &mut self.tiles[pos.to_nd_index()];
        if tile.visibility == visibility {
            return;
        }
        match (tile.visibility.is_revealed(), visibility.is_revealed()) {
            (false, true) => self.revealed_count += 1,
            (true, false) => self.revealed_count -= 1,
            _ => {}
        }
        tile.visibility = visibility;
        self.changed.insert((pos.1, pos.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ScriptedSampler;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        let mut board = Board::new(size);
        for &pos in mines {
            board.place_mine(pos);
        }
        board.take_changes();
        board
    }

    fn mine_neighbors(board: &Board, pos: Coord2) -> u8 {
        board
            .iter_neighbors(pos)
            .filter(|&n| board.tile(n).is_mine())
            .count() as u8
    }

    #[test]
    fn generate_keeps_start_tile_safe_and_counts_mines() {
        for seed in 0..20 {
            let mut board = Board::new((12, 9));
            let mut sampler = RandomSampler::new(seed);

            let placed = board.generate((4, 4), 100, &mut sampler);

            assert!(!board.tile((4, 4)).is_mine());
            assert_eq!(board.stats().mines, placed);
            assert_eq!(board.mine_count(), placed);
            assert!(placed > 0);
        }
    }

    #[test]
    fn generate_sets_danger_to_adjacent_mine_count() {
        let mut board = Board::new((10, 7));
        board.generate((0, 0), 60, &mut RandomSampler::new(99));

        for (pos, tile) in board.tiles() {
            assert_eq!(tile.danger, mine_neighbors(&board, pos), "at {pos:?}");
        }
    }

    #[test]
    fn generate_rejects_start_tile_and_duplicates() {
        let mut board = Board::new((4, 4));
        // 0.2 * 16 = 3 mines
        let mut sampler = ScriptedSampler::new(0.2, &[(1, 1), (1, 1), (0, 0), (2, 2), (3, 0)]);

        let placed = board.generate((1, 1), 0, &mut sampler);

        assert_eq!(placed, 3);
        assert!(!board.tile((1, 1)).is_mine());
        assert!(board.tile((0, 0)).is_mine());
        assert!(board.tile((2, 2)).is_mine());
        assert!(board.tile((3, 0)).is_mine());
        assert_eq!(board.tile((1, 1)).danger, 2);
    }

    #[test]
    fn reveal_is_noop_on_revealed_tile() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((1, 1)), 1);
        let before = board.clone();

        assert_eq!(board.reveal((1, 1)), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_is_noop_on_marked_tile() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.toggle_mark((0, 0), MarkKind::Safe);

        assert_eq!(board.reveal((0, 0)), 0);
        assert_eq!(board.tile((0, 0)).visibility, Visibility::MarkedSafe);
    }

    #[test]
    fn flood_fill_opens_everything_but_a_corner_mine() {
        let mut board = board((5, 5), &[(4, 4)]);

        let revealed = board.reveal((0, 0));

        assert_eq!(revealed, 24);
        assert_eq!(board.tile((4, 4)).visibility, Visibility::Hidden);
        assert_eq!(board.tile((3, 3)).visibility, Visibility::Revealed);
        assert_eq!(board.tile((3, 3)).danger, 1);
    }

    #[test]
    fn flood_fill_stops_at_numbered_tiles() {
        // a wall of mines at x = 2 splits the board
        let mut board = board((5, 3), &[(2, 0), (2, 1), (2, 2)]);

        let revealed = board.reveal((0, 1));

        assert_eq!(revealed, 6);
        assert_eq!(board.tile((1, 1)).visibility, Visibility::Revealed);
        assert_eq!(board.tile((3, 1)).visibility, Visibility::Hidden);
    }

    #[test]
    fn reveal_of_numbered_tile_opens_only_that_tile() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), 1);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_does_not_open_marked_tiles() {
        let mut board = board((4, 1), &[]);
        board.toggle_mark((3, 0), MarkKind::Mine);

        assert_eq!(board.reveal((0, 0)), 3);
        assert_eq!(board.tile((3, 0)).visibility, Visibility::MarkedMine);
    }

    #[test]
    fn toggle_mark_cycles_and_converts() {
        let mut board = board((2, 2), &[]);

        assert_eq!(board.toggle_mark((0, 0), MarkKind::Mine), 1);
        assert_eq!(board.toggle_mark((0, 0), MarkKind::Safe), 0);
        assert_eq!(board.tile((0, 0)).visibility, Visibility::MarkedSafe);
        assert_eq!(board.toggle_mark((0, 0), MarkKind::Safe), -1);
        assert_eq!(board.tile((0, 0)).visibility, Visibility::Hidden);
    }

    #[test]
    fn toggle_mark_twice_round_trips() {
        let mut board = board((2, 2), &[]);
        let mut flags = 0i32;

        for _ in 0..2 {
            flags += i32::from(board.toggle_mark((1, 0), MarkKind::Mine));
            flags += i32::from(board.toggle_mark((1, 0), MarkKind::Mine));
        }

        assert_eq!(flags, 0);
        assert_eq!(board.tile((1, 0)).visibility, Visibility::Hidden);
    }

    #[test]
    fn toggle_mark_ignores_revealed_tiles() {
        let mut board = board((2, 2), &[(1, 1)]);
        board.reveal((0, 0));

        assert_eq!(board.toggle_mark((0, 0), MarkKind::Mine), 0);
        assert_eq!(board.tile((0, 0)).visibility, Visibility::Revealed);
    }

    #[test]
    fn single_mark_style_has_one_flag() {
        let mut board = board((2, 2), &[]).with_mark_style(MarkStyle::Single);

        assert_eq!(board.toggle_mark((0, 0), MarkKind::Safe), 1);
        assert_eq!(board.tile((0, 0)).visibility, Visibility::MarkedMine);
        assert_eq!(board.toggle_mark((0, 0), MarkKind::Safe), -1);
    }

    #[test]
    fn block_mine_only_affects_mines() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert!(board.block_mine((0, 0)));
        assert!(!board.block_mine((1, 1)));
        assert_eq!(board.tile((0, 0)).kind, TileKind::Blocked);
        // history of the blast stays visible in the hints
        assert_eq!(board.tile((1, 1)).danger, 1);
    }

    #[test]
    fn surrounded_mine_is_reported_as_triggered() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        for pos in [(1, 0), (0, 1)] {
            board.reveal(pos);
        }
        assert!(board.check_adjacent_triggers((1, 0)).is_empty());

        board.reveal((1, 1));

        assert_eq!(board.check_adjacent_triggers((1, 1)), vec![(0, 0)]);
    }

    #[test]
    fn marked_neighbors_keep_a_mine_from_triggering() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 0));
        board.reveal((0, 1));
        board.toggle_mark((1, 1), MarkKind::Safe);

        assert!(board.check_adjacent_triggers((1, 0)).is_empty());
    }

    #[test]
    fn reveal_all_counts_markers_disarmed_and_active() {
        let mut board = board((4, 4), &[(0, 0), (3, 3)]);
        board.toggle_mark((0, 0), MarkKind::Mine);
        board.toggle_mark((1, 2), MarkKind::Mine);

        let summary = board.reveal_all();

        assert_eq!(
            summary,
            RevealSummary {
                markers: 2,
                disarmed: 1,
                active: 1
            }
        );
        assert_eq!(board.tile((0, 0)).kind, TileKind::Disarmed);
        assert_eq!(board.tile((3, 3)).kind, TileKind::Mine);
        assert_eq!(board.stats().revealed, 16);
    }

    #[test]
    fn reveal_all_ignores_safe_markers() {
        let mut board = board((2, 1), &[(0, 0)]);
        board.toggle_mark((0, 0), MarkKind::Safe);

        let summary = board.reveal_all();

        assert_eq!(summary.markers, 0);
        assert_eq!(summary.active, 1);
    }

    #[test]
    fn reset_restores_every_tile() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((0, 0));
        board.toggle_mark((2, 2), MarkKind::Mine);

        board.reset();

        assert!(board.tiles().all(|(_, tile)| tile == Tile::default()));
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn frontier_restriction_requires_revealed_neighbor() {
        let mut board =
            board((5, 1), &[(2, 0)]).with_search_restriction(SearchRestriction::Frontier);

        assert_eq!(board.reveal((1, 0)), 1);
        assert_eq!(board.reveal((4, 0)), 0);
        assert_eq!(board.tile((4, 0)).visibility, Visibility::Hidden);
        assert_eq!(board.reveal((0, 0)), 1);
    }

    #[test]
    fn take_changes_is_row_major_and_drains() {
        let mut board = board((3, 2), &[(2, 1)]);
        board.toggle_mark((2, 0), MarkKind::Mine);
        board.toggle_mark((0, 1), MarkKind::Safe);

        let changes = board.take_changes();

        let positions: Vec<_> = changes.iter().map(|c| c.pos).collect();
        assert_eq!(positions, vec![(2, 0), (0, 1)]);
        assert_eq!(changes[0].visibility, Visibility::MarkedMine);
        assert!(board.take_changes().is_empty());
    }

    #[test]
    fn non_square_boards_use_cols_for_x() {
        let mut board = board((4, 2), &[(3, 1)]);

        assert_eq!(board.size(), (4, 2));
        assert!(board.contains((3, 1)));
        assert!(!board.contains((1, 3)));
        assert_eq!(board.reveal((0, 0)), 7);
    }
}
