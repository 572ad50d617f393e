use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

/// Converts `(x, y)` coordinates into a row-major `[y, x]` ndarray index.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Number of tiles on a `(cols, rows)` board.
pub const fn tile_count((cols, rows): Coord2) -> CellCount {
    (cols as CellCount).saturating_mul(rows as CellCount)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let clamp = |len: usize| Coord::try_from(len).unwrap_or(Coord::MAX);
        NeighborIter::new(index, (clamp(cols), clamp(rows)))
    }
}

/// Row by row, so neighbours come out in row-major order.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shifts `(x, y)` by `(dx, dy)`, `None` once it leaves a `(cols, rows)` board.
fn step((x, y): Coord2, (dx, dy): (i8, i8), (cols, rows): Coord2) -> Option<Coord2> {
    let x = x.checked_add_signed(dx).filter(|&x| x < cols)?;
    let y = y.checked_add_signed(dy).filter(|&y| y < rows)?;
    Some((x, y))
}

/// Iterates the up-to-8 in-bounds neighbours of a tile (Chebyshev distance 1).
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.offsets
            .by_ref()
            .find_map(|&offset| step(center, offset, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (4, 3)).collect();

        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn neighbors_respect_non_square_bounds() {
        let grid: Array2<u8> = Array2::default([2, 5]);

        let neighbors: Vec<_> = grid.iter_neighbors((4, 1)).collect();

        assert_eq!(neighbors, vec![(3, 0), (4, 0), (3, 1)]);
    }

    #[test]
    fn tile_count_multiplies_sides() {
        assert_eq!(tile_count((35, 35)), 1225);
        assert_eq!(tile_count((255, 255)), 65025);
    }

    #[test]
    fn nd_index_is_row_major() {
        let pos: Coord2 = (3, 1);

        assert_eq!(pos.to_nd_index(), [1, 3]);
    }
}
