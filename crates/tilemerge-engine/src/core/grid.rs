use std::fmt;

use crate::{
    GridShapeError, GridSizeError, NoEmptyCellError,
    engine::TileSource,
};

use super::{
    direction::{Direction, Orientation},
    row::{RowShift, move_row_left, row_can_move_left},
    score::Score,
};

/// Square grid of tiles together with the score it has earned.
///
/// Each cell is either `0` (empty) or a power of two of at least 2. The grid size is fixed
/// at construction.
///
/// # Moves
///
/// Only the leftward move is implemented directly (see [`move_row_left`]). The other
/// directions transpose and/or invert the grid, move left, and undo the transforms in reverse
/// order, as described by [`Direction::orientation`].
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Direction, Grid};
///
/// let mut grid = Grid::from_rows(vec![vec![2, 0], vec![0, 2]]).unwrap();
///
/// assert!(grid.shift(Direction::Left));
/// assert_eq!(grid.rows().collect::<Vec<_>>(), [[2, 0], [2, 0]]);
/// assert_eq!(grid.score().points(), 0);
///
/// assert!(grid.shift(Direction::Down));
/// assert_eq!(grid.rows().collect::<Vec<_>>(), [[0, 0], [4, 0]]);
/// assert_eq!(grid.score().points(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<u32>>,
    score: Score,
}

fn transpose_cells(cells: &mut [Vec<u32>]) {
    let size = cells.len();
    for i in 0..size {
        for j in (i + 1)..size {
            let upper = cells[i][j];
            cells[i][j] = cells[j][i];
            cells[j][i] = upper;
        }
    }
}

fn invert_cells(cells: &mut [Vec<u32>]) {
    for row in cells {
        row.reverse();
    }
}

/// Applies the transforms of `orientation` in the order used before a leftward move.
fn orient(cells: &mut [Vec<u32>], orientation: Orientation) {
    if orientation.transpose {
        transpose_cells(cells);
    }
    if orientation.invert {
        invert_cells(cells);
    }
}

/// Undoes [`orient`].
fn restore(cells: &mut [Vec<u32>], orientation: Orientation) {
    if orientation.invert {
        invert_cells(cells);
    }
    if orientation.transpose {
        transpose_cells(cells);
    }
}

fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl Grid {
    pub const MIN_SIZE: usize = 2;
    pub const DEFAULT_SIZE: usize = 4;

    /// Creates an empty `size`×`size` grid with a zero score.
    pub fn new(size: usize) -> Result<Self, GridSizeError> {
        if size < Self::MIN_SIZE {
            return Err(GridSizeError { size });
        }
        Ok(Self {
            cells: vec![vec![0; size]; size],
            score: Score::new(),
        })
    }

    /// Creates a grid from explicit rows, with a zero score.
    ///
    /// The rows must form a square of at least [`Self::MIN_SIZE`] and every value must be 0 or
    /// a power of two of at least 2.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, GridShapeError> {
        let size = rows.len();
        if size < Self::MIN_SIZE {
            return Err(GridShapeError::Size(GridSizeError { size }));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridShapeError::RaggedRow {
                    row: r,
                    len: row.len(),
                    expected: size,
                });
            }
            if let Some((c, &value)) = row.iter().enumerate().find(|(_, v)| !is_tile_value(**v)) {
                return Err(GridShapeError::InvalidValue {
                    row: r,
                    col: c,
                    value,
                });
            }
        }
        Ok(Self {
            cells: rows,
            score: Score::new(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Returns the value at `(row, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Returns the coordinates of all empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value == 0)
                .map(move |(c, _)| (r, c))
        })
    }

    /// Clears the grid and the score, then inserts two random tiles.
    pub fn reset<T>(&mut self, tiles: &mut T)
    where
        T: TileSource + ?Sized,
    {
        for row in &mut self.cells {
            row.fill(0);
        }
        self.score = Score::new();
        for _ in 0..2 {
            // an empty grid of size >= 2 has room for two tiles
            if self.random_insert(tiles).is_err() {
                unreachable!("freshly cleared grid has no empty cell");
            }
        }
    }

    /// Places a new tile on a uniformly chosen empty cell.
    ///
    /// Returns the coordinates of the new tile.
    ///
    /// # Panics
    ///
    /// Panics if `tiles` picks an index outside `0..empty_count`.
    pub fn random_insert<T>(&mut self, tiles: &mut T) -> Result<(usize, usize), NoEmptyCellError>
    where
        T: TileSource + ?Sized,
    {
        let empty = self.empty_cells().collect::<Vec<_>>();
        if empty.is_empty() {
            return Err(NoEmptyCellError);
        }
        let index = tiles.pick_cell(empty.len());
        let Some(&(row, col)) = empty.get(index) else {
            panic!(
                "tile source picked cell {index} out of {} empty cells",
                empty.len()
            );
        };
        self.cells[row][col] = tiles.pick_value();
        Ok((row, col))
    }

    /// Swaps rows and columns.
    pub fn transpose(&mut self) {
        transpose_cells(&mut self.cells);
    }

    /// Reverses every row.
    pub fn invert(&mut self) {
        invert_cells(&mut self.cells);
    }

    /// Slides all tiles in `direction`, merging equal neighbours and adding the merged values
    /// to the score.
    ///
    /// Returns whether any cell changed. A move that changes nothing is not counted in the
    /// score.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let orientation = direction.orientation();
        orient(&mut self.cells, orientation);
        let shifts = self
            .cells
            .iter()
            .map(|row| move_row_left(row))
            .collect::<Vec<RowShift>>();
        let changed = self
            .cells
            .iter()
            .zip(&shifts)
            .any(|(before, after)| *before != after.row);
        if changed {
            for (row, shift) in self.cells.iter_mut().zip(&shifts) {
                row.copy_from_slice(&shift.row);
            }
            self.score.record_move(&shifts);
        }
        restore(&mut self.cells, orientation);
        changed
    }

    /// Returns whether [`Self::shift`] in `direction` would change at least one cell.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let orientation = direction.orientation();
        if orientation == Direction::Left.orientation() {
            return self.cells.iter().any(|row| row_can_move_left(row));
        }
        let mut cells = self.cells.clone();
        orient(&mut cells, orientation);
        cells.iter().any(|row| row_can_move_left(row))
    }

    /// Returns whether a move is possible in any direction.
    #[must_use]
    pub fn has_any_move(&self) -> bool {
        Direction::ALL.into_iter().any(|dir| self.can_move(dir))
    }

    /// Returns the largest tile on the grid, or 0 for an empty grid.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Renders the grid as a bordered text table, one tile per 5-character cell.
///
/// ```
/// use tilemerge_engine::Grid;
///
/// let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 128]]).unwrap();
/// assert_eq!(
///     grid.to_string(),
///     "+-----+-----+\n\
///      |  2  |     |\n\
///      +-----+-----+\n\
///      |     | 128 |\n\
///      +-----+-----+\n",
/// );
/// ```
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("{}+", "+-----".repeat(self.size()));
        for row in &self.cells {
            writeln!(f, "{border}")?;
            for value in row {
                if *value == 0 {
                    write!(f, "|     ")?;
                } else {
                    write!(f, "|{value:^5}")?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedTiles;

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn cells(grid: &Grid) -> Vec<Vec<u32>> {
        grid.rows().map(<[u32]>::to_vec).collect()
    }

    #[test]
    fn test_rejects_small_sizes() {
        assert_eq!(Grid::new(0), Err(GridSizeError { size: 0 }));
        assert_eq!(Grid::new(1), Err(GridSizeError { size: 1 }));
        assert!(Grid::new(2).is_ok());
    }

    #[test]
    fn test_from_rows_validates_shape() {
        assert!(matches!(
            Grid::from_rows(vec![vec![0, 0], vec![0]]),
            Err(GridShapeError::RaggedRow { row: 1, len: 1, expected: 2 })
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![0, 3], vec![0, 0]]),
            Err(GridShapeError::InvalidValue { row: 0, col: 1, value: 3 })
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![1, 0], vec![0, 0]]),
            Err(GridShapeError::InvalidValue { value: 1, .. })
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![2]]),
            Err(GridShapeError::Size(GridSizeError { size: 1 }))
        ));
    }

    #[test]
    fn test_reset_inserts_two_tiles() {
        let mut g = grid(&[&[2, 4, 8], &[16, 32, 64], &[2, 4, 8]]);
        let mut tiles = ScriptedTiles::new(vec![0, 0], vec![2, 4]);
        g.reset(&mut tiles);

        let values = cells(&g).into_iter().flatten().collect::<Vec<_>>();
        assert_eq!(values.iter().filter(|v| **v != 0).count(), 2);
        assert_eq!(g.get(0, 0), Some(2));
        assert_eq!(g.get(0, 1), Some(4));
        assert_eq!(g.score().points(), 0);
    }

    #[test]
    fn test_random_insert_uses_empty_cells_only() {
        let mut g = grid(&[&[2, 0], &[0, 4]]);
        let mut tiles = ScriptedTiles::new(vec![1], vec![4]);
        assert_eq!(g.random_insert(&mut tiles), Ok((1, 0)));
        assert_eq!(cells(&g), [[2, 0], [4, 4]]);
        assert_eq!(g.random_insert(&mut tiles), Ok((0, 1)));
        assert_eq!(g.random_insert(&mut tiles), Err(NoEmptyCellError));
    }

    #[test]
    fn test_transpose_and_invert_are_involutions() {
        let original = grid(&[&[2, 4, 0], &[8, 0, 16], &[0, 32, 64]]);

        let mut g = original.clone();
        g.transpose();
        assert_eq!(cells(&g), [[2, 8, 0], [4, 0, 32], [0, 16, 64]]);
        g.transpose();
        assert_eq!(g, original);

        g.invert();
        assert_eq!(cells(&g), [[0, 4, 2], [16, 0, 8], [64, 32, 0]]);
        g.invert();
        assert_eq!(g, original);
    }

    #[test]
    fn test_moves_in_all_directions() {
        let start = grid(&[&[2, 2, 0, 0], &[0, 0, 4, 4], &[2, 0, 0, 2], &[0, 8, 0, 0]]);

        let mut g = start.clone();
        assert!(g.shift(Direction::Left));
        assert_eq!(cells(&g), [[4, 0, 0, 0], [8, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0]]);
        assert_eq!(g.score().points(), 16);

        let mut g = start.clone();
        assert!(g.shift(Direction::Right));
        assert_eq!(cells(&g), [[0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 4], [0, 0, 0, 8]]);

        let mut g = start.clone();
        assert!(g.shift(Direction::Up));
        assert_eq!(cells(&g), [[4, 2, 4, 4], [0, 8, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(g.score().points(), 4);

        let mut g = start;
        assert!(g.shift(Direction::Down));
        assert_eq!(cells(&g), [[0, 0, 0, 0], [0, 0, 0, 0], [0, 2, 0, 4], [4, 8, 4, 2]]);
    }

    #[test]
    fn test_no_merge_across_rows() {
        let mut g = grid(&[&[2, 0], &[0, 2]]);
        assert!(g.shift(Direction::Left));
        assert_eq!(cells(&g), [[2, 0], [2, 0]]);
        assert_eq!(g.score().points(), 0);

        assert!(g.shift(Direction::Down));
        assert_eq!(cells(&g), [[0, 0], [4, 0]]);
        assert_eq!(g.score().points(), 4);
    }

    #[test]
    fn test_repeated_move_is_noop() {
        let g = grid(&[&[2, 0, 2, 0], &[0, 4, 0, 8], &[16, 0, 0, 0], &[0, 0, 32, 2]]);
        for direction in Direction::ALL {
            let mut once = g.clone();
            assert!(once.shift(direction));
            assert!(!once.can_move(direction), "{direction} still movable");

            let mut twice = once.clone();
            assert!(!twice.shift(direction));
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_merged_tiles_can_cascade_on_next_move() {
        let mut g = grid(&[&[2, 2, 4, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        assert!(g.shift(Direction::Left));
        assert_eq!(g.get(0, 0), Some(4));
        assert_eq!(g.get(0, 1), Some(4));
        assert!(g.can_move(Direction::Left));
        assert!(g.shift(Direction::Left));
        assert_eq!(g.get(0, 0), Some(8));
        assert_eq!(g.score().points(), 12);
    }

    #[test]
    fn test_blocked_move_keeps_score_and_move_count() {
        let mut g = grid(&[&[2, 4], &[8, 16]]);
        assert!(!g.shift(Direction::Left));
        assert_eq!(g.score().moves(), 0);
        assert_eq!(cells(&g), [[2, 4], [8, 16]]);
    }

    #[test]
    #[should_panic(expected = "tile source picked cell 2 out of 2 empty cells")]
    fn test_random_insert_rejects_out_of_range_pick() {
        struct PastTheEnd;

        impl TileSource for PastTheEnd {
            fn pick_cell(&mut self, empty_count: usize) -> usize {
                empty_count
            }

            fn pick_value(&mut self) -> u32 {
                2
            }
        }

        let mut g = grid(&[&[2, 0], &[4, 0]]);
        let _ = g.random_insert(&mut PastTheEnd);
    }

    #[test]
    fn test_largest_tiles_block_the_move() {
        let top = 1 << 31;
        let mut g = grid(&[&[top, top], &[0, 0]]);
        assert!(!g.can_move(Direction::Left));
        assert!(!g.can_move(Direction::Right));
        assert!(!g.shift(Direction::Left));
        assert_eq!(cells(&g), [[top, top], [0, 0]]);
        assert!(g.can_move(Direction::Down));
    }

    #[test]
    fn test_can_move_does_not_mutate() {
        let g = grid(&[&[2, 0, 0], &[0, 0, 0], &[0, 0, 4]]);
        let before = g.clone();
        assert!(g.can_move(Direction::Up));
        assert!(g.can_move(Direction::Down));
        assert!(g.can_move(Direction::Left));
        assert!(g.can_move(Direction::Right));
        assert_eq!(g, before);
    }

    #[test]
    fn test_can_move_per_direction() {
        // tiles packed into the top-left corner, no equal neighbours
        let g = grid(&[&[2, 4, 0], &[8, 16, 0], &[0, 0, 0]]);
        assert!(!g.can_move(Direction::Left));
        assert!(!g.can_move(Direction::Up));
        assert!(g.can_move(Direction::Right));
        assert!(g.can_move(Direction::Down));
    }

    #[test]
    fn test_has_any_move() {
        assert!(!grid(&[&[2, 4], &[4, 2]]).has_any_move());
        assert!(grid(&[&[2, 4], &[2, 8]]).has_any_move());
        assert!(grid(&[&[2, 0], &[4, 8]]).has_any_move());
    }

    #[test]
    fn test_max_value() {
        assert_eq!(Grid::new(3).unwrap().max_value(), 0);
        assert_eq!(grid(&[&[2, 64], &[0, 8]]).max_value(), 64);
    }

    #[test]
    fn test_sum_preserved_by_moves() {
        let start = grid(&[&[2, 2, 4, 8], &[4, 0, 4, 2], &[2, 2, 2, 2], &[0, 16, 16, 0]]);
        let sum = |g: &Grid| g.rows().flatten().sum::<u32>();
        for direction in Direction::ALL {
            let mut g = start.clone();
            g.shift(direction);
            assert_eq!(sum(&g), sum(&start), "sum changed moving {direction}");
        }
    }
}
