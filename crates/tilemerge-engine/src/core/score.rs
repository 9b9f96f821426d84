/// Score accumulated by a single grid.
///
/// The score only grows through merges: each merge adds the value of the tile it produced.
/// Alongside the point total it tracks a few counters that the front end shows:
///
/// - **Points**: sum of all merged tile values
/// - **Moves**: number of moves that changed the grid
/// - **Merges**: number of tile pairs merged
/// - **Largest merge**: biggest tile ever produced by a merge
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Score, move_row_left};
///
/// let mut score = Score::new();
/// score.record_move(&[move_row_left(&[2, 2, 4, 4])]);
///
/// assert_eq!(score.points(), 12);
/// assert_eq!(score.merges(), 2);
/// assert_eq!(score.largest_merge(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    points: u64,
    moves: usize,
    merges: usize,
    largest_merge: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    /// Creates a score with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: 0,
            moves: 0,
            merges: 0,
            largest_merge: 0,
        }
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn merges(&self) -> usize {
        self.merges
    }

    #[must_use]
    pub const fn largest_merge(&self) -> u32 {
        self.largest_merge
    }

    /// Adds the outcome of one move, given the shift result of every row.
    ///
    /// Returns the number of points gained by the move.
    pub fn record_move(&mut self, rows: &[super::RowShift]) -> u64 {
        let gained: u64 = rows.iter().map(|shift| shift.score).sum();
        self.moves += 1;
        self.points += gained;
        for shift in rows {
            self.merges += shift.merges;
            self.largest_merge = self.largest_merge.max(shift.largest_merge);
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_row_left;

    #[test]
    fn test_starts_at_zero() {
        let score = Score::new();
        assert_eq!(score.points(), 0);
        assert_eq!(score.moves(), 0);
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_slide_without_merge_counts_move_only() {
        let mut score = Score::new();
        let gained = score.record_move(&[move_row_left(&[0, 2, 0, 4])]);
        assert_eq!(gained, 0);
        assert_eq!(score.points(), 0);
        assert_eq!(score.moves(), 1);
        assert_eq!(score.merges(), 0);
    }

    #[test]
    fn test_points_accumulate_across_moves() {
        let mut score = Score::new();
        score.record_move(&[move_row_left(&[2, 2, 0, 0]), move_row_left(&[4, 4, 0, 0])]);
        score.record_move(&[move_row_left(&[8, 8, 0, 0])]);
        assert_eq!(score.points(), 4 + 8 + 16);
        assert_eq!(score.moves(), 2);
        assert_eq!(score.merges(), 3);
        assert_eq!(score.largest_merge(), 16);
    }
}
