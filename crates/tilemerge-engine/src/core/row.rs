//! Row primitives behind every directional move.
//!
//! The grid only ever slides tiles to the left. Every other direction is reduced to this
//! case by transposing and/or inverting the grid (see [`Direction`](super::Direction)),
//! so these two functions carry all of the merge rules.

/// Result of sliding a single row to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowShift {
    /// The row after compaction and merging. Always the same length as the input.
    pub row: Vec<u32>,
    /// Points earned by the merges in this row (sum of the produced tiles).
    pub score: u64,
    /// Number of merges performed.
    pub merges: usize,
    /// Largest tile produced by a merge, or 0 if nothing merged.
    pub largest_merge: u32,
}

/// Value of the tile produced by merging two `value` tiles, or `None` when it does not fit
/// in a cell.
fn merged_value(value: u32) -> Option<u32> {
    value.checked_mul(2)
}

/// Moves all tiles of `row` to the left, keeping their order, and pads with zeros.
fn compact(row: &mut [u32]) {
    let mut write = 0;
    for read in 0..row.len() {
        if row[read] != 0 {
            row.swap(write, read);
            write += 1;
        }
    }
}

/// Slides a row to the left, merging equal neighbours.
///
/// The row is compacted, then scanned left to right: a tile equal to its right neighbour
/// absorbs it and the produced tile cannot merge again in the same pass. Tiles whose double
/// would overflow a cell never merge. A final compaction closes the gaps left by merges.
///
/// ```
/// use tilemerge_engine::move_row_left;
///
/// let shift = move_row_left(&[2, 2, 2, 0]);
/// assert_eq!(shift.row, [4, 2, 0, 0]);
/// assert_eq!(shift.score, 4);
///
/// let shift = move_row_left(&[0, 2, 2, 4]);
/// assert_eq!(shift.row, [4, 4, 0, 0]);
/// ```
#[must_use]
pub fn move_row_left(row: &[u32]) -> RowShift {
    let mut out = row.to_vec();
    compact(&mut out);

    let mut score = 0;
    let mut merges = 0;
    let mut largest_merge = 0;
    let mut i = 0;
    while i + 1 < out.len() {
        if out[i] != 0
            && out[i] == out[i + 1]
            && let Some(merged) = merged_value(out[i])
        {
            out[i] = merged;
            out[i + 1] = 0;
            score += u64::from(merged);
            merges += 1;
            largest_merge = largest_merge.max(merged);
            // skip the emptied cell, the merged tile is spent for this pass
            i += 2;
        } else {
            i += 1;
        }
    }

    compact(&mut out);
    debug_assert_eq!(out.len(), row.len());
    RowShift {
        row: out,
        score,
        merges,
        largest_merge,
    }
}

/// Returns whether [`move_row_left`] would change `row`.
///
/// A row can move left when a tile sits immediately right of an empty cell, or when two
/// adjacent tiles hold the same value.
///
/// ```
/// use tilemerge_engine::row_can_move_left;
///
/// assert!(!row_can_move_left(&[2, 4, 2, 4]));
/// assert!(row_can_move_left(&[2, 2, 4, 8]));
/// assert!(row_can_move_left(&[0, 0, 0, 2]));
/// ```
#[must_use]
pub fn row_can_move_left(row: &[u32]) -> bool {
    row.windows(2).any(|pair| match *pair {
        [0, right] => right != 0,
        [left, right] => left == right && merged_value(left).is_some(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_preserves_order() {
        let mut row = [0, 4, 0, 2, 8];
        compact(&mut row);
        assert_eq!(row, [4, 2, 8, 0, 0]);
    }

    #[test]
    fn test_no_triple_merge() {
        assert_eq!(move_row_left(&[2, 2, 2, 0]).row, [4, 2, 0, 0]);
        assert_eq!(move_row_left(&[2, 2, 2]).row, [4, 2, 0]);
    }

    #[test]
    fn test_merge_after_gap() {
        let shift = move_row_left(&[0, 2, 2, 4]);
        assert_eq!(shift.row, [4, 4, 0, 0]);
        assert_eq!(shift.score, 4);
        assert_eq!(shift.merges, 1);
    }

    #[test]
    fn test_two_pairs_merge_independently() {
        let shift = move_row_left(&[2, 2, 4, 4]);
        assert_eq!(shift.row, [4, 8, 0, 0]);
        assert_eq!(shift.score, 12);
        assert_eq!(shift.merges, 2);
        assert_eq!(shift.largest_merge, 8);
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let shift = move_row_left(&[2, 2, 2, 2]);
        assert_eq!(shift.row, [4, 4, 0, 0]);
        assert_eq!(shift.score, 8);
    }

    #[test]
    fn test_produced_tile_does_not_remerge() {
        // [4, 4] -> 8 must not absorb the existing 8 in the same pass
        assert_eq!(move_row_left(&[4, 4, 8, 0]).row, [8, 8, 0, 0]);
    }

    #[test]
    fn test_blocked_row_is_unchanged() {
        let shift = move_row_left(&[2, 4, 2, 4]);
        assert_eq!(shift.row, [2, 4, 2, 4]);
        assert_eq!(shift.score, 0);
        assert_eq!(shift.merges, 0);
    }

    #[test]
    fn test_length_and_sum_preserved() {
        let rows: &[&[u32]] = &[
            &[],
            &[0],
            &[2, 0],
            &[2, 2, 2, 0],
            &[0, 2, 2, 4],
            &[8, 8, 8, 8, 8],
            &[2, 0, 2, 0, 4, 4],
            &[16, 0, 0, 16, 32, 32, 2],
        ];
        for row in rows {
            let shift = move_row_left(row);
            assert_eq!(shift.row.len(), row.len(), "length changed for {row:?}");
            assert_eq!(
                shift.row.iter().sum::<u32>(),
                row.iter().sum::<u32>(),
                "sum changed for {row:?}",
            );
        }
    }

    #[test]
    fn test_can_move_matches_move_result() {
        let rows: &[&[u32]] = &[
            &[2, 4, 2, 4],
            &[2, 2, 4, 8],
            &[0, 0, 0, 0],
            &[2, 0, 0, 0],
            &[0, 0, 0, 2],
            &[4, 8, 16, 0],
            &[4, 0, 4, 0],
        ];
        for row in rows {
            let moved = move_row_left(row).row != *row;
            assert_eq!(row_can_move_left(row), moved, "mismatch for {row:?}");
        }
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1 << 31;
        let shift = move_row_left(&[top, top, 0]);
        assert_eq!(shift.row, [top, top, 0]);
        assert_eq!(shift.merges, 0);
        assert!(!row_can_move_left(&[top, top]));

        let shift = move_row_left(&[1 << 30, 1 << 30]);
        assert_eq!(shift.row, [top, 0]);
        assert_eq!(shift.score, u64::from(top));
    }

    #[test]
    fn test_empty_cells_never_merge() {
        assert!(!row_can_move_left(&[0, 0, 0, 0]));
        assert!(!row_can_move_left(&[2, 0, 0, 0]));
    }
}
