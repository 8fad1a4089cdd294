use crate::error::{LadderError, Result};

/// Minimum number of rows on any generated board.
pub const MIN_ROWS: usize = 12;

/// Returns the number of rows a board with `column_count` columns gets.
///
/// `max(12, 4 * n)` normally, `max(12, n²)` when self-mapping is excluded.
/// The larger exclude-self bound leaves room for the worst-case run of
/// correction swaps.
pub fn row_count(column_count: usize, exclude_self: bool) -> usize {
    let policy = if exclude_self {
        column_count * column_count
    } else {
        column_count * 4
    };
    policy.max(MIN_ROWS)
}

/// Returns true if no row has two rungs in neighbouring slots.
pub fn has_no_adjacent_rungs<T: AsRef<[bool]>>(rows: &[T]) -> bool {
    rows.iter()
        .all(|row| !row.as_ref().windows(2).any(|pair| pair[0] && pair[1]))
}

/// A ghost-leg board.
///
/// `column_count` vertical lines crossed by `row_count` rows of rung slots.
/// Slot `s` of a row connects column `s` with column `s + 1`, so every row
/// has `column_count - 1` slots. No row ever has rungs in two neighbouring
/// slots; this is an invariant enforced by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    column_count: usize,
    row_count: usize,
    /// Flattened grid: rungs[row * slot_count + slot]
    rungs: Vec<bool>,
}

impl Layout {
    /// Creates a board with no rungs.
    pub(crate) fn empty(column_count: usize, row_count: usize) -> Self {
        debug_assert!(column_count >= 2);
        Self {
            column_count,
            row_count,
            rungs: vec![false; row_count * (column_count - 1)],
        }
    }

    /// Builds a board from explicit rows of rung slots.
    ///
    /// # Errors
    /// Returns [`LadderError::InvalidLayout`] if the rows describe fewer than
    /// two columns, have differing widths, or place rungs in neighbouring
    /// slots.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let slot_count = rows.first().map_or(0, Vec::len);
        if slot_count == 0 {
            return Err(LadderError::invalid_layout(
                0,
                "a board needs at least one rung slot per row",
            ));
        }

        let mut rungs = Vec::with_capacity(rows.len() * slot_count);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != slot_count {
                return Err(LadderError::invalid_layout(
                    r,
                    format!("expected {} rung slots, found {}", slot_count, row.len()),
                ));
            }
            if let Some(s) = row.windows(2).position(|pair| pair[0] && pair[1]) {
                return Err(LadderError::invalid_layout(
                    r,
                    format!("adjacent rungs at slots {} and {}", s, s + 1),
                ));
            }
            rungs.extend_from_slice(row);
        }

        Ok(Self {
            column_count: slot_count + 1,
            row_count: rows.len(),
            rungs,
        })
    }

    /// Returns the number of vertical lines.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of rung slots per row (`column_count - 1`).
    pub fn slot_count(&self) -> usize {
        self.column_count - 1
    }

    /// Returns true if there is a rung at `slot` in `row`.
    ///
    /// # Panics
    /// Panics if `row >= row_count` or `slot >= slot_count`.
    pub fn has_rung(&self, row: usize, slot: usize) -> bool {
        assert!(
            row < self.row_count && slot < self.slot_count(),
            "index out of bounds"
        );
        self.rungs[row * self.slot_count() + slot]
    }

    /// Returns the rung slots of one row.
    pub fn row(&self, row: usize) -> &[bool] {
        let width = self.slot_count();
        &self.rungs[row * width..(row + 1) * width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        self.rungs.chunks_exact(self.slot_count())
    }

    /// Copies the board into a `rows x slots` grid.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Total number of rungs on the board.
    pub fn rung_count(&self) -> usize {
        self.rungs.iter().filter(|&&r| r).count()
    }

    /// Returns true if the no-adjacent-rungs invariant holds on every row.
    pub fn has_no_adjacent_rungs(&self) -> bool {
        has_no_adjacent_rungs(&self.rows().collect::<Vec<_>>())
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [bool] {
        let width = self.slot_count();
        &mut self.rungs[row * width..(row + 1) * width]
    }

    /// Sets a rung without checking its neighbours.
    pub(crate) fn set_unchecked(&mut self, row: usize, slot: usize) {
        let width = self.slot_count();
        self.rungs[row * width + slot] = true;
    }

    /// Returns true if a rung at `slot` in `row` would have no neighbour.
    pub(crate) fn slot_is_free(&self, row: usize, slot: usize) -> bool {
        let cells = self.row(row);
        !cells[slot]
            && (slot == 0 || !cells[slot - 1])
            && cells.get(slot + 1).is_none_or(|&next| !next)
    }
}
