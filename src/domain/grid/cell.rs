// SPDX-License-Identifier: MPL-2.0
//! Cell and group index newtypes.
//!
//! The sheet is a fixed 4×4 grid. Cells are pure view indices; groups are
//! the slots that actually own images. Keeping both as distinct types makes
//! it impossible to pass a cell where a group slot is expected.

use std::fmt;

/// Number of columns (and rows) of the sticker grid.
pub const GRID_SIDE: usize = 4;

/// Total number of cells on a sheet.
pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;

// =============================================================================
// CellIndex
// =============================================================================

/// Index of a cell in the grid, guaranteed to be in `0..16`.
///
/// Cells are numbered row-major: cell 0 is top-left, cell 3 top-right,
/// cell 15 bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Creates a cell index, returning `None` when `index` is off the grid.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            #[allow(clippy::cast_possible_truncation)] // < 16
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Creates a cell index from a row and column.
    #[must_use]
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIDE && col < GRID_SIDE {
            Self::new(row * GRID_SIDE + col)
        } else {
            None
        }
    }

    /// Returns the raw index.
    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the zero-based row of this cell.
    #[must_use]
    pub fn row(self) -> usize {
        self.value() / GRID_SIDE
    }

    /// Returns the zero-based column of this cell.
    #[must_use]
    pub fn col(self) -> usize {
        self.value() % GRID_SIDE
    }

    /// Iterates over every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT).filter_map(CellIndex::new)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

// =============================================================================
// GroupIndex
// =============================================================================

/// Index of an image group slot.
///
/// Validity depends on the active layout mode, so the range check happens
/// where the group count is known (see `GroupImageStore`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(usize);

impl GroupIndex {
    /// Wraps a raw group slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_index_rejects_off_grid_values() {
        assert!(CellIndex::new(15).is_some());
        assert!(CellIndex::new(16).is_none());
        assert!(CellIndex::from_row_col(4, 0).is_none());
    }

    #[test]
    fn cell_index_row_col_are_row_major() {
        let cell = CellIndex::new(6).unwrap();
        assert_eq!(cell.row(), 1);
        assert_eq!(cell.col(), 2);
        assert_eq!(CellIndex::from_row_col(3, 1), CellIndex::new(13));
    }

    #[test]
    fn all_yields_sixteen_cells_in_order() {
        let cells: Vec<usize> = CellIndex::all().map(CellIndex::value).collect();
        assert_eq!(cells, (0..16).collect::<Vec<_>>());
    }
}
