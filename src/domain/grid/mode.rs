// SPDX-License-Identifier: MPL-2.0
//! Layout modes and the fixed cell → group partitions.
//!
//! | Mode     | Groups | Partition                                   |
//! |----------|--------|---------------------------------------------|
//! | `single` | 1      | every cell shows group 0                    |
//! | `quad`   | 4      | four 2×2 blocks (see [`QUAD_PARTITION`])    |
//! | `unique` | 16     | identity: cell *n* shows group *n*          |

use super::cell::{CellIndex, GroupIndex, CELL_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cells belonging to each quad group.
///
/// Each group is a 2×2 block of the 4×4 grid, not a contiguous index range:
///
/// ```text
///  0  1 |  2  3
///  4  5 |  6  7
/// ------+------
///  8  9 | 10 11
/// 12 13 | 14 15
/// ```
pub const QUAD_PARTITION: [[usize; 4]; 4] =
    [[0, 1, 4, 5], [2, 3, 6, 7], [8, 9, 12, 13], [10, 11, 14, 15]];

/// Cell → group table for quad mode, derived from [`QUAD_PARTITION`].
const QUAD_LOOKUP: [usize; CELL_COUNT] = [0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];

/// Active partition scheme of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One image repeated across all sixteen cells.
    Single,
    /// Four images, each filling a 2×2 block.
    #[default]
    Quad,
    /// Sixteen independent images.
    Unique,
}

impl LayoutMode {
    /// All modes, in increasing group count.
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Single, LayoutMode::Quad, LayoutMode::Unique];

    /// Number of image groups this mode holds.
    #[must_use]
    pub const fn group_count(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Quad => 4,
            LayoutMode::Unique => CELL_COUNT,
        }
    }

    /// Resolves the group that owns `cell` under this mode.
    ///
    /// Total over the grid: the result is always `< group_count()`.
    #[must_use]
    pub fn resolve_group(self, cell: CellIndex) -> GroupIndex {
        match self {
            LayoutMode::Single => GroupIndex::new(0),
            LayoutMode::Quad => GroupIndex::new(QUAD_LOOKUP[cell.value()]),
            LayoutMode::Unique => GroupIndex::new(cell.value()),
        }
    }

    /// Iterates over the cells owned by `group`, in row-major order.
    ///
    /// Yields nothing when the group does not exist under this mode.
    pub fn cells_in_group(self, group: GroupIndex) -> impl Iterator<Item = CellIndex> {
        CellIndex::all().filter(move |&cell| {
            group.value() < self.group_count() && self.resolve_group(cell) == group
        })
    }

    /// Picks the mode that fits `count` incoming images.
    ///
    /// 1 → single, 2–4 → quad, anything larger → unique. Returns `None` for
    /// an empty batch.
    #[must_use]
    pub fn for_image_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(LayoutMode::Single),
            2..=4 => Some(LayoutMode::Quad),
            _ => Some(LayoutMode::Unique),
        }
    }

    /// Returns the lowercase name used in settings and snapshots.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Single => "single",
            LayoutMode::Quad => "quad",
            LayoutMode::Unique => "unique",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayoutMode(pub String);

impl fmt::Display for UnknownLayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown layout mode '{}' (expected single, quad or unique)",
            self.0
        )
    }
}

impl std::error::Error for UnknownLayoutMode {}

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(LayoutMode::Single),
            "quad" => Ok(LayoutMode::Quad),
            "unique" => Ok(LayoutMode::Unique),
            other => Err(UnknownLayoutMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn cell(i: usize) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    #[test]
    fn group_counts_match_modes() {
        assert_eq!(LayoutMode::Single.group_count(), 1);
        assert_eq!(LayoutMode::Quad.group_count(), 4);
        assert_eq!(LayoutMode::Unique.group_count(), 16);
    }

    #[test]
    fn quad_lookup_agrees_with_partition_table() {
        for (group, cells) in QUAD_PARTITION.iter().enumerate() {
            for &c in cells {
                assert_eq!(LayoutMode::Quad.resolve_group(cell(c)).value(), group);
            }
        }
    }

    #[test]
    fn quad_groups_partition_the_grid_exactly() {
        let mut seen = HashSet::new();
        for group in 0..4 {
            let cells: Vec<_> = LayoutMode::Quad
                .cells_in_group(GroupIndex::new(group))
                .collect();
            assert_eq!(cells.len(), 4);
            for c in cells {
                assert!(seen.insert(c), "{c} appears in two quad groups");
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn quad_groups_are_two_by_two_blocks() {
        for group in 0..4 {
            let cells: Vec<_> = LayoutMode::Quad
                .cells_in_group(GroupIndex::new(group))
                .collect();
            let rows: HashSet<_> = cells.iter().map(|c| c.row()).collect();
            let cols: HashSet<_> = cells.iter().map(|c| c.col()).collect();
            assert_eq!(rows.len(), 2);
            assert_eq!(cols.len(), 2);
        }
    }

    #[test]
    fn single_maps_everything_to_group_zero() {
        assert!(CellIndex::all().all(|c| LayoutMode::Single.resolve_group(c).value() == 0));
        assert_eq!(LayoutMode::Single.cells_in_group(GroupIndex::new(0)).count(), 16);
    }

    #[test]
    fn cells_in_group_is_empty_for_missing_group() {
        assert_eq!(LayoutMode::Quad.cells_in_group(GroupIndex::new(4)).count(), 0);
    }

    #[test]
    fn mode_for_image_count_follows_thresholds() {
        assert_eq!(LayoutMode::for_image_count(0), None);
        assert_eq!(LayoutMode::for_image_count(1), Some(LayoutMode::Single));
        assert_eq!(LayoutMode::for_image_count(2), Some(LayoutMode::Quad));
        assert_eq!(LayoutMode::for_image_count(4), Some(LayoutMode::Quad));
        assert_eq!(LayoutMode::for_image_count(5), Some(LayoutMode::Unique));
        assert_eq!(LayoutMode::for_image_count(40), Some(LayoutMode::Unique));
    }

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!("Quad".parse::<LayoutMode>(), Ok(LayoutMode::Quad));
        assert_eq!(" unique ".parse::<LayoutMode>(), Ok(LayoutMode::Unique));
        assert!("grid".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&LayoutMode::Single).unwrap();
        assert_eq!(json, "\"single\"");
    }

    proptest! {
        #[test]
        fn resolve_group_is_total_and_in_range(index in 0usize..16, mode_idx in 0usize..3) {
            let mode = LayoutMode::ALL[mode_idx];
            let c = CellIndex::new(index).unwrap();
            let group = mode.resolve_group(c);
            prop_assert!(group.value() < mode.group_count());
            prop_assert_eq!(group, mode.resolve_group(c));
        }
    }
}
