//! Sort state for table columns.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The single active sort of a table.
///
/// A table has at most one of these; "no sort" is `None` wherever a
/// `SortState` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column key being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates an ascending sort on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Computes the sort state after a header click on `key`.
///
/// Clicking the sorted column cycles asc, desc, unsorted. Clicking any other
/// column starts over at ascending.
pub fn next_sort(current: Option<&SortState>, key: &str) -> Option<SortState> {
    match current {
        Some(sort) if sort.key == key => match sort.direction {
            SortDirection::Asc => Some(SortState::desc(key)),
            SortDirection::Desc => None,
        },
        _ => Some(SortState::asc(key)),
    }
}
