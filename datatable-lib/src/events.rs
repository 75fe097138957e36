//! Table event types and callback registry.
//!
//! Every user-driven state change (row click, selection change, sort
//! change) is reported to the registered callbacks after the state has been
//! updated. Events carry the full materialized result, not deltas.

use std::fmt;

use crate::sort::SortState;

// =============================================================================
// Table Event Types
// =============================================================================

/// An event emitted by a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<'a, R> {
    /// The clicked row.
    RowClick(&'a R),
    /// Every selected row present in the row list, in row-list order.
    SelectionChange(Vec<&'a R>),
    /// The new sort, `None` when the table became unsorted.
    SortChange(Option<&'a SortState>),
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of an interaction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing changed (unknown column, empty page, out-of-range row).
    Ignored,
    /// State changed and the matching event was emitted.
    Consumed,
}

impl EventResult {
    /// Check if the interaction changed state.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// =============================================================================
// Callbacks
// =============================================================================

type RowClickHandler<R> = Box<dyn FnMut(&R)>;
type SelectionChangeHandler<R> = Box<dyn FnMut(&[&R])>;
type SortChangeHandler = Box<dyn FnMut(Option<&SortState>)>;

/// Callbacks registered by the parent view.
pub(crate) struct Handlers<R> {
    row_click: Option<RowClickHandler<R>>,
    selection_change: Option<SelectionChangeHandler<R>>,
    sort_change: Option<SortChangeHandler>,
}

impl<R> Default for Handlers<R> {
    fn default() -> Self {
        Self {
            row_click: None,
            selection_change: None,
            sort_change: None,
        }
    }
}

impl<R> Handlers<R> {
    pub(crate) fn set_row_click(&mut self, handler: impl FnMut(&R) + 'static) {
        self.row_click = Some(Box::new(handler));
    }

    pub(crate) fn set_selection_change(&mut self, handler: impl FnMut(&[&R]) + 'static) {
        self.selection_change = Some(Box::new(handler));
    }

    pub(crate) fn set_sort_change(&mut self, handler: impl FnMut(Option<&SortState>) + 'static) {
        self.sort_change = Some(Box::new(handler));
    }

    /// Delivers an event to the matching callback, if one is registered.
    pub(crate) fn dispatch(&mut self, event: TableEvent<'_, R>) {
        match event {
            TableEvent::RowClick(row) => {
                if let Some(handler) = self.row_click.as_mut() {
                    handler(row);
                }
            }
            TableEvent::SelectionChange(rows) => {
                if let Some(handler) = self.selection_change.as_mut() {
                    handler(&rows);
                }
            }
            TableEvent::SortChange(sort) => {
                if let Some(handler) = self.sort_change.as_mut() {
                    handler(sort);
                }
            }
        }
    }
}

impl<R> fmt::Debug for Handlers<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("row_click", &self.row_click.is_some())
            .field("selection_change", &self.selection_change.is_some())
            .field("sort_change", &self.sort_change.is_some())
            .finish()
    }
}
