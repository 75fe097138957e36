//! Table state controller.

use log::debug;

use crate::config::TableConfig;
use crate::events::{EventResult, Handlers, TableEvent};
use crate::model::{Column, Row, RowIdentity, RowKey};
use crate::pagination::{self, DEFAULT_WINDOW, Pagination};
use crate::selection::{CheckState, Selection};
use crate::sort::{self, SortState};

/// What the table body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Rows are being fetched and the current list is stale.
    Loading,
    /// Nothing matches (or there are no rows).
    Empty,
    /// The current page has rows.
    Rows,
}

/// A sortable, filterable, paginated table over rows of type `R`.
///
/// `DataTable<R>` holds the primitive state:
/// - The full row list and column definitions
/// - Search text
/// - Sort state (at most one column)
/// - Page size and current page
/// - Selected row keys
///
/// and derives the views from it on demand:
///
/// ```text
/// rows -> filtered -> sorted -> page_rows
/// ```
///
/// Selection is keyed by [`RowIdentity`] and is independent of the view.
///
/// # Example
///
/// ```
/// use datatable_lib::{Column, DataTable, Record};
///
/// let rows = vec![
///     Record::new().set("name", "b").set("v", 2i64),
///     Record::new().set("name", "a").set("v", 1i64),
///     Record::new().set("name", "c").set("v", 1i64),
/// ];
/// let mut table = DataTable::new(vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("v", "Value").sortable(),
/// ])
/// .with_rows(rows);
///
/// table.toggle_sort("v");
/// let names: Vec<String> = table
///     .page_rows()
///     .iter()
///     .map(|row| table.columns()[0].display(row))
///     .collect();
/// assert_eq!(names, ["a", "c", "b"]);
/// ```
#[derive(Debug)]
pub struct DataTable<R> {
    /// Column definitions.
    columns: Vec<Column<R>>,
    /// The full row list.
    rows: Vec<R>,
    /// Row key function for selection.
    identity: RowIdentity<R>,
    /// Free-text search.
    query: String,
    /// Active sort, if any.
    sort: Option<SortState>,
    /// Page size and current page.
    pagination: Pagination,
    /// Maximum number of page buttons.
    window: usize,
    /// Selected row keys.
    selection: Selection,
    /// Whether the row list is being refreshed.
    loading: bool,
    /// Parent view callbacks.
    handlers: Handlers<R>,
}

impl<R: Row> DataTable<R> {
    /// Create a new empty table with column definitions.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            identity: RowIdentity::default(),
            query: String::new(),
            sort: None,
            pagination: Pagination::default(),
            window: DEFAULT_WINDOW,
            selection: Selection::new(),
            loading: false,
            handlers: Handlers::default(),
        }
    }

    /// Create a table from a validated configuration.
    pub fn from_config(config: &TableConfig) -> Self {
        let columns = config.columns.iter().map(|c| c.to_column()).collect();
        let mut table = Self::new(columns)
            .with_page_size(config.page_size)
            .with_window(config.window);
        if let Some(field) = &config.identity_field {
            table.identity = RowIdentity::field(field.clone());
        }
        table
    }

    /// Set the initial rows.
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the page size. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Pagination::new(page_size);
        self
    }

    /// Set how many page numbers `page_window` returns at most.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Set the row key function used for selection.
    pub fn with_identity(mut self, identity: RowIdentity<R>) -> Self {
        self.identity = identity;
        self
    }

    /// Register the row click callback.
    pub fn on_row_click(&mut self, handler: impl FnMut(&R) + 'static) {
        self.handlers.set_row_click(handler);
    }

    /// Register the selection change callback.
    pub fn on_selection_change(&mut self, handler: impl FnMut(&[&R]) + 'static) {
        self.handlers.set_selection_change(handler);
    }

    /// Register the sort change callback.
    pub fn on_sort_change(&mut self, handler: impl FnMut(Option<&SortState>) + 'static) {
        self.handlers.set_sort_change(handler);
    }

    // -------------------------------------------------------------------------
    // Rows and columns
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Find a column by key.
    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Get the full row list.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Get the number of rows (before filtering).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the row list is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the full row list.
    ///
    /// Sort, query and selection are kept. The current page is re-clamped
    /// into the new page range. Clears the loading flag.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.loading = false;
        let total = self.total_pages();
        self.pagination.reclamp(total);
        debug!("rows replaced: {} rows, page {}", self.rows.len(), self.current_page());
    }

    /// Mark the row list as stale while a refresh is in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// What the body should render.
    pub fn view_state(&self) -> ViewState {
        if self.loading {
            ViewState::Loading
        } else if self.filtered_count() == 0 {
            ViewState::Empty
        } else {
            ViewState::Rows
        }
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Get the search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set the search text. Always returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pagination.reset();
        debug!("query set to {:?}", self.query);
    }

    /// Whether `row` matches the current search text.
    ///
    /// A row matches when any column's display string contains the trimmed
    /// query, ignoring case. A blank query matches everything.
    pub fn matches(&self, row: &R) -> bool {
        let needle = self.query.trim().to_lowercase();
        Self::matches_needle(&self.columns, row, &needle)
    }

    fn matches_needle(columns: &[Column<R>], row: &R, needle: &str) -> bool {
        needle.is_empty()
            || columns
                .iter()
                .any(|col| col.display(row).to_lowercase().contains(needle))
    }

    fn filtered_indices(&self) -> Vec<usize> {
        let needle = self.query.trim().to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| Self::matches_needle(&self.columns, row, &needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows matching the search text, in row-list order.
    pub fn filtered(&self) -> Vec<&R> {
        self.filtered_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Number of rows matching the search text.
    pub fn filtered_count(&self) -> usize {
        self.filtered_indices().len()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the current sort state.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Set the sort state directly. Does not emit `SortChange`.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Clear the sort state. Does not emit `SortChange`.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Header click on column `key`.
    ///
    /// Cycles asc, desc, unsorted on the same column and starts at asc on a
    /// different one. Unknown and non-sortable columns are ignored. The page
    /// is left where it is.
    pub fn toggle_sort(&mut self, key: &str) -> EventResult {
        if !self.column(key).is_some_and(|c| c.sortable) {
            return EventResult::Ignored;
        }
        self.sort = sort::next_sort(self.sort.as_ref(), key);
        debug!("sort on {:?} is now {:?}", key, self.sort);
        self.handlers.dispatch(TableEvent::SortChange(self.sort.as_ref()));
        EventResult::Consumed
    }

    /// Filtered row indices in display order.
    ///
    /// Stable: rows comparing equal keep their filtered order. Rows whose
    /// sort field is missing or null go last in either direction.
    fn sorted_indices(&self) -> Vec<usize> {
        let indices = self.filtered_indices();
        let Some(sort) = &self.sort else {
            return indices;
        };

        let mut keyed: Vec<_> = indices
            .into_iter()
            .map(|i| (i, self.rows[i].field(&sort.key).unwrap_or_default()))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| match (a.is_null(), b.is_null()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => sort.direction.apply(a.compare(b)),
        });
        keyed.into_iter().map(|(i, _)| i).collect()
    }

    /// Filtered rows in display order.
    pub fn sorted(&self) -> Vec<&R> {
        self.sorted_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    /// Number of pages for the filtered rows (zero when nothing matches).
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered_count(), self.page_size())
    }

    /// Page numbers to show around the current page.
    pub fn page_window(&self) -> Vec<usize> {
        pagination::page_window(self.total_pages(), self.current_page(), self.window)
    }

    /// 1-based `(first, last, total)` of the rows shown, for
    /// "showing 11-20 of 23". `None` when nothing matches.
    pub fn page_range(&self) -> Option<(usize, usize, usize)> {
        let count = self.filtered_count();
        let bounds = self.pagination.bounds(count);
        if bounds.is_empty() {
            return None;
        }
        Some((bounds.start + 1, bounds.end, count))
    }

    fn page_indices(&self) -> Vec<usize> {
        let sorted = self.sorted_indices();
        let bounds = self.pagination.bounds(sorted.len());
        sorted[bounds].to_vec()
    }

    /// Rows on the current page, in display order.
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Go to page `page`, clamped into the valid range.
    /// Returns the page actually applied.
    pub fn go_to_page(&mut self, page: isize) -> usize {
        let total = self.total_pages();
        let applied = self.pagination.go_to(page, total);
        debug!("page {} of {}", applied, total.max(1));
        applied
    }

    /// Go to the next page (stays on the last page).
    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page() as isize + 1)
    }

    /// Go to the previous page (stays on page 1).
    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page() as isize - 1)
    }

    /// Go to page 1.
    pub fn first_page(&mut self) -> usize {
        self.go_to_page(1)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> usize {
        self.go_to_page(self.total_pages() as isize)
    }

    // -------------------------------------------------------------------------
    // Rows on the page
    // -------------------------------------------------------------------------

    /// Click on the row at `index` within the current page.
    pub fn click_row(&mut self, index: usize) -> EventResult {
        let Some(&row_index) = self.page_indices().get(index) else {
            return EventResult::Ignored;
        };
        self.handlers.dispatch(TableEvent::RowClick(&self.rows[row_index]));
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Key of the row at `index` in the row list.
    fn key_at(&self, index: usize) -> RowKey {
        self.identity.key(&self.rows[index], index)
    }

    /// Key of `row`.
    ///
    /// With position identity the row must be one of this table's rows (the
    /// same row, per [`Row::same_row`]); any other row has no key.
    pub fn key_of(&self, row: &R) -> Option<RowKey> {
        let index = self.rows.iter().position(|r| r.same_row(row));
        match (&self.identity, index) {
            (RowIdentity::Position, None) => None,
            (identity, index) => Some(identity.key(row, index.unwrap_or(self.rows.len()))),
        }
    }

    fn page_keys(&self) -> Vec<RowKey> {
        self.page_indices()
            .into_iter()
            .map(|i| self.key_at(i))
            .collect()
    }

    /// Get all selected keys (sorted).
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.selection.selected()
    }

    /// Selected rows present in the row list, in row-list order.
    pub fn selected_rows(&self) -> Vec<&R> {
        selected_in(&self.rows, &self.identity, &self.selection)
    }

    /// Check if `row` is selected.
    pub fn is_selected(&self, row: &R) -> bool {
        self.key_of(row)
            .is_some_and(|key| self.selection.is_selected(&key))
    }

    /// Check if the row at `index` on the current page is selected.
    pub fn is_selected_at(&self, index: usize) -> bool {
        self.page_indices()
            .get(index)
            .is_some_and(|&i| self.selection.is_selected(&self.key_at(i)))
    }

    /// Flip the selection of `row`.
    ///
    /// Ignored when `row` has no key (see [`key_of`](Self::key_of)). For
    /// rows borrowed from this table, take the key first with `key_of` and
    /// call [`toggle_key`](Self::toggle_key).
    pub fn toggle_select(&mut self, row: &R) -> EventResult {
        let Some(key) = self.key_of(row) else {
            debug!("toggle ignored: row is not in the table");
            return EventResult::Ignored;
        };
        self.toggle_key(&key)
    }

    /// Flip the selection of the row at `index` on the current page.
    pub fn toggle_select_at(&mut self, index: usize) -> EventResult {
        let Some(&row_index) = self.page_indices().get(index) else {
            return EventResult::Ignored;
        };
        let key = self.key_at(row_index);
        self.toggle_key(&key)
    }

    /// Flip the selection of a row key.
    pub fn toggle_key(&mut self, key: &str) -> EventResult {
        let (added, removed) = self.selection.toggle(key);
        debug!("selection toggled: +{:?} -{:?}", added, removed);
        self.emit_selection();
        EventResult::Consumed
    }

    /// Header checkbox click.
    ///
    /// Deselects the current page if all of it is selected, otherwise
    /// selects all of it. Other pages are untouched. Ignored on an empty page.
    pub fn toggle_all(&mut self) -> EventResult {
        let keys = self.page_keys();
        if keys.is_empty() {
            return EventResult::Ignored;
        }
        let (added, removed) = self.selection.toggle_group(&keys);
        debug!(
            "page {} toggled: {} selected, {} deselected",
            self.current_page(),
            added.len(),
            removed.len()
        );
        self.emit_selection();
        EventResult::Consumed
    }

    /// Deselect everything, on every page.
    pub fn clear_selection(&mut self) -> EventResult {
        if self.selection.is_empty() {
            return EventResult::Ignored;
        }
        let removed = self.selection.clear();
        debug!("selection cleared ({} keys)", removed.len());
        self.emit_selection();
        EventResult::Consumed
    }

    /// True iff the current page has rows and all of them are selected.
    pub fn all_selected(&self) -> bool {
        self.selection.all_of(&self.page_keys())
    }

    /// True iff at least one row on the current page is selected.
    pub fn some_selected(&self) -> bool {
        self.selection.any_of(&self.page_keys())
    }

    /// Header checkbox state for the current page.
    pub fn header_state(&self) -> CheckState {
        self.selection.check_state(&self.page_keys())
    }

    fn emit_selection(&mut self) {
        let rows = selected_in(&self.rows, &self.identity, &self.selection);
        self.handlers.dispatch(TableEvent::SelectionChange(rows));
    }
}

/// Rows whose key is in `selection`, in row-list order.
fn selected_in<'a, R: Row>(
    rows: &'a [R],
    identity: &RowIdentity<R>,
    selection: &Selection,
) -> Vec<&'a R> {
    if selection.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .enumerate()
        .filter(|(i, row)| selection.is_selected(&identity.key(row, *i)))
        .map(|(_, row)| row)
        .collect()
}
