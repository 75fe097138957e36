//! Data table state library
//!
//! The model half of a sortable, filterable, paginated data table: rows go
//! through filter, sort and paginate stages, and selection is tracked by row
//! identity alongside them. Rendering is left to the host UI.

pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod pagination;
pub mod selection;
pub mod settings;
pub mod sort;

mod table;

pub use events::{EventResult, TableEvent};
pub use model::{Alignment, CellFormat, Column, Formatter, Record, Row, RowIdentity, RowKey, Value};
pub use selection::{CheckState, Selection};
pub use sort::{SortDirection, SortState};
pub use table::*;
