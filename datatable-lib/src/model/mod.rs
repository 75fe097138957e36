//! Row model types

mod column;
mod json;
mod record;
mod value;

pub use column::*;
pub use json::*;
pub use record::*;
pub use value::*;
