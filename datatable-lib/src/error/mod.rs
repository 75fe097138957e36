//! Error types

mod config;
mod rows;

pub use config::*;
pub use rows::*;
