//! Error handling for kplookup operations
//!
//! The error type is organized across focused modules: type definitions,
//! builder constructors, and display formatting.

mod builders;
mod display;
mod types;

pub use types::{Error, Result};
