//! Domain logic for the quanda Q&A forum core.
//!
//! This crate is pure: no I/O, no database types. It holds the pieces the
//! persistence and service layers agree on — id/timestamp aliases, the
//! error taxonomy, search query parsing, and question ordering.

pub mod content;
pub mod error;
pub mod order;
pub mod search;
pub mod types;

pub use error::CoreError;
