//! The quanda forum service: questions, answers, votes, comments, search.
//!
//! [`Forum`] is the boundary a calling edge service mounts behind its own
//! HTTP and auth layers: plain data in, aggregated plain data or a typed
//! [`ForumError`] out. Transport concerns (status codes, JSON shaping,
//! credentials, rate limiting) stay with the caller.

pub mod error;
pub mod service;

mod aggregate;

pub use error::{ForumError, ForumResult};
pub use service::Forum;
