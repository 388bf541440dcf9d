//! Core of a large-log viewer.
//!
//! Provides the packed line-record codec, an append-only arena of chained
//! line records, and a paged virtual sequence that exposes an unbounded
//! range-fetchable source through a bounded page cache.

pub mod chain;
pub mod config;
pub mod error;
pub mod parser;
pub mod record;
pub mod sequence;
pub mod source;

pub use chain::LineChain;
pub use error::LogViewError;
pub use sequence::{ItemSource, PagedSequence};
pub use source::{ChainSource, LineEntry};
