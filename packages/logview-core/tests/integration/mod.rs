//! Integration tests across the codec, the node chain and the paged view.
//!
//! 1. Record layout over realistic log lines
//! 2. Paging a chain-backed source, including streaming growth

pub mod helpers;
pub mod paging_tests;
pub mod record_layout_tests;
