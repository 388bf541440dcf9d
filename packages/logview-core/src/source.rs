//! Item source over a shared line chain.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::chain::LineChain;
use crate::error::LogViewError;
use crate::record::Cell;
use crate::sequence::ItemSource;

/// Decoded view of one line, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEntry {
    /// Zero-based line number
    pub line: usize,
    /// Raw line length in storage units
    pub length: Cell,
    /// Field texts, in format order
    pub fields: Vec<String>,
}

/// `ItemSource` that decodes lines out of a `LineChain`.
///
/// The chain is shared, so a producer can keep appending while a
/// `PagedSequence` reads; the count grows accordingly.
#[derive(Debug, Clone)]
pub struct ChainSource {
    chain: Arc<RwLock<LineChain>>,
}

impl ChainSource {
    pub fn new(chain: LineChain) -> Self {
        Self {
            chain: Arc::new(RwLock::new(chain)),
        }
    }

    pub fn from_shared(chain: Arc<RwLock<LineChain>>) -> Self {
        Self { chain }
    }

    /// Handle for appending to the underlying chain.
    pub fn shared(&self) -> Arc<RwLock<LineChain>> {
        Arc::clone(&self.chain)
    }
}

impl ItemSource for ChainSource {
    type Item = LineEntry;

    fn count(&self) -> usize {
        self.chain.read().len()
    }

    fn fetch(&self, start: usize, count: usize) -> Result<Vec<LineEntry>, LogViewError> {
        let chain = self.chain.read();
        let end = start
            .checked_add(count)
            .filter(|&end| end <= chain.len())
            .ok_or(LogViewError::IndexOutOfRange {
                index: start.saturating_add(count),
                count: chain.len(),
            })?;

        let component_count = chain.component_count();
        let mut entries = Vec::with_capacity(count);
        for line in start..end {
            let Some(node) = chain.node(line) else {
                return Err(LogViewError::IndexOutOfRange {
                    index: line,
                    count: chain.len(),
                });
            };
            entries.push(LineEntry {
                line,
                length: node.record().length(),
                fields: (0..component_count).map(|i| node.field_text(i)).collect(),
            });
        }
        Ok(entries)
    }
}
