//! Append-only arena of chained line record nodes.
//!
//! All nodes live in one growable cell buffer. Each node starts with the
//! displacement (in storage units) to its successor, so the chain can be
//! walked without any side structure; appending never relocates the
//! contents of earlier nodes.

use crate::error::LogViewError;
use crate::record::{
    encode_record, node_footprint_cells, validate_fields, Cell, FieldSpan, LineRecordNode,
    LineRecordNodeMut, StorageUnit, CELL_WIDTH, UNITS_PER_CELL,
};

/// Arena holding one node per appended line.
#[derive(Debug, Clone)]
pub struct LineChain {
    /// Backing cell buffer
    cells: Vec<Cell>,
    /// Components per line, fixed for the chain
    component_count: usize,
    /// Cell index of each node, by line number
    starts: Vec<usize>,
}

impl LineChain {
    /// Creates an empty chain for lines with `component_count` fields.
    pub fn new(component_count: usize) -> Self {
        Self {
            cells: Vec::new(),
            component_count,
            starts: Vec::new(),
        }
    }

    /// Creates an empty chain with room for `cells` cells.
    pub fn with_capacity(component_count: usize, cells: usize) -> Self {
        Self {
            cells: Vec::with_capacity(cells),
            component_count,
            starts: Vec::new(),
        }
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Number of lines in the chain.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Appends a line and its field spans.
    ///
    /// `raw` is the full line in storage units; the node keeps the text up to
    /// the end of the last field. Spans are validated here, since the record
    /// accessors trust them.
    ///
    /// # Returns
    /// Offset of the new node from the start of the arena, in storage units.
    pub fn append(
        &mut self,
        raw: &[StorageUnit],
        spans: &[FieldSpan],
    ) -> Result<usize, LogViewError> {
        if spans.len() != self.component_count {
            return Err(LogViewError::ComponentCountMismatch {
                expected: self.component_count,
                got: spans.len(),
            });
        }
        let line_length =
            Cell::try_from(raw.len()).map_err(|_| LogViewError::LineTooLong { length: raw.len() })?;
        validate_fields(line_length, spans)?;

        let payload_len = spans.last().map(|s| s.end() as usize).unwrap_or(0);
        let start = self.cells.len();
        let link = match self.starts.last() {
            Some(&previous) => Some((
                previous,
                Cell::try_from((start - previous) * UNITS_PER_CELL)
                    .map_err(|_| LogViewError::LineTooLong { length: raw.len() })?,
            )),
            None => None,
        };

        let footprint = node_footprint_cells(self.component_count, payload_len);
        self.cells.resize(start + footprint, 0);

        let mut node = LineRecordNodeMut::view(&mut self.cells[start..], self.component_count);
        encode_record(node.record_cells_mut(), line_length, spans);
        node.write_payload(&raw[..payload_len]);

        if let Some((previous, link)) = link {
            self.cells[previous] = link;
        }
        self.starts.push(start);

        Ok(start * UNITS_PER_CELL)
    }

    /// Appends a UTF-8 line. Spans are in UTF-16 storage units.
    pub fn append_str(&mut self, line: &str, spans: &[FieldSpan]) -> Result<usize, LogViewError> {
        let raw: Vec<StorageUnit> = line.encode_utf16().collect();
        self.append(&raw, spans)
    }

    /// Node for line `line`.
    pub fn node(&self, line: usize) -> Option<LineRecordNode<'_>> {
        let start = *self.starts.get(line)?;
        Some(LineRecordNode::view(&self.cells[start..], self.component_count))
    }

    /// Node at an arena offset in storage units, as returned by `append`.
    ///
    /// The offset must be the start of a node.
    pub fn node_at_offset(&self, offset: usize) -> LineRecordNode<'_> {
        debug_assert_eq!(offset % UNITS_PER_CELL, 0, "misaligned node offset");
        LineRecordNode::view(&self.cells[offset / UNITS_PER_CELL..], self.component_count)
    }

    /// Length in storage units of line `line`.
    pub fn line_length(&self, line: usize) -> Option<Cell> {
        self.node(line).map(|node| node.record().length())
    }

    /// Text of field `field` on line `line`.
    pub fn field_text(&self, line: usize, field: usize) -> Option<String> {
        if field >= self.component_count {
            return None;
        }
        self.node(line).map(|node| node.field_text(field))
    }

    /// Walks the chain through its forward links.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            next: if self.is_empty() { None } else { Some(0) },
        }
    }

    /// Arena size in cells.
    pub fn cells_len(&self) -> usize {
        self.cells.len()
    }

    /// Arena size in storage units.
    pub fn storage_units(&self) -> usize {
        self.cells.len() * UNITS_PER_CELL
    }

    /// Arena size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.cells.len() * CELL_WIDTH
    }

    /// Raw arena cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Iterator following `next_node_offset` links from the head node.
#[derive(Debug, Clone)]
pub struct ChainIter<'a> {
    chain: &'a LineChain,
    /// Cell index of the next node to yield
    next: Option<usize>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = LineRecordNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let chain: &'a LineChain = self.chain;
        let node = LineRecordNode::view(&chain.cells[start..], chain.component_count);
        self.next = match node.next_node_offset() {
            0 => None,
            link => Some(start + link as usize / UNITS_PER_CELL),
        };
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NODE_ALIGNMENT;
    use ntest::timeout;

    fn spans(pairs: &[(Cell, Cell)]) -> Vec<FieldSpan> {
        pairs.iter().map(|&(s, l)| FieldSpan::new(s, l)).collect()
    }

    fn sample_chain() -> LineChain {
        let mut chain = LineChain::new(2);
        chain
            .append_str("INFO boot", &spans(&[(0, 4), (5, 4)]))
            .unwrap();
        chain
            .append_str("WARN low disk space", &spans(&[(0, 4), (5, 14)]))
            .unwrap();
        chain.append_str("ERR x", &spans(&[(0, 3), (4, 1)])).unwrap();
        chain
    }

    #[test]
    #[timeout(1000)]
    fn test_new_chain() {
        let chain = LineChain::new(3);
        assert!(chain.is_empty());
        assert_eq!(chain.component_count(), 3);
        assert_eq!(chain.cells_len(), 0);
        assert!(chain.node(0).is_none());
        assert_eq!(chain.iter().count(), 0);
    }

    #[test]
    #[timeout(1000)]
    fn test_append_and_read() {
        let chain = sample_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.line_length(0), Some(9));
        assert_eq!(chain.line_length(1), Some(19));
        assert_eq!(chain.field_text(0, 1).as_deref(), Some("boot"));
        assert_eq!(chain.field_text(1, 0).as_deref(), Some("WARN"));
        assert_eq!(chain.field_text(1, 1).as_deref(), Some("low disk space"));
        assert_eq!(chain.field_text(2, 1).as_deref(), Some("x"));
        assert_eq!(chain.field_text(2, 2), None);
        assert_eq!(chain.field_text(3, 0), None);
    }

    #[test]
    #[timeout(1000)]
    fn test_links_match_footprints() {
        let chain = sample_chain();
        let nodes: Vec<_> = chain.iter().collect();
        assert_eq!(nodes.len(), chain.len());

        let mut start = 0usize;
        for (line, node) in nodes.iter().enumerate() {
            assert_eq!(chain.node_at_offset(start).as_cells(), node.as_cells());
            if line + 1 < nodes.len() {
                let link = node.next_node_offset() as usize;
                assert_eq!(link, node.total_footprint_aligned());
                assert_eq!(link % NODE_ALIGNMENT, 0);
                start += link;
            } else {
                assert_eq!(node.next_node_offset(), 0);
                assert_eq!(start + node.total_footprint_aligned(), chain.storage_units());
            }
        }
    }

    #[test]
    #[timeout(1000)]
    fn test_append_returns_node_offsets() {
        let mut chain = LineChain::new(1);
        let first = chain.append_str("abc", &spans(&[(0, 3)])).unwrap();
        let second = chain.append_str("de", &spans(&[(0, 2)])).unwrap();
        assert_eq!(first, 0);
        // link 2 + record 6 + payload 3, aligned to 12
        assert_eq!(second, 12);
        assert_eq!(chain.node_at_offset(second).field_text(0), "de");
        assert_eq!(chain.size_bytes(), chain.cells_len() * 4);
    }

    #[test]
    #[timeout(1000)]
    fn test_payload_stops_at_last_field() {
        let mut chain = LineChain::new(1);
        chain
            .append_str("LEVEL and a long unparsed tail", &spans(&[(0, 5)]))
            .unwrap();
        let node = chain.node(0).unwrap();
        assert_eq!(node.record().length(), 30);
        assert_eq!(node.payload_len(), 5);
    }

    #[test]
    #[timeout(1000)]
    fn test_append_rejects_bad_spans() {
        let mut chain = LineChain::new(2);
        let err = chain.append_str("abc", &spans(&[(0, 1)])).unwrap_err();
        assert!(matches!(
            err,
            LogViewError::ComponentCountMismatch {
                expected: 2,
                got: 1
            }
        ));

        let err = chain
            .append_str("abc", &spans(&[(0, 2), (1, 2)]))
            .unwrap_err();
        assert!(matches!(err, LogViewError::InvalidField { index: 1, .. }));

        let err = chain
            .append_str("abc", &spans(&[(0, 1), (2, 5)]))
            .unwrap_err();
        assert!(matches!(err, LogViewError::InvalidField { .. }));

        // Failed appends leave the arena untouched.
        assert!(chain.is_empty());
        assert_eq!(chain.cells_len(), 0);
    }

    #[test]
    #[timeout(1000)]
    fn test_zero_component_chain() {
        let mut chain = LineChain::new(0);
        chain.append_str("anything", &[]).unwrap();
        chain.append_str("", &[]).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.line_length(0), Some(8));
        assert_eq!(chain.node(0).unwrap().payload_len(), 0);
        assert_eq!(chain.iter().count(), 2);
    }

    #[test]
    #[timeout(1000)]
    fn test_earlier_nodes_stable_across_appends() {
        let mut chain = LineChain::new(1);
        chain.append_str("first", &spans(&[(0, 5)])).unwrap();
        let before = chain.node(0).unwrap().as_cells()[1..].to_vec();
        for i in 0..100 {
            let line = format!("line {i}");
            let len = line.len() as Cell;
            chain.append_str(&line, &spans(&[(0, len)])).unwrap();
        }
        // Only the link cell of the first node changes.
        assert_eq!(chain.node(0).unwrap().as_cells()[1..], before[..]);
        assert_eq!(chain.field_text(0, 0).as_deref(), Some("first"));
        assert_eq!(chain.field_text(100, 0).as_deref(), Some("line 99"));
        assert_eq!(chain.iter().count(), 101);
    }
}
