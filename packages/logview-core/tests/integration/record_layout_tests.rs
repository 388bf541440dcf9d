//! Layout properties of records built from realistic lines.

use logview_core::chain::LineChain;
use logview_core::parser::ingest_lines;
use logview_core::record::{
    size_cells, size_storage_units, LineRecord, NODE_ALIGNMENT, UNITS_PER_CELL,
};
use ntest::timeout;

use super::helpers::{expected_fields, log_line, SpaceParser};

#[timeout(2000)]
#[test]
fn test_chain_links_follow_footprints() {
    let lines: Vec<String> = (0..2_000).map(log_line).collect();
    let mut chain = LineChain::new(3);
    let summary =
        ingest_lines(&SpaceParser, &mut chain, lines.iter().map(String::as_str)).unwrap();
    assert_eq!(summary.appended, 2_000);
    assert_eq!(summary.rejected, 0);

    let mut start = 0usize;
    let mut walked = 0usize;
    for node in chain.iter() {
        assert_eq!(start % NODE_ALIGNMENT, 0);
        assert_eq!(chain.node_at_offset(start).as_cells(), node.as_cells());
        if node.next_node_offset() != 0 {
            assert_eq!(node.next_node_offset() as usize, node.total_footprint_aligned());
        }
        start += node.total_footprint_aligned();
        walked += 1;
    }
    assert_eq!(walked, 2_000);
    assert_eq!(start, chain.storage_units());
}

#[timeout(2000)]
#[test]
fn test_records_decode_from_arena_cells() {
    let lines: Vec<String> = (0..50).map(log_line).collect();
    let mut chain = LineChain::new(3);
    ingest_lines(&SpaceParser, &mut chain, lines.iter().map(String::as_str)).unwrap();

    for (n, line) in lines.iter().enumerate() {
        let node = chain.node(n).unwrap();
        // The record inside a node is an ordinary record view.
        let record = LineRecord::view(&node.as_cells()[1..], 3);
        assert_eq!(record.as_cells().len(), size_cells(3));
        assert_eq!(record.length() as usize, line.encode_utf16().count());

        let fields = record.fields();
        let units: Vec<u16> = line.encode_utf16().collect();
        for (i, expected) in expected_fields(n).iter().enumerate() {
            let slice = fields.slice(&units, i);
            assert_eq!(&String::from_utf16(slice).unwrap(), expected);
            assert_eq!(&node.field_text(i), expected);
        }
        assert_eq!(record.all_components_length() as usize, units.len());
    }
}

#[timeout(1000)]
#[test]
fn test_storage_unit_sizes_are_cell_multiples() {
    for count in 0..16 {
        assert_eq!(size_storage_units(count) % UNITS_PER_CELL, 0);
    }
}
