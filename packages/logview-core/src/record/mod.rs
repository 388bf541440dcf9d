//! Line record codec.
//!
//! A line record packs the metadata of one log line into a flat run of
//! integer cells:
//!
//! ```text
//! [0]        line length (storage units)
//! [1 .. 2k]  k field descriptors, each (start, length)
//! ```
//!
//! Views in this module borrow caller-owned buffers and never allocate or
//! copy. Preconditions on hot accessors (field index, buffer size) are only
//! checked by debug assertions.

mod fields;
mod layout;
mod line_record;
mod node;

pub use fields::{ParsedFields, ParsedFieldsMut};
pub use layout::{
    align_up, size_cells, size_storage_units, validate_fields, Cell, FieldSpan, StorageUnit,
    CELL_WIDTH, NODE_ALIGNMENT, STORAGE_UNIT_WIDTH, UNITS_PER_CELL,
};
pub use line_record::{encode_record, LineRecord, LineRecordMut};
pub use node::{node_footprint_cells, node_footprint_units, LineRecordNode, LineRecordNodeMut};
