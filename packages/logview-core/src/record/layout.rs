use std::ops::Range;

use crate::error::LogViewError;

/// Fixed-width integer cell holding lengths, offsets and links.
pub type Cell = i32;

/// Character-sized storage unit (UTF-16 code unit).
pub type StorageUnit = u16;

/// Width of a cell in bytes.
pub const CELL_WIDTH: usize = std::mem::size_of::<Cell>();

/// Width of a storage unit in bytes.
pub const STORAGE_UNIT_WIDTH: usize = std::mem::size_of::<StorageUnit>();

/// Storage units covered by one cell.
pub const UNITS_PER_CELL: usize = CELL_WIDTH / STORAGE_UNIT_WIDTH;

/// Alignment of node boundaries, in storage units.
pub const NODE_ALIGNMENT: usize = 2;

/// Size of a line record in cells: one length cell plus two cells per field.
#[inline]
pub const fn size_cells(component_count: usize) -> usize {
    1 + 2 * component_count
}

/// Size of a line record in storage units.
#[inline]
pub const fn size_storage_units(component_count: usize) -> usize {
    size_cells(component_count) * CELL_WIDTH / STORAGE_UNIT_WIDTH
}

/// Rounds `value` up to the next multiple of `alignment` (a power of two).
#[inline]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// Field descriptor: start and length of one component, in storage units
/// relative to the owning line's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FieldSpan {
    pub start: Cell,
    pub length: Cell,
}

impl FieldSpan {
    pub const fn new(start: Cell, length: Cell) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset (`start + length`).
    #[inline]
    pub const fn end(&self) -> Cell {
        self.start + self.length
    }

    /// Span as a slice range. Only meaningful for non-negative spans.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

/// Checks the descriptor invariants for one line.
///
/// Every span must be non-negative and end within the line, and spans must
/// not overlap or go backwards. The codec accessors never check this; callers
/// building records from untrusted parser output should.
pub fn validate_fields(line_length: Cell, spans: &[FieldSpan]) -> Result<(), LogViewError> {
    let mut previous_end = 0;
    for (index, span) in spans.iter().enumerate() {
        let invalid = span.start < 0
            || span.length < 0
            || span.start.checked_add(span.length).is_none()
            || span.end() > line_length
            || span.start < previous_end;
        if invalid {
            return Err(LogViewError::InvalidField {
                index,
                start: span.start,
                length: span.length,
                line_length,
            });
        }
        previous_end = span.end();
    }
    Ok(())
}
