use super::fields::{ParsedFields, ParsedFieldsMut};
use super::layout::{size_cells, Cell, FieldSpan};

/// Read-only view of one line record: `[length][start0][len0]...`.
///
/// The view borrows caller memory and never allocates.
#[derive(Debug, Clone, Copy)]
pub struct LineRecord<'a> {
    cells: &'a [Cell],
    component_count: usize,
}

impl<'a> LineRecord<'a> {
    /// Wraps the first `size_cells(component_count)` cells of `buffer`.
    ///
    /// # Panics
    /// Panics if `buffer` is shorter than the record.
    #[inline]
    pub fn view(buffer: &'a [Cell], component_count: usize) -> Self {
        let size = size_cells(component_count);
        debug_assert!(
            buffer.len() >= size,
            "record buffer too small: {} cells, need {}",
            buffer.len(),
            size
        );
        Self {
            cells: &buffer[..size],
            component_count,
        }
    }

    /// Character count of the raw line text.
    #[inline]
    pub fn length(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    #[inline]
    pub fn fields(&self) -> ParsedFields<'a> {
        let cells: &'a [Cell] = self.cells;
        ParsedFields::view(&cells[1..], self.component_count)
    }

    #[inline]
    pub fn all_components_length(&self) -> Cell {
        self.fields().all_components_length(self.component_count)
    }

    /// The record's cells, exactly `size_cells(component_count)` long.
    #[inline]
    pub fn as_cells(&self) -> &'a [Cell] {
        self.cells
    }
}

/// Mutable view of one line record.
#[derive(Debug)]
pub struct LineRecordMut<'a> {
    cells: &'a mut [Cell],
    component_count: usize,
}

impl<'a> LineRecordMut<'a> {
    #[inline]
    pub fn view(buffer: &'a mut [Cell], component_count: usize) -> Self {
        let size = size_cells(component_count);
        debug_assert!(buffer.len() >= size);
        Self {
            cells: &mut buffer[..size],
            component_count,
        }
    }

    /// In-place access to the line length cell.
    #[inline]
    pub fn length_mut(&mut self) -> &mut Cell {
        &mut self.cells[0]
    }

    #[inline]
    pub fn fields_mut(&mut self) -> ParsedFieldsMut<'_> {
        ParsedFieldsMut::view(&mut self.cells[1..], self.component_count)
    }

    pub fn as_record(&self) -> LineRecord<'_> {
        LineRecord::view(self.cells, self.component_count)
    }
}

/// Writes a full record into the front of `buffer` and returns the number of
/// cells written.
///
/// # Panics
/// Panics if `buffer` is shorter than `size_cells(spans.len())`.
pub fn encode_record(buffer: &mut [Cell], line_length: Cell, spans: &[FieldSpan]) -> usize {
    let mut record = LineRecordMut::view(buffer, spans.len());
    *record.length_mut() = line_length;
    let mut fields = record.fields_mut();
    for (index, span) in spans.iter().enumerate() {
        fields.set(index, *span);
    }
    size_cells(spans.len())
}
