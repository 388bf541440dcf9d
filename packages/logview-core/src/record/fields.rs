use std::ops::Range;

use super::layout::{Cell, FieldSpan};

/// Read-only view over a field descriptor table.
///
/// Cell `2 * i` holds the start of field `i` and cell `2 * i + 1` its length.
#[derive(Debug, Clone, Copy)]
pub struct ParsedFields<'a> {
    cells: &'a [Cell],
    count: usize,
}

impl<'a> ParsedFields<'a> {
    /// Wraps a descriptor table of `count` fields.
    #[inline]
    pub fn view(cells: &'a [Cell], count: usize) -> Self {
        debug_assert!(
            cells.len() >= 2 * count,
            "descriptor table too small: {} cells for {} fields",
            cells.len(),
            count
        );
        Self {
            cells: &cells[..2 * count],
            count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn field_start(&self, index: usize) -> Cell {
        debug_assert!(index < self.count, "field index {index} out of range");
        self.cells[2 * index]
    }

    #[inline]
    pub fn field_length(&self, index: usize) -> Cell {
        debug_assert!(index < self.count, "field index {index} out of range");
        self.cells[2 * index + 1]
    }

    #[inline]
    pub fn span(&self, index: usize) -> FieldSpan {
        FieldSpan::new(self.field_start(index), self.field_length(index))
    }

    #[inline]
    pub fn range(&self, index: usize) -> Range<usize> {
        self.span(index).range()
    }

    /// Borrows the text of field `index` out of the line's raw units.
    #[inline]
    pub fn slice<'t, U>(&self, raw: &'t [U], index: usize) -> &'t [U] {
        &raw[self.range(index)]
    }

    /// Borrows field `index` from UTF-8 text whose spans are byte offsets.
    ///
    /// Returns `None` when the span does not fall on character boundaries.
    #[inline]
    pub fn slice_str<'t>(&self, raw: &'t str, index: usize) -> Option<&'t str> {
        raw.get(self.range(index))
    }

    /// End of the last of the first `count` fields, or 0 when `count` is 0.
    ///
    /// The table does not store the total payload length; it is derived here.
    #[inline]
    pub fn all_components_length(&self, count: usize) -> Cell {
        debug_assert!(count <= self.count);
        match count {
            0 => 0,
            n => self.field_start(n - 1) + self.field_length(n - 1),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldSpan> + 'a {
        let cells = self.cells;
        cells
            .chunks_exact(2)
            .map(|pair| FieldSpan::new(pair[0], pair[1]))
    }
}

/// Mutable view over a field descriptor table.
#[derive(Debug)]
pub struct ParsedFieldsMut<'a> {
    cells: &'a mut [Cell],
    count: usize,
}

impl<'a> ParsedFieldsMut<'a> {
    #[inline]
    pub fn view(cells: &'a mut [Cell], count: usize) -> Self {
        debug_assert!(cells.len() >= 2 * count);
        Self {
            cells: &mut cells[..2 * count],
            count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// In-place access to the start cell of field `index`.
    #[inline]
    pub fn field_start_mut(&mut self, index: usize) -> &mut Cell {
        debug_assert!(index < self.count, "field index {index} out of range");
        &mut self.cells[2 * index]
    }

    /// In-place access to the length cell of field `index`.
    #[inline]
    pub fn field_length_mut(&mut self, index: usize) -> &mut Cell {
        debug_assert!(index < self.count, "field index {index} out of range");
        &mut self.cells[2 * index + 1]
    }

    #[inline]
    pub fn set(&mut self, index: usize, span: FieldSpan) {
        *self.field_start_mut(index) = span.start;
        *self.field_length_mut(index) = span.length;
    }

    pub fn as_fields(&self) -> ParsedFields<'_> {
        ParsedFields::view(self.cells, self.count)
    }
}
