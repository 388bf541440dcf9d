use super::layout::{
    align_up, size_cells, size_storage_units, Cell, StorageUnit, NODE_ALIGNMENT, UNITS_PER_CELL,
};
use super::line_record::{LineRecord, LineRecordMut};

/// Cell index of the line record inside a node.
const RECORD_CELL: usize = 1;

/// Total node footprint in storage units for a record whose fields end at
/// `payload_len`: link cell, record, payload, rounded up to the alignment.
#[inline]
pub const fn node_footprint_units(component_count: usize, payload_len: usize) -> usize {
    align_up(
        UNITS_PER_CELL + size_storage_units(component_count) + payload_len,
        NODE_ALIGNMENT,
    )
}

/// Node footprint in whole cells.
#[inline]
pub const fn node_footprint_cells(component_count: usize, payload_len: usize) -> usize {
    node_footprint_units(component_count, payload_len) / UNITS_PER_CELL
}

#[inline]
fn payload_offset(component_count: usize) -> usize {
    RECORD_CELL + size_cells(component_count)
}

#[inline]
fn unit_at(payload: &[Cell], index: usize) -> StorageUnit {
    let cell = payload[index / UNITS_PER_CELL] as u32;
    if index % UNITS_PER_CELL == 0 {
        cell as StorageUnit
    } else {
        (cell >> 16) as StorageUnit
    }
}

/// Read-only view of a line record node.
///
/// Layout, in cells: `[next_node_offset][line record][payload]`. The payload
/// holds the raw line text up to the end of the last field, packed two
/// storage units per cell, low half first.
#[derive(Debug, Clone, Copy)]
pub struct LineRecordNode<'a> {
    cells: &'a [Cell],
    component_count: usize,
}

impl<'a> LineRecordNode<'a> {
    /// Wraps the node starting at the front of `buffer`.
    pub fn view(buffer: &'a [Cell], component_count: usize) -> Self {
        let record = LineRecord::view(&buffer[RECORD_CELL..], component_count);
        let payload_len = record.all_components_length() as usize;
        let footprint = node_footprint_cells(component_count, payload_len);
        debug_assert!(buffer.len() >= footprint, "node buffer truncated");
        Self {
            cells: &buffer[..footprint],
            component_count,
        }
    }

    /// Displacement to the next node in storage units; 0 for the tail.
    #[inline]
    pub fn next_node_offset(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn record(&self) -> LineRecord<'a> {
        let cells: &'a [Cell] = self.cells;
        LineRecord::view(&cells[RECORD_CELL..], self.component_count)
    }

    /// Payload length in storage units.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.record().all_components_length() as usize
    }

    /// Record plus payload, in storage units.
    #[inline]
    pub fn payload_inclusive_size(&self) -> usize {
        size_storage_units(self.component_count) + self.payload_len()
    }

    /// Distance in storage units from this node's start to the next node's.
    #[inline]
    pub fn total_footprint_aligned(&self) -> usize {
        align_up(UNITS_PER_CELL + self.payload_inclusive_size(), NODE_ALIGNMENT)
    }

    #[inline]
    pub fn payload_unit(&self, index: usize) -> StorageUnit {
        debug_assert!(index < self.payload_len());
        unit_at(&self.cells[payload_offset(self.component_count)..], index)
    }

    pub fn payload_units(&self) -> impl Iterator<Item = StorageUnit> + 'a {
        let cells: &'a [Cell] = self.cells;
        let payload = &cells[payload_offset(self.component_count)..];
        (0..self.payload_len()).map(move |i| unit_at(payload, i))
    }

    /// Storage units of field `index`, read from the node's own payload.
    pub fn field_units(&self, index: usize) -> impl Iterator<Item = StorageUnit> + 'a {
        let cells: &'a [Cell] = self.cells;
        let payload = &cells[payload_offset(self.component_count)..];
        let range = self.record().fields().range(index);
        range.map(move |i| unit_at(payload, i))
    }

    /// Decodes field `index` as text, replacing unpaired surrogates.
    pub fn field_text(&self, index: usize) -> String {
        char::decode_utf16(self.field_units(index))
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    #[inline]
    pub fn as_cells(&self) -> &'a [Cell] {
        self.cells
    }
}

/// Mutable view of a line record node.
#[derive(Debug)]
pub struct LineRecordNodeMut<'a> {
    cells: &'a mut [Cell],
    component_count: usize,
}

impl<'a> LineRecordNodeMut<'a> {
    /// Wraps a node slot; unlike the read view this does not trim to the
    /// footprint, since the record may not be written yet.
    pub fn view(buffer: &'a mut [Cell], component_count: usize) -> Self {
        debug_assert!(buffer.len() >= RECORD_CELL + size_cells(component_count));
        Self {
            cells: buffer,
            component_count,
        }
    }

    #[inline]
    pub fn next_node_offset_mut(&mut self) -> &mut Cell {
        &mut self.cells[0]
    }

    /// Raw cells from the start of the record to the end of the slot.
    #[inline]
    pub fn record_cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[RECORD_CELL..]
    }

    #[inline]
    pub fn record_mut(&mut self) -> LineRecordMut<'_> {
        LineRecordMut::view(&mut self.cells[RECORD_CELL..], self.component_count)
    }

    /// Packs `units` into the payload area and zeroes the padding half-cell.
    ///
    /// # Panics
    /// Panics if the slot is too small for the payload.
    pub fn write_payload(&mut self, units: &[StorageUnit]) {
        let payload = &mut self.cells[payload_offset(self.component_count)..];
        assert!(
            payload.len() * UNITS_PER_CELL >= units.len(),
            "payload of {} units does not fit node slot",
            units.len()
        );
        for (cell, pair) in payload.iter_mut().zip(units.chunks(UNITS_PER_CELL)) {
            let low = pair[0] as u32;
            let high = pair.get(1).copied().unwrap_or(0) as u32;
            *cell = (low | (high << 16)) as Cell;
        }
    }

    pub fn as_node(&self) -> LineRecordNode<'_> {
        LineRecordNode::view(self.cells, self.component_count)
    }
}
