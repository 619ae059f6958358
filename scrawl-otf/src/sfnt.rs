//! Assembling compiled tables into a binary font.

use std::collections::BTreeMap;

use font_types::Tag;

/// The sfnt version for TrueType outlines.
const SFNT_VERSION: u32 = 0x0001_0000;
/// The value the whole-file checksum is adjusted to reach.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;
/// Position of checksumAdjustment within the head table.
const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

const HEADER_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// A byte buffer for compiling one table, big-endian throughout.
#[derive(Clone, Debug, Default)]
pub(crate) struct TableBuffer {
    data: Vec<u8>,
}

impl TableBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub(crate) fn write_u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn write_i16(&mut self, value: i16) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn write_i64(&mut self, value: i64) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a 16.16 fixed-point value.
    pub(crate) fn write_fixed(&mut self, value: f64) {
        let raw = (value * 65536.0).round() as i32;
        self.data.extend_from_slice(&raw.to_be_bytes());
    }

    pub(crate) fn write_tag(&mut self, tag: Tag) {
        self.data.extend_from_slice(&tag.to_be_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Binary-search header fields carried by several tables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SearchRange {
    pub(crate) search_range: u16,
    pub(crate) entry_selector: u16,
    pub(crate) range_shift: u16,
}

impl SearchRange {
    /// Computes the header fields for `n_items` records of `item_size` bytes.
    pub(crate) fn compute(n_items: usize, item_size: usize) -> Self {
        let entry_selector = n_items.max(1).ilog2();
        let largest_pow2 = 2_usize.pow(entry_selector);
        let search_range = item_size * largest_pow2;
        let range_shift = (n_items * item_size).saturating_sub(search_range);
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// The standard sfnt checksum: a wrapping sum of big-endian 32-bit words,
/// with the tail zero-padded to a word boundary.
pub(crate) fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0_u32;
    let mut words = data.chunks_exact(4);
    for word in &mut words {
        let word: [u8; 4] = word.try_into().unwrap_or_default();
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    let tail = match *words.remainder() {
        [a] => u32::from_be_bytes([a, 0, 0, 0]),
        [a, b] => u32::from_be_bytes([a, b, 0, 0]),
        [a, b, c] => u32::from_be_bytes([a, b, c, 0]),
        _ => 0,
    };
    sum.wrapping_add(tail)
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// Assembles compiled tables into a font binary.
///
/// Tables are laid out in tag order. [`FontBuilder::build`] writes the
/// directory, per-table checksums and padding, then patches the head
/// table's checksumAdjustment so the whole file sums to the magic value.
#[derive(Clone, Debug, Default)]
pub(crate) struct FontBuilder {
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl FontBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a compiled table. Re-adding a tag replaces the earlier data.
    pub(crate) fn add_table(&mut self, tag: Tag, data: Vec<u8>) -> &mut Self {
        self.tables.insert(tag, data);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        const PADDING: [u8; 4] = [0; 4];

        let mut font = TableBuffer::new();
        font.write_u32(SFNT_VERSION);
        font.write_u16(self.tables.len() as u16);
        let computed = SearchRange::compute(self.tables.len(), TABLE_RECORD_LEN);
        font.write_u16(computed.search_range);
        font.write_u16(computed.entry_selector);
        font.write_u16(computed.range_shift);

        let mut offset = HEADER_LEN + TABLE_RECORD_LEN * self.tables.len();
        let mut head_offset = None;
        for (tag, data) in &self.tables {
            if *tag == crate::tables::head::TAG {
                head_offset = Some(offset);
            }
            font.write_tag(*tag);
            font.write_u32(checksum(data));
            font.write_u32(offset as u32);
            font.write_u32(data.len() as u32);
            offset += padded_len(data.len());
        }
        for data in self.tables.values() {
            font.write_bytes(data);
            font.write_bytes(&PADDING[..padded_len(data.len()) - data.len()]);
        }

        let mut font = font.finish();
        if let Some(head_offset) = head_offset {
            let adjustment = CHECKSUM_MAGIC.wrapping_sub(checksum(&font));
            let field = head_offset + CHECKSUM_ADJUSTMENT_OFFSET;
            font[field..field + 4].copy_from_slice(&adjustment.to_be_bytes());
        }
        font
    }
}
