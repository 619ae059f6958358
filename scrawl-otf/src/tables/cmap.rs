//! The cmap table: one format 4 subtable for the Windows BMP encoding.

use font_types::Tag;

use crate::sfnt::{SearchRange, TableBuffer};

pub(crate) const TAG: Tag = Tag::new(b"cmap");

const WINDOWS_PLATFORM: u16 = 3;
const WINDOWS_BMP_ENCODING: u16 = 1;

/// Builds the table from `(codepoint, glyph id)` pairs sorted by codepoint.
///
/// Characters beyond the Basic Multilingual Plane were dropped before
/// glyph ids were assigned, so every codepoint fits in a u16.
pub(crate) fn build(mappings: &[(u16, u16)]) -> Vec<u8> {
    // contiguous codepoints with contiguous glyph ids share a segment
    let mut start_codes = Vec::new();
    let mut end_codes: Vec<u16> = Vec::new();
    let mut id_deltas = Vec::new();
    let mut prev = None;
    for &(code, gid) in mappings {
        if prev == Some((code.wrapping_sub(1), gid.wrapping_sub(1))) {
            if let Some(end) = end_codes.last_mut() {
                *end = code;
            }
        } else {
            start_codes.push(code);
            end_codes.push(code);
            // idDelta arithmetic is modulo 65536
            id_deltas.push((gid as i32 - code as i32).rem_euclid(0x10000) as u16);
        }
        prev = Some((code, gid));
    }
    start_codes.push(0xFFFF);
    end_codes.push(0xFFFF);
    id_deltas.push(1);

    let seg_count = start_codes.len() as u16;
    let computed = SearchRange::compute(start_codes.len(), 2);

    let mut table = TableBuffer::new();
    table.write_u16(0); // version
    table.write_u16(1); // numTables
    table.write_u16(WINDOWS_PLATFORM);
    table.write_u16(WINDOWS_BMP_ENCODING);
    table.write_u32(12); // subtable offset

    table.write_u16(4); // format
    table.write_u16(16 + 8 * seg_count); // length
    table.write_u16(0); // language
    table.write_u16(seg_count * 2);
    table.write_u16(computed.search_range);
    table.write_u16(computed.entry_selector);
    table.write_u16(computed.range_shift);
    for end in &end_codes {
        table.write_u16(*end);
    }
    table.write_u16(0); // reservedPad
    for start in &start_codes {
        table.write_u16(*start);
    }
    for delta in &id_deltas {
        table.write_u16(*delta);
    }
    // idRangeOffsets of zero mean no glyphIdArray is needed
    for _ in 0..seg_count {
        table.write_u16(0);
    }
    table.finish()
}
