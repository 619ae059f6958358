//! The kern table: a single horizontal format 0 subtable.

use font_types::Tag;

use crate::sfnt::{SearchRange, TableBuffer};

pub(crate) const TAG: Tag = Tag::new(b"kern");

const COVERAGE_HORIZONTAL: u16 = 0x0001;
const PAIR_LEN: usize = 6;

/// Builds the table from `(left, right, value)` glyph id triples, already
/// sorted for binary search.
pub(crate) fn build(pairs: &[(u16, u16, i16)]) -> Vec<u8> {
    let computed = SearchRange::compute(pairs.len(), PAIR_LEN);
    let mut table = TableBuffer::new();
    table.write_u16(0); // version
    table.write_u16(1); // nTables
    table.write_u16(0); // subtable version
    table.write_u16(14 + (PAIR_LEN * pairs.len()) as u16); // subtable length
    table.write_u16(COVERAGE_HORIZONTAL);
    table.write_u16(pairs.len() as u16);
    table.write_u16(computed.search_range);
    table.write_u16(computed.entry_selector);
    table.write_u16(computed.range_shift);
    for (left, right, value) in pairs {
        table.write_u16(*left);
        table.write_u16(*right);
        table.write_i16(*value);
    }
    table.finish()
}
