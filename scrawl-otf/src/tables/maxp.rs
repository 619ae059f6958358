//! The maxp table, version 1.0.

use font_types::Tag;

use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"maxp");

/// Builds the table. Composite and hinting maxima are zero: the compiler
/// only ever writes unhinted simple glyphs.
pub(crate) fn build(num_glyphs: u16, max_points: u16, max_contours: u16) -> Vec<u8> {
    let mut table = TableBuffer::new();
    table.write_u32(0x0001_0000); // version
    table.write_u16(num_glyphs);
    table.write_u16(max_points);
    table.write_u16(max_contours);
    table.write_u16(0); // maxCompositePoints
    table.write_u16(0); // maxCompositeContours
    table.write_u16(2); // maxZones
    table.write_u16(0); // maxTwilightPoints
    table.write_u16(0); // maxStorage
    table.write_u16(0); // maxFunctionDefs
    table.write_u16(0); // maxInstructionDefs
    table.write_u16(0); // maxStackElements
    table.write_u16(0); // maxSizeOfInstructions
    table.write_u16(0); // maxComponentElements
    table.write_u16(0); // maxComponentDepth
    table.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn version_one_layout() {
        let table = build(3, 12, 2);
        assert_eq!(32, table.len());
        assert_eq!(&[0, 3], &table[4..6]);
        assert_eq!(&[0, 12], &table[6..8]);
        assert_eq!(&[0, 2], &table[8..10]);
        assert_eq!(&[0, 2], &table[14..16]); // maxZones
    }
}
