//! The head table.

use font_types::Tag;

use crate::sfnt::TableBuffer;
use crate::tables::glyf::Bbox;

pub(crate) const TAG: Tag = Tag::new(b"head");

const MAGIC: u32 = 0x5F0F_3CF5;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Head {
    pub(crate) units_per_em: u16,
    pub(crate) bbox: Bbox,
    /// Bit 0 bold, bit 1 italic.
    pub(crate) mac_style: u16,
}

impl Head {
    pub(crate) fn compile(&self) -> Vec<u8> {
        let mut table = TableBuffer::new();
        table.write_fixed(1.0); // version
        table.write_fixed(1.0); // fontRevision
        table.write_u32(0); // checksumAdjustment, patched during assembly
        table.write_u32(MAGIC);
        table.write_u16(0x0003); // baseline at y 0, left sidebearing at x 0
        table.write_u16(self.units_per_em);
        // created and modified stay at the epoch so identical projects
        // compile to identical bytes
        table.write_i64(0);
        table.write_i64(0);
        table.write_i16(self.bbox.x_min);
        table.write_i16(self.bbox.y_min);
        table.write_i16(self.bbox.x_max);
        table.write_i16(self.bbox.y_max);
        table.write_u16(self.mac_style);
        table.write_u16(6); // lowestRecPPEM
        table.write_i16(2); // fontDirectionHint
        table.write_i16(1); // indexToLocFormat: long loca offsets
        table.write_i16(0); // glyphDataFormat
        table.finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_fields_land_at_documented_offsets() {
        let head = Head {
            units_per_em: 1000,
            bbox: Bbox {
                x_min: -10,
                y_min: -200,
                x_max: 900,
                y_max: 800,
            },
            mac_style: 0x0003,
        }
        .compile();
        assert_eq!(54, head.len());
        assert_eq!(&0x0001_0000_u32.to_be_bytes(), &head[0..4]);
        assert_eq!(&[0; 4], &head[8..12]); // adjustment placeholder
        assert_eq!(&MAGIC.to_be_bytes(), &head[12..16]);
        assert_eq!(&[0x03, 0xE8], &head[18..20]); // unitsPerEm
        assert_eq!((-200_i16).to_be_bytes(), [head[38], head[39]]); // yMin
        assert_eq!(&[0, 3], &head[44..46]); // macStyle
        assert_eq!(&[0, 1], &head[50..52]); // indexToLocFormat
    }
}
