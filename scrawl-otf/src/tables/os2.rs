//! The OS/2 table, version 4.

use font_types::Tag;

use crate::round::OtRound;
use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"OS/2");

pub(crate) const SELECTION_ITALIC: u16 = 0x0001;
pub(crate) const SELECTION_BOLD: u16 = 0x0020;
pub(crate) const SELECTION_REGULAR: u16 = 0x0040;

const VENDOR_ID: Tag = Tag::new(b"SCRW");
const UNICODE_RANGE_BASIC_LATIN: u32 = 1;
const CODE_PAGE_LATIN_1: u32 = 1;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Os2 {
    pub(crate) avg_char_width: i16,
    pub(crate) weight_class: u16,
    pub(crate) selection: u16,
    pub(crate) first_char_index: u16,
    pub(crate) last_char_index: u16,
    pub(crate) typo_ascender: i16,
    /// Negative magnitude, like hhea's descender.
    pub(crate) typo_descender: i16,
    pub(crate) win_ascent: u16,
    pub(crate) win_descent: u16,
    pub(crate) x_height: i16,
    pub(crate) cap_height: i16,
    pub(crate) units_per_em: u16,
}

impl Os2 {
    pub(crate) fn compile(&self) -> Vec<u8> {
        let em = f64::from(self.units_per_em);
        let mut table = TableBuffer::new();
        table.write_u16(4); // version
        table.write_i16(self.avg_char_width);
        table.write_u16(self.weight_class);
        table.write_u16(5); // usWidthClass: medium
        table.write_u16(0); // fsType: installable
        table.write_i16((0.65 * em).ot_round()); // ySubscriptXSize
        table.write_i16((0.6 * em).ot_round()); // ySubscriptYSize
        table.write_i16(0); // ySubscriptXOffset
        table.write_i16((0.075 * em).ot_round()); // ySubscriptYOffset
        table.write_i16((0.65 * em).ot_round()); // ySuperscriptXSize
        table.write_i16((0.6 * em).ot_round()); // ySuperscriptYSize
        table.write_i16(0); // ySuperscriptXOffset
        table.write_i16((0.35 * em).ot_round()); // ySuperscriptYOffset
        table.write_i16((0.05 * em).ot_round()); // yStrikeoutSize
        table.write_i16((0.26 * em).ot_round()); // yStrikeoutPosition
        table.write_i16(0); // sFamilyClass
        table.write_bytes(&[0; 10]); // panose
        table.write_u32(UNICODE_RANGE_BASIC_LATIN);
        table.write_u32(0);
        table.write_u32(0);
        table.write_u32(0);
        table.write_tag(VENDOR_ID);
        table.write_u16(self.selection);
        table.write_u16(self.first_char_index);
        table.write_u16(self.last_char_index);
        table.write_i16(self.typo_ascender);
        table.write_i16(self.typo_descender);
        table.write_i16(0); // sTypoLineGap
        table.write_u16(self.win_ascent);
        table.write_u16(self.win_descent);
        table.write_u32(CODE_PAGE_LATIN_1);
        table.write_u32(0);
        table.write_i16(self.x_height);
        table.write_i16(self.cap_height);
        table.write_u16(0); // usDefaultChar
        table.write_u16(32); // usBreakChar
        table.write_u16(2); // usMaxContext: pair kerning
        table.finish()
    }
}
