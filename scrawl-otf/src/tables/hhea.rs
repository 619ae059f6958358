//! The hhea table.

use font_types::Tag;

use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"hhea");

#[derive(Clone, Copy, Debug)]
pub(crate) struct Hhea {
    pub(crate) ascender: i16,
    /// Stored as a negative magnitude, per convention.
    pub(crate) descender: i16,
    pub(crate) advance_width_max: u16,
    pub(crate) min_left_side_bearing: i16,
    pub(crate) min_right_side_bearing: i16,
    pub(crate) x_max_extent: i16,
    pub(crate) caret_slope_rise: i16,
    pub(crate) caret_slope_run: i16,
    pub(crate) number_of_h_metrics: u16,
}

impl Hhea {
    pub(crate) fn compile(&self) -> Vec<u8> {
        let mut table = TableBuffer::new();
        table.write_fixed(1.0); // version
        table.write_i16(self.ascender);
        table.write_i16(self.descender);
        table.write_i16(0); // lineGap
        table.write_u16(self.advance_width_max);
        table.write_i16(self.min_left_side_bearing);
        table.write_i16(self.min_right_side_bearing);
        table.write_i16(self.x_max_extent);
        table.write_i16(self.caret_slope_rise);
        table.write_i16(self.caret_slope_run);
        table.write_i16(0); // caretOffset
        for _ in 0..4 {
            table.write_i16(0); // reserved
        }
        table.write_i16(0); // metricDataFormat
        table.write_u16(self.number_of_h_metrics);
        table.finish()
    }
}
