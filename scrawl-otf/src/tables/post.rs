//! The post table, version 3: no glyph name data.

use font_types::Tag;

use crate::round::OtRound;
use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"post");

pub(crate) fn build(italic_angle: f64, units_per_em: u16) -> Vec<u8> {
    let em = f64::from(units_per_em);
    let mut table = TableBuffer::new();
    table.write_u32(0x0003_0000); // version
    table.write_fixed(italic_angle);
    table.write_i16((-0.075 * em).ot_round()); // underlinePosition
    table.write_i16((0.05 * em).ot_round()); // underlineThickness
    table.write_u32(0); // isFixedPitch
    table.write_u32(0); // minMemType42
    table.write_u32(0); // maxMemType42
    table.write_u32(0); // minMemType1
    table.write_u32(0); // maxMemType1
    table.finish()
}
