//! The hmtx table.

use font_types::Tag;

use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"hmtx");

/// Builds the table with a full `(advance, left side bearing)` pair per
/// glyph; hhea's numberOfHMetrics must equal the glyph count.
pub(crate) fn build(metrics: &[(u16, i16)]) -> Vec<u8> {
    let mut table = TableBuffer::new();
    for (advance, side_bearing) in metrics {
        table.write_u16(*advance);
        table.write_i16(*side_bearing);
    }
    table.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_long_metric_per_glyph() {
        let table = build(&[(600, 80), (648, -12)]);
        assert_eq!(vec![2, 88, 0, 80, 2, 136, 255, 244], table);
    }
}
