//! Per-character glyph records.

use serde::{Deserialize, Serialize};

use crate::outline::Outline;
use crate::transform::{GlyphTransform, StyleVariant};

/// Advance width assumed for characters with no stored metrics.
pub const DEFAULT_ADVANCE: f64 = 600.0;
/// Side bearing assumed for characters with no stored metrics.
pub const DEFAULT_SIDE_BEARING: f64 = 100.0;

/// One character's artwork, transform, and horizontal metrics.
///
/// `outline` stays `None` until artwork is supplied; attaching artwork
/// replaces the whole outline rather than editing it. Metrics are design
/// units. Nothing here enforces `advance_width >= left + right bearing`;
/// consumers clamp where their own formulas need it.
///
/// The three alignment flags record which automatic alignment was last
/// applied. They are informational and never read back into geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub ch: char,
    #[serde(default)]
    pub outline: Option<Outline>,
    #[serde(default)]
    pub transform: GlyphTransform,
    #[serde(default = "default_advance")]
    pub advance_width: f64,
    #[serde(default = "default_side_bearing")]
    pub left_bearing: f64,
    #[serde(default = "default_side_bearing")]
    pub right_bearing: f64,
    #[serde(default)]
    pub lock_cap_height: bool,
    #[serde(default)]
    pub lock_x_height: bool,
    #[serde(default)]
    pub normalize_center: bool,
}

fn default_advance() -> f64 {
    DEFAULT_ADVANCE
}

fn default_side_bearing() -> f64 {
    DEFAULT_SIDE_BEARING
}

impl GlyphRecord {
    /// A fresh record with no artwork, an identity transform, and default
    /// metrics.
    pub fn new(ch: char) -> Self {
        GlyphRecord {
            ch,
            outline: None,
            transform: GlyphTransform::default(),
            advance_width: DEFAULT_ADVANCE,
            left_bearing: DEFAULT_SIDE_BEARING,
            right_bearing: DEFAULT_SIDE_BEARING,
            lock_cap_height: false,
            lock_x_height: false,
            normalize_center: false,
        }
    }

    /// The outline with this record's transform applied under `style`, or
    /// `None` when no artwork has been supplied.
    pub fn styled_outline(&self, style: StyleVariant) -> Option<Outline> {
        self.outline
            .as_ref()
            .map(|outline| self.transform.apply(outline, style))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_record_defaults() {
        let record = GlyphRecord::new('A');
        assert_eq!('A', record.ch);
        assert_eq!(None, record.outline);
        assert_eq!(GlyphTransform::default(), record.transform);
        assert_eq!(
            (600.0, 100.0, 100.0),
            (record.advance_width, record.left_bearing, record.right_bearing)
        );
        assert!(!record.lock_cap_height && !record.lock_x_height && !record.normalize_center);
    }

    #[test]
    fn partial_record_deserializes_with_defaults() {
        let record: GlyphRecord = serde_json::from_str(r#"{"ch": "Q"}"#).unwrap();
        assert_eq!(GlyphRecord::new('Q'), record);
    }

    #[test]
    fn present_fields_survive_deserialization() {
        let record: GlyphRecord =
            serde_json::from_str(r#"{"ch": "i", "advance_width": 250.0, "left_bearing": 40.0}"#)
                .unwrap();
        assert_eq!(250.0, record.advance_width);
        assert_eq!(40.0, record.left_bearing);
        assert_eq!(100.0, record.right_bearing);
    }

    #[test]
    fn styled_outline_needs_artwork() {
        let mut record = GlyphRecord::new('o');
        assert_eq!(None, record.styled_outline(StyleVariant::Regular));
        record.outline = Some(Outline::from_svg_path("M0 0L10 0L10 10L0 10Z").unwrap());
        record.transform.scale = 2.0;
        let styled = record.styled_outline(StyleVariant::Regular).unwrap();
        assert_eq!("M0,0 L20,0 L20,20 L0,20 Z", styled.to_svg());
    }
}
