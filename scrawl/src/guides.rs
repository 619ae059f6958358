//! Horizontal guide lines and the font metrics derived from them.

use serde::{Deserialize, Serialize};

/// Named horizontal guides in design units.
///
/// The design y axis points down, so guides near the top of the em are
/// numerically small and `em_bottom` is the largest. Guides are purely
/// descriptive: automatic alignment and metric derivation read them, but no
/// geometry is clipped or snapped to them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSet {
    pub em_top: f64,
    pub ascender: f64,
    pub cap_height: f64,
    pub x_height: f64,
    pub meanline: f64,
    pub centerline: f64,
    pub baseline: f64,
    pub descender: f64,
    pub em_bottom: f64,
}

impl Default for GuideSet {
    fn default() -> Self {
        GuideSet {
            em_top: 0.0,
            ascender: 150.0,
            cap_height: 200.0,
            x_height: 400.0,
            meanline: 400.0,
            centerline: 500.0,
            baseline: 800.0,
            descender: 950.0,
            em_bottom: 1000.0,
        }
    }
}

impl GuideSet {
    /// Height of the em square, `em_bottom - em_top`.
    pub fn units_per_em(&self) -> f64 {
        self.em_bottom - self.em_top
    }

    /// Distance from the top of the em down to the baseline.
    pub fn ascender(&self) -> f64 {
        self.baseline - self.em_top
    }

    /// Distance from the baseline down to the bottom of the em.
    pub fn descender(&self) -> f64 {
        self.em_bottom - self.baseline
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_guides_make_a_1000_unit_em() {
        let guides = GuideSet::default();
        assert_eq!(1000.0, guides.units_per_em());
        assert_eq!(800.0, guides.ascender());
        assert_eq!(200.0, guides.descender());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let guides: GuideSet = serde_json::from_str(r#"{"baseline": 700.0}"#).unwrap();
        assert_eq!(700.0, guides.baseline);
        assert_eq!(0.0, guides.em_top);
        assert_eq!(700.0, guides.ascender());
        assert_eq!(300.0, guides.descender());
    }
}
