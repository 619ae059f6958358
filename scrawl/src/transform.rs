//! Per-glyph geometric transforms and style variants.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::outline::Outline;

/// Extra uniform scale applied by bold styles.
pub const BOLD_SCALE: f64 = 1.12;
/// Shear angle applied by italic styles, in degrees.
pub const ITALIC_ANGLE: f64 = 12.0;

/// The geometric adjustment stored on a glyph record.
///
/// Applied as uniform scale, then style shear, then rotation about the
/// origin, then translation. The identity transform is the default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphTransform {
    pub scale: f64,
    pub rotate_degrees: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for GlyphTransform {
    fn default() -> Self {
        GlyphTransform {
            scale: 1.0,
            rotate_degrees: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// A closed set of export styles; not stored on records, chosen per export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleVariant {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl StyleVariant {
    pub const ALL: [StyleVariant; 4] = [
        StyleVariant::Regular,
        StyleVariant::Bold,
        StyleVariant::Italic,
        StyleVariant::BoldItalic,
    ];

    pub fn is_bold(self) -> bool {
        matches!(self, StyleVariant::Bold | StyleVariant::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, StyleVariant::Italic | StyleVariant::BoldItalic)
    }

    /// The uniform scale this style layers on top of a glyph's own scale.
    pub fn scale_factor(self) -> f64 {
        if self.is_bold() {
            BOLD_SCALE
        } else {
            1.0
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleVariant::Regular => "Regular",
            StyleVariant::Bold => "Bold",
            StyleVariant::Italic => "Italic",
            StyleVariant::BoldItalic => "Bold Italic",
        }
    }
}

impl GlyphTransform {
    /// The combined affine for this transform under `style`.
    ///
    /// Order matters: scale first, then the italic shear
    /// `x' = x + y * tan(12deg)`, then rotation, then translation.
    pub fn affine(&self, style: StyleVariant) -> Affine {
        let mut m = Affine::scale(self.scale * style.scale_factor());
        if style.is_italic() {
            m = Affine::skew(ITALIC_ANGLE.to_radians().tan(), 0.0) * m;
        }
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::rotate(self.rotate_degrees.to_radians())
            * m
    }

    /// Maps every coordinate of `outline`, control points included, into a
    /// new outline.
    pub fn apply(&self, outline: &Outline, style: StyleVariant) -> Outline {
        Outline::from_path(self.affine(style) * outline.path())
    }
}
