//! Laying out glyph sequences along a horizontal line.

use std::str::Chars;

use crate::glyph::{DEFAULT_ADVANCE, DEFAULT_SIDE_BEARING};
use crate::project::FontProject;
use crate::transform::StyleVariant;

/// Narrowest visible-ink width the layout will report.
pub const MIN_INK_WIDTH: f64 = 120.0;
/// Cell size used by [`LayoutMode::Grid`] snapping.
pub const GRID_UNIT: f64 = 20.0;

/// How glyph advances and ink widths are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Natural advances with kerning.
    #[default]
    Typeset,
    /// Every glyph takes the widest advance any record has.
    Monospace,
    /// Placement starts and advances snap to multiples of [`GRID_UNIT`].
    Grid,
    /// Ink width comes from the transformed outline's bounding box instead
    /// of the metric formula, where artwork exists.
    Bounding,
}

/// One positioned glyph.
///
/// `advance` is the final advance with letter spacing and tracking already
/// applied; `start + advance` is where the next glyph's placement begins.
/// The bearing and ink fields carry the letter-spacing multiplier too.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutGlyph {
    pub ch: char,
    pub start: f64,
    pub advance: f64,
    pub left_bearing: f64,
    pub right_bearing: f64,
    pub ink_width: f64,
    pub collision: bool,
}

struct PlacedInk {
    ch: char,
    /// `start + left_bearing + ink_width` of the previous glyph.
    right_edge: f64,
}

/// Lazily lays out a string against a session snapshot.
///
/// A pure function of its inputs: building a new typesetter over the same
/// session, text and mode replays the same entries. Kerning applies to the
/// cursor before each placement; a glyph whose ink begins left of the
/// previous glyph's ink edge is flagged as a collision but still placed.
pub struct Typesetter<'a> {
    project: &'a FontProject,
    mode: LayoutMode,
    chars: Chars<'a>,
    cursor: f64,
    prev: Option<PlacedInk>,
    max_advance: f64,
}

impl<'a> Typesetter<'a> {
    pub fn new(project: &'a FontProject, text: &'a str, mode: LayoutMode) -> Self {
        let max_advance = project
            .glyphs()
            .map(|record| record.advance_width)
            .fold(f64::NEG_INFINITY, f64::max);
        Typesetter {
            project,
            mode,
            chars: text.chars(),
            cursor: 0.0,
            prev: None,
            max_advance: if max_advance.is_finite() {
                max_advance
            } else {
                DEFAULT_ADVANCE
            },
        }
    }
}

fn snap_to_grid(value: f64) -> f64 {
    (value / GRID_UNIT).round() * GRID_UNIT
}

impl Iterator for Typesetter<'_> {
    type Item = LayoutGlyph;

    fn next(&mut self) -> Option<LayoutGlyph> {
        let ch = self.chars.next()?;
        let record = self.project.glyph(ch);
        let (base_advance, left, right) = match record {
            Some(record) => (
                record.advance_width,
                record.left_bearing,
                record.right_bearing,
            ),
            None => (DEFAULT_ADVANCE, DEFAULT_SIDE_BEARING, DEFAULT_SIDE_BEARING),
        };

        if let Some(prev) = &self.prev {
            self.cursor += self.project.kerning.adjustment(prev.ch, ch);
        }

        let effective_advance = match self.mode {
            LayoutMode::Monospace => self.max_advance,
            _ => base_advance,
        };
        let ratio = if base_advance > 0.0 {
            effective_advance / base_advance
        } else {
            1.0
        };
        let metric_ink = (base_advance - left - right).max(MIN_INK_WIDTH) * ratio;
        let ink = match self.mode {
            LayoutMode::Bounding => record
                .and_then(|record| record.styled_outline(StyleVariant::Regular))
                .and_then(|outline| outline.control_bounds())
                .map(|bounds| bounds.width())
                .unwrap_or(metric_ink),
            _ => metric_ink,
        };

        let spacing = self.project.letter_spacing;
        let (left, right, ink) = (left * spacing, right * spacing, ink * spacing);
        let mut start = self.cursor;
        let mut advance = effective_advance * spacing + self.project.tracking;
        if self.mode == LayoutMode::Grid {
            start = snap_to_grid(start);
            advance = snap_to_grid(advance);
        }

        let collision = match &self.prev {
            Some(prev) => start + left < prev.right_edge,
            None => false,
        };
        self.prev = Some(PlacedInk {
            ch,
            right_edge: start + left + ink,
        });
        self.cursor = start + advance;

        Some(LayoutGlyph {
            ch,
            start,
            advance,
            left_bearing: left,
            right_bearing: right,
            ink_width: ink,
            collision,
        })
    }
}
