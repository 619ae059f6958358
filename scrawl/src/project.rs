//! The session model: every glyph record plus font-wide settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::glyph::GlyphRecord;
use crate::guides::GuideSet;
use crate::kerning::KerningTable;
use crate::outline::Outline;
use crate::transform::StyleVariant;
use crate::typeset::{LayoutMode, Typesetter};

/// Font-wide names and vertical metrics.
///
/// The numeric fields are re-derived from the guides whenever
/// [`FontProject::set_guides`] runs, and may be overridden directly
/// afterwards. `style_name` and `side_padding` are carried for the session
/// but feed no assembly formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontMetadata {
    pub family: String,
    pub style_name: String,
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
    pub side_padding: f64,
}

impl Default for FontMetadata {
    fn default() -> Self {
        FontMetadata {
            family: "Untitled".into(),
            style_name: "Regular".into(),
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: 200.0,
            side_padding: 0.0,
        }
    }
}

/// One glyph's metric changes; `None` leaves that field alone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricUpdate {
    pub ch: char,
    #[serde(default)]
    pub advance_width: Option<f64>,
    #[serde(default)]
    pub left_bearing: Option<f64>,
    #[serde(default)]
    pub right_bearing: Option<f64>,
}

/// One kerning change; a `None` value removes the pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KerningUpdate {
    pub left: char,
    pub right: char,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A complete editing session: records for the supported repertoire,
/// metadata, guides, kerning, and spacing controls.
///
/// The serialized form tolerates missing fields throughout; anything absent
/// comes back as its documented default. Deserialized sessions may carry a
/// subset of the repertoire, so loaders usually follow up with
/// [`FontProject::ensure_repertoire`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontProject {
    #[serde(default = "seeded_glyphs")]
    glyphs: BTreeMap<char, GlyphRecord>,
    #[serde(default)]
    pub metadata: FontMetadata,
    #[serde(default)]
    guides: GuideSet,
    #[serde(default)]
    pub kerning: KerningTable,
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing: f64,
    #[serde(default)]
    pub tracking: f64,
}

fn default_letter_spacing() -> f64 {
    1.0
}

/// Characters every new session starts with a record for.
pub fn repertoire() -> impl Iterator<Item = char> {
    ('A'..='Z')
        .chain('a'..='z')
        .chain('0'..='9')
        .chain(".,:;!?'\"()-".chars())
}

fn seeded_glyphs() -> BTreeMap<char, GlyphRecord> {
    repertoire().map(|ch| (ch, GlyphRecord::new(ch))).collect()
}

impl Default for FontProject {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProject {
    /// A session seeded with an empty record for every repertoire
    /// character and default settings throughout.
    pub fn new() -> Self {
        FontProject {
            glyphs: seeded_glyphs(),
            metadata: FontMetadata::default(),
            guides: GuideSet::default(),
            kerning: KerningTable::default(),
            letter_spacing: default_letter_spacing(),
            tracking: 0.0,
        }
    }

    pub fn glyph(&self, ch: char) -> Option<&GlyphRecord> {
        self.glyphs.get(&ch)
    }

    pub fn glyph_mut(&mut self, ch: char) -> Option<&mut GlyphRecord> {
        self.glyphs.get_mut(&ch)
    }

    /// The record for `ch`, created with defaults if absent.
    pub fn record_mut(&mut self, ch: char) -> &mut GlyphRecord {
        self.glyphs.entry(ch).or_insert_with(|| GlyphRecord::new(ch))
    }

    /// All records in character order.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphRecord> + '_ {
        self.glyphs.values()
    }

    /// Attaches artwork to `ch`, replacing any prior outline.
    pub fn set_outline(&mut self, ch: char, outline: Outline) {
        self.record_mut(ch).outline = Some(outline);
    }

    /// Adds default records for any repertoire character a loaded session
    /// is missing.
    pub fn ensure_repertoire(&mut self) {
        for ch in repertoire() {
            self.glyphs.entry(ch).or_insert_with(|| GlyphRecord::new(ch));
        }
    }

    pub fn guides(&self) -> &GuideSet {
        &self.guides
    }

    /// Replaces the guides and re-derives the metadata's em and vertical
    /// metrics from them.
    pub fn set_guides(&mut self, guides: GuideSet) {
        self.guides = guides;
        self.metadata.units_per_em = guides.units_per_em();
        self.metadata.ascender = guides.ascender();
        self.metadata.descender = guides.descender();
    }

    /// Lays out `text` against this session. See [`Typesetter`].
    pub fn typeset<'a>(&'a self, text: &'a str, mode: LayoutMode) -> Typesetter<'a> {
        Typesetter::new(self, text, mode)
    }

    /// Applies a batch of metric edits, creating records as needed.
    pub fn apply_metric_updates(&mut self, updates: &[MetricUpdate]) {
        for update in updates {
            let record = self.record_mut(update.ch);
            if let Some(advance) = update.advance_width {
                record.advance_width = advance;
            }
            if let Some(left) = update.left_bearing {
                record.left_bearing = left;
            }
            if let Some(right) = update.right_bearing {
                record.right_bearing = right;
            }
        }
    }

    /// Applies a batch of kerning edits.
    pub fn apply_kerning_updates(&mut self, updates: &[KerningUpdate]) {
        for update in updates {
            match update.value {
                Some(value) => self.kerning.set(update.left, update.right, value),
                None => {
                    self.kerning.remove(update.left, update.right);
                }
            }
        }
    }

    /// Rescales and repositions `ch` so its ink spans from the cap-height
    /// guide down to the baseline, keeping the left ink edge in place.
    ///
    /// Returns false (and changes nothing) when the glyph has no artwork or
    /// its ink has no height to scale.
    pub fn align_to_cap_height(&mut self, ch: char) -> bool {
        let top = self.guides.cap_height;
        if !self.align_between(ch, top) {
            return false;
        }
        let record = self.record_mut(ch);
        record.lock_cap_height = true;
        record.lock_x_height = false;
        true
    }

    /// Like [`FontProject::align_to_cap_height`], but to the x-height guide.
    pub fn align_to_x_height(&mut self, ch: char) -> bool {
        let top = self.guides.x_height;
        if !self.align_between(ch, top) {
            return false;
        }
        let record = self.record_mut(ch);
        record.lock_x_height = true;
        record.lock_cap_height = false;
        true
    }

    /// Shifts `ch` horizontally so its ink is centered in the advance.
    pub fn center_in_advance(&mut self, ch: char) -> bool {
        let Some(record) = self.glyphs.get_mut(&ch) else {
            return false;
        };
        let Some(styled) = record.styled_outline(StyleVariant::Regular) else {
            return false;
        };
        let Some(bounds) = styled.control_bounds() else {
            return false;
        };
        let center = (bounds.x_min + bounds.x_max) / 2.0;
        record.transform.translate_x += record.advance_width / 2.0 - center;
        record.normalize_center = true;
        true
    }

    /// Rescale `ch` uniformly so its transformed ink spans `top` down to
    /// the baseline, preserving the left ink edge.
    fn align_between(&mut self, ch: char, top: f64) -> bool {
        let bottom = self.guides.baseline;
        let target = bottom - top;
        if target <= 0.0 {
            return false;
        }
        let Some(record) = self.glyphs.get_mut(&ch) else {
            return false;
        };
        let Some(styled) = record.styled_outline(StyleVariant::Regular) else {
            return false;
        };
        let Some(bounds) = styled.control_bounds() else {
            return false;
        };
        if bounds.height() <= 0.0 {
            return false;
        }
        // With only `scale` changed by a factor f, the transformed outline
        // scales by f about the translation point. Solve the translation
        // that pins y_max to the baseline and x_min where it was.
        let f = target / bounds.height();
        let transform = &mut record.transform;
        transform.translate_y = bottom - f * (bounds.y_max - transform.translate_y);
        transform.translate_x = bounds.x_min - f * (bounds.x_min - transform.translate_x);
        transform.scale *= f;
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::outline::Outline;
    use crate::transform::StyleVariant;

    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Outline {
        Outline::rect(kurbo::Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn new_project_seeds_the_repertoire() {
        let project = FontProject::new();
        assert_eq!(73, project.glyphs().count());
        assert!(project.glyph('A').is_some());
        assert!(project.glyph('?').is_some());
        assert!(project.glyph('@').is_none());
        assert!(project.glyphs().all(|g| g.outline.is_none()));
    }

    #[test]
    fn empty_json_is_a_default_session() {
        let project: FontProject = serde_json::from_str("{}").unwrap();
        assert_eq!(FontProject::new(), project);
    }

    #[test]
    fn partial_session_state_fills_in_defaults() {
        let project: FontProject = serde_json::from_str(
            r#"{
                "glyphs": {"A": {"ch": "A", "advance_width": 720.0}},
                "letter_spacing": 1.5
            }"#,
        )
        .unwrap();
        assert_eq!(1, project.glyphs().count());
        assert_eq!(720.0, project.glyph('A').unwrap().advance_width);
        assert_eq!(100.0, project.glyph('A').unwrap().left_bearing);
        assert_eq!(1.5, project.letter_spacing);
        assert_eq!(0.0, project.tracking);
        assert_eq!(FontMetadata::default(), project.metadata);

        let mut project = project;
        project.ensure_repertoire();
        assert_eq!(73, project.glyphs().count());
        assert_eq!(720.0, project.glyph('A').unwrap().advance_width);
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut project = FontProject::new();
        project.metadata.family = "Inkwell".into();
        project.set_outline('A', square(0.0, 300.0, 100.0, 800.0));
        project.kerning.set('A', 'V', -80.0);
        project.tracking = 12.0;
        let json = serde_json::to_string(&project).unwrap();
        let back: FontProject = serde_json::from_str(&json).unwrap();
        assert_eq!(project, back);
    }

    #[test]
    fn guides_drive_metadata() {
        let mut project = FontProject::new();
        let guides = GuideSet {
            em_top: 100.0,
            baseline: 900.0,
            em_bottom: 1100.0,
            ..GuideSet::default()
        };
        project.set_guides(guides);
        assert_eq!(1000.0, project.metadata.units_per_em);
        assert_eq!(800.0, project.metadata.ascender);
        assert_eq!(200.0, project.metadata.descender);
        // direct override still possible afterwards
        project.metadata.ascender = 750.0;
        assert_eq!(750.0, project.metadata.ascender);
    }

    #[test]
    fn metric_updates_apply_only_named_fields() {
        let mut project = FontProject::new();
        project.apply_metric_updates(&[
            MetricUpdate {
                ch: 'A',
                advance_width: Some(700.0),
                left_bearing: None,
                right_bearing: None,
            },
            MetricUpdate {
                ch: '@',
                advance_width: None,
                left_bearing: Some(50.0),
                right_bearing: Some(60.0),
            },
        ]);
        let a = project.glyph('A').unwrap();
        assert_eq!((700.0, 100.0), (a.advance_width, a.left_bearing));
        // '@' is outside the repertoire but gets a record on demand
        let at = project.glyph('@').unwrap();
        assert_eq!((600.0, 50.0, 60.0), (at.advance_width, at.left_bearing, at.right_bearing));
    }

    #[test]
    fn kerning_updates_set_and_remove() {
        let mut project = FontProject::new();
        project.apply_kerning_updates(&[KerningUpdate {
            left: 'A',
            right: 'V',
            value: Some(-80.0),
        }]);
        assert_eq!(-80.0, project.kerning.adjustment('A', 'V'));
        project.apply_kerning_updates(&[KerningUpdate {
            left: 'A',
            right: 'V',
            value: None,
        }]);
        assert_eq!(0.0, project.kerning.adjustment('A', 'V'));
    }

    #[test]
    fn cap_height_alignment_rescales_to_the_guides() {
        let mut project = FontProject::new();
        // ink from y 300 to 800, sitting on the baseline, 100 wide
        project.set_outline('A', square(0.0, 300.0, 100.0, 800.0));
        assert!(project.align_to_cap_height('A'));
        let record = project.glyph('A').unwrap();
        assert!(record.lock_cap_height);
        assert!(!record.lock_x_height);
        let bounds = record
            .styled_outline(StyleVariant::Regular)
            .unwrap()
            .control_bounds()
            .unwrap();
        // spans cap height (200) to baseline (800), left edge unmoved
        assert!((bounds.y_min - 200.0).abs() < 1e-9);
        assert!((bounds.y_max - 800.0).abs() < 1e-9);
        assert!(bounds.x_min.abs() < 1e-9);
        assert!((bounds.width() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn x_height_alignment_flips_the_flags() {
        let mut project = FontProject::new();
        project.set_outline('x', square(10.0, 500.0, 110.0, 700.0));
        assert!(project.align_to_x_height('x'));
        let record = project.glyph('x').unwrap();
        assert!(record.lock_x_height && !record.lock_cap_height);
        let bounds = record
            .styled_outline(StyleVariant::Regular)
            .unwrap()
            .control_bounds()
            .unwrap();
        assert!((bounds.y_min - 400.0).abs() < 1e-9);
        assert!((bounds.y_max - 800.0).abs() < 1e-9);
        assert!((bounds.x_min - 10.0).abs() < 1e-9);
    }

    #[test]
    fn alignment_without_artwork_is_refused() {
        let mut project = FontProject::new();
        assert!(!project.align_to_cap_height('A'));
        assert!(!project.glyph('A').unwrap().lock_cap_height);
    }

    #[test]
    fn centering_moves_ink_to_half_the_advance() {
        let mut project = FontProject::new();
        project.set_outline('B', square(0.0, 300.0, 100.0, 800.0));
        assert!(project.center_in_advance('B'));
        let record = project.glyph('B').unwrap();
        assert!(record.normalize_center);
        let bounds = record
            .styled_outline(StyleVariant::Regular)
            .unwrap()
            .control_bounds()
            .unwrap();
        assert_eq!(300.0, (bounds.x_min + bounds.x_max) / 2.0);
    }
}
