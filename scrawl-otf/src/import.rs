//! Reading glyph records back out of an existing font binary.

use kurbo::{Affine, BezPath};
use log::warn;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::OutlinePen;
use skrifa::string::StringId;
use skrifa::{FontRef, MetadataProvider};

use scrawl::{FontProject, GlyphRecord, Outline, DEFAULT_ADVANCE};

use crate::error::ImportError;

/// Glyph records recovered from a font binary.
///
/// Advances come from the font; bearings are not recoverable from its
/// metrics, so every record carries the defaults. Outlines are returned
/// in the y-down design space, un-flipped around the font's own ascender.
#[derive(Clone, Debug)]
pub struct ImportedFont {
    pub family: Option<String>,
    pub units_per_em: u16,
    pub ascender: f64,
    pub descender: f64,
    pub glyphs: Vec<GlyphRecord>,
}

impl ImportedFont {
    /// Builds a session from the imported records: the full repertoire
    /// seeded as usual, with imported characters carrying their artwork
    /// and metrics.
    pub fn into_project(self) -> FontProject {
        let mut project = FontProject::new();
        if let Some(family) = self.family {
            project.metadata.family = family;
        }
        project.metadata.units_per_em = f64::from(self.units_per_em);
        project.metadata.ascender = self.ascender;
        project.metadata.descender = self.descender;
        for glyph in self.glyphs {
            let ch = glyph.ch;
            *project.record_mut(ch) = glyph;
        }
        project
    }
}

/// Reads `data` as a font and recovers one glyph record per mapped
/// character.
///
/// Characters whose glyphs cannot be found or drawn, or whose outlines
/// are empty, are skipped rather than failing the import.
pub fn import_font(data: &[u8]) -> Result<ImportedFont, ImportError> {
    let font = FontRef::new(data)?;
    let metrics = font.metrics(Size::unscaled(), LocationRef::default());
    let glyph_metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
    let outlines = font.outline_glyphs();
    let ascender = f64::from(metrics.ascent);
    let unflip = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, ascender]);

    let mut glyphs = Vec::new();
    for (code, glyph_id) in font.charmap().mappings() {
        let Some(ch) = char::from_u32(code) else {
            continue;
        };
        let Some(outline) = outlines.get(glyph_id) else {
            warn!("no outline data for '{ch}', skipping");
            continue;
        };
        let mut pen = PathPen::default();
        if let Err(reason) = outline.draw(Size::unscaled(), &mut pen) {
            warn!("could not draw '{ch}': '{reason}', skipping");
            continue;
        }
        if pen.path.elements().is_empty() {
            continue;
        }
        let mut record = GlyphRecord::new(ch);
        record.outline = Some(Outline::from_path(unflip * &pen.path));
        record.advance_width = glyph_metrics
            .advance_width(glyph_id)
            .map_or(DEFAULT_ADVANCE, f64::from);
        glyphs.push(record);
    }
    glyphs.sort_unstable_by_key(|glyph| glyph.ch);

    let family = font
        .localized_strings(StringId::FAMILY_NAME)
        .english_or_first()
        .map(|name| name.to_string());

    Ok(ImportedFont {
        family,
        units_per_em: metrics.units_per_em,
        ascender,
        descender: f64::from(metrics.descent).abs(),
        glyphs,
    })
}

/// Collects drawn segments into a [`BezPath`], in font units.
#[derive(Debug, Default)]
struct PathPen {
    path: BezPath,
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(cx1), f64::from(cy1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pen_collects_segments_in_order() {
        let mut pen = PathPen::default();
        pen.move_to(0.0, 0.0);
        pen.line_to(100.0, 0.0);
        pen.quad_to(100.0, 50.0, 100.0, 100.0);
        pen.close();
        assert_eq!("M0,0 L100,0 Q100,50 100,100 Z", pen.path.to_svg());
    }

    #[test]
    fn imported_records_merge_into_a_fresh_session() {
        let mut record = GlyphRecord::new('A');
        record.advance_width = 648.0;
        let imported = ImportedFont {
            family: Some("Inkwell".into()),
            units_per_em: 1000,
            ascender: 800.0,
            descender: 200.0,
            glyphs: vec![record],
        };
        let project = imported.into_project();
        assert_eq!("Inkwell", project.metadata.family);
        assert_eq!(800.0, project.metadata.ascender);
        assert_eq!(648.0, project.glyph('A').unwrap().advance_width);
        // the rest of the repertoire is still seeded
        assert!(project.glyph('z').is_some());
    }
}
