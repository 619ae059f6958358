//! Compiling a project into standalone font binaries, one per style.

use std::collections::BTreeMap;

use kurbo::{Affine, BezPath};
use log::warn;

use scrawl::transform::ITALIC_ANGLE;
use scrawl::{FontProject, Outline, StyleVariant};

use crate::error::ExportError;
use crate::round::OtRound;
use crate::sfnt::FontBuilder;
use crate::tables::glyf::{Bbox, GlyfLoca, SimpleGlyph};
use crate::tables::{cmap, glyf, head, hhea, hmtx, kern, maxp, name, os2, post};

/// Extra advance width applied to every Bold glyph, compensating for the
/// heavier stroke the style's scale factor produces.
pub const BOLD_ADVANCE_FACTOR: f64 = 1.08;

const NOTDEF_ADVANCE: f64 = 600.0;

/// A compiled font and the file name it should be written under.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFont {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Compiles one font per style variant, in declaration order.
pub fn compile_family(project: &FontProject) -> Result<Vec<CompiledFont>, ExportError> {
    StyleVariant::ALL
        .iter()
        .map(|&style| compile_font(project, style))
        .collect()
}

/// Compiles `project` into a TrueType binary for `style`.
///
/// Characters without artwork are left out of the font entirely; the
/// missing-character box is always glyph 0. Fails when a glyph that
/// should be exported has no measurable geometry or overflows the glyf
/// format's counters.
pub fn compile_font(
    project: &FontProject,
    style: StyleVariant,
) -> Result<CompiledFont, ExportError> {
    let metadata = &project.metadata;
    let units_per_em = em_units(metadata.units_per_em);
    let ascender = metadata.ascender;
    let descender = metadata.descender;
    // design space runs y-down from the em top; font units run y-up
    // from the baseline
    let flip = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, ascender]);

    let mut glyf_loca = GlyfLoca::default();
    let mut metrics: Vec<(u16, i16)> = Vec::new();
    let mut glyph_boxes: Vec<(u16, Bbox)> = Vec::new();
    let mut mappings: Vec<(u16, u16)> = Vec::new();
    let mut gids: BTreeMap<char, u16> = BTreeMap::new();
    let mut bbox: Option<Bbox> = None;

    let flipped = flip * notdef_outline(ascender).path();
    let notdef = SimpleGlyph::from_path(&flipped);
    let notdef_advance: u16 = NOTDEF_ADVANCE.ot_round();
    metrics.push((notdef_advance, left_side_bearing(&notdef)));
    if let Some(notdef_box) = notdef.bbox() {
        glyph_boxes.push((notdef_advance, notdef_box));
        bbox = Some(notdef_box);
    }
    glyf_loca.push(&notdef);

    for record in project.glyphs() {
        let Some(outline) = record.styled_outline(style) else {
            continue;
        };
        let code = u32::from(record.ch);
        if code > 0xFFFF {
            warn!("skipping '{}': outside the basic multilingual plane", record.ch);
            continue;
        }
        let Some(bounds) = outline.control_bounds() else {
            return Err(ExportError::UnmeasurableGlyph(record.ch));
        };
        let bare_width = record.advance_width - record.left_bearing - record.right_bearing;
        let glyph_width = bare_width.max(bounds.width());
        let mut advance = record.left_bearing + glyph_width + record.right_bearing;
        if style.is_bold() {
            advance *= BOLD_ADVANCE_FACTOR;
        }
        let advance = checked_advance(record.ch, advance);

        let flipped = flip * outline.path();
        let glyph = SimpleGlyph::from_path(&flipped);
        if !glyph.fits_format_limits() {
            return Err(ExportError::OversizedGlyph(record.ch));
        }
        let gid = metrics.len() as u16;
        metrics.push((advance, left_side_bearing(&glyph)));
        if let Some(glyph_box) = glyph.bbox() {
            glyph_boxes.push((advance, glyph_box));
            bbox = Some(bbox.map_or(glyph_box, |whole| whole.union(glyph_box)));
        }
        mappings.push((code as u16, gid));
        gids.insert(record.ch, gid);
        glyf_loca.push(&glyph);
    }

    let mut pairs = Vec::new();
    for ((left, right), value) in project.kerning.iter() {
        match (gids.get(&left), gids.get(&right)) {
            (Some(&left_gid), Some(&right_gid)) => {
                pairs.push((left_gid, right_gid, value.ot_round()));
            }
            _ => warn!("dropping kern pair ('{left}', '{right}'): both glyphs must be in the font"),
        }
    }
    pairs.sort_unstable();

    let bbox = bbox.unwrap_or(Bbox {
        x_min: 0,
        y_min: 0,
        x_max: 0,
        y_max: 0,
    });
    let (caret_slope_rise, caret_slope_run) = caret_slope(style);
    let guides = project.guides();

    let head = head::Head {
        units_per_em,
        bbox,
        mac_style: u16::from(style.is_bold()) | u16::from(style.is_italic()) << 1,
    };
    let hhea = hhea::Hhea {
        ascender: ascender.ot_round(),
        descender: (-descender).ot_round(),
        advance_width_max: metrics.iter().map(|&(advance, _)| advance).max().unwrap_or(0),
        min_left_side_bearing: glyph_boxes.iter().map(|&(_, b)| b.x_min).min().unwrap_or(0),
        min_right_side_bearing: glyph_boxes
            .iter()
            .map(|&(advance, b)| i32::from(advance) - i32::from(b.x_max))
            .min()
            .unwrap_or(0) as i16,
        x_max_extent: glyph_boxes.iter().map(|&(_, b)| b.x_max).max().unwrap_or(0),
        caret_slope_rise,
        caret_slope_run,
        number_of_h_metrics: metrics.len() as u16,
    };
    let os2 = os2::Os2 {
        avg_char_width: average_advance(&metrics),
        weight_class: if style.is_bold() { 700 } else { 400 },
        selection: selection_flags(style),
        first_char_index: mappings.first().map_or(0xFFFF, |&(code, _)| code),
        last_char_index: mappings.last().map_or(0xFFFF, |&(code, _)| code),
        typo_ascender: ascender.ot_round(),
        typo_descender: (-descender).ot_round(),
        win_ascent: ascender.max(f64::from(bbox.y_max)).ot_round(),
        win_descent: descender.max(-f64::from(bbox.y_min)).ot_round(),
        x_height: (guides.baseline - guides.x_height).ot_round(),
        cap_height: (guides.baseline - guides.cap_height).ot_round(),
        units_per_em,
    };

    let family = metadata.family.as_str();
    let style_name = style.name();
    let full_name = format!("{family} {style_name}");
    let postscript_name = format!("{}-{}", compact(family), compact(style_name));
    let italic_angle = if style.is_italic() { -ITALIC_ANGLE } else { 0.0 };

    let num_glyphs = metrics.len() as u16;
    let maxp_data = maxp::build(num_glyphs, glyf_loca.max_points(), glyf_loca.max_contours());
    let (glyf_data, loca_data) = glyf_loca.finish();

    let mut builder = FontBuilder::new();
    builder.add_table(os2::TAG, os2.compile());
    builder.add_table(cmap::TAG, cmap::build(&mappings));
    builder.add_table(glyf::TAG, glyf_data);
    builder.add_table(head::TAG, head.compile());
    builder.add_table(hhea::TAG, hhea.compile());
    builder.add_table(hmtx::TAG, hmtx::build(&metrics));
    if !pairs.is_empty() {
        builder.add_table(kern::TAG, kern::build(&pairs));
    }
    builder.add_table(glyf::LOCA_TAG, loca_data);
    builder.add_table(maxp::TAG, maxp_data);
    builder.add_table(
        name::TAG,
        name::build(&[
            (name::FAMILY, family),
            (name::SUBFAMILY, style_name),
            (name::UNIQUE_ID, full_name.as_str()),
            (name::FULL_NAME, full_name.as_str()),
            (name::POSTSCRIPT_NAME, postscript_name.as_str()),
        ]),
    );
    builder.add_table(post::TAG, post::build(italic_angle, units_per_em));

    Ok(CompiledFont {
        file_name: format!("{}-{}.ttf", compact(family), compact(style_name)),
        data: builder.build(),
    })
}

/// The hollow missing-character box, drawn in design units sitting on the
/// baseline.
fn notdef_outline(baseline: f64) -> Outline {
    let top = baseline - 640.0;
    let mut path = BezPath::new();
    path.move_to((80.0, top));
    path.line_to((520.0, top));
    path.line_to((520.0, baseline));
    path.line_to((80.0, baseline));
    path.close_path();
    // the counter runs the other way so the box stays hollow
    path.move_to((140.0, top + 60.0));
    path.line_to((140.0, baseline - 60.0));
    path.line_to((460.0, baseline - 60.0));
    path.line_to((460.0, top + 60.0));
    path.close_path();
    Outline::from_path(path)
}

fn left_side_bearing(glyph: &SimpleGlyph) -> i16 {
    glyph.bbox().map_or(0, |b| b.x_min)
}

/// Rounds an advance into the metrics table, clamping out-of-range values
/// instead of failing the export.
fn checked_advance(ch: char, value: f64) -> u16 {
    let rounded: u16 = value.ot_round();
    if (f64::from(rounded) - value).abs() > 0.5 {
        warn!("advance {value} for '{ch}' does not fit the metrics table, using {rounded}");
    }
    rounded
}

fn em_units(value: f64) -> u16 {
    let rounded: u16 = value.ot_round();
    if (16..=16384).contains(&rounded) {
        return rounded;
    }
    let clamped = rounded.clamp(16, 16384);
    warn!("units per em {value} is outside 16..=16384, using {clamped}");
    clamped
}

fn compact(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn selection_flags(style: StyleVariant) -> u16 {
    let mut selection = 0;
    if style.is_bold() {
        selection |= os2::SELECTION_BOLD;
    }
    if style.is_italic() {
        selection |= os2::SELECTION_ITALIC;
    }
    if selection == 0 {
        selection = os2::SELECTION_REGULAR;
    }
    selection
}

/// Mean of the nonzero advances, rounded.
fn average_advance(metrics: &[(u16, i16)]) -> i16 {
    let (sum, count) = metrics.iter().fold((0_u64, 0_u64), |(sum, count), &(advance, _)| {
        if advance > 0 {
            (sum + u64::from(advance), count + 1)
        } else {
            (sum, count)
        }
    });
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).ot_round()
    }
}

fn caret_slope(style: StyleVariant) -> (i16, i16) {
    if style.is_italic() {
        (1000, (1000.0 * ITALIC_ANGLE.to_radians().tan()).ot_round())
    } else {
        (1, 0)
    }
}
