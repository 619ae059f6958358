//! Compiling glyph outlines into the glyf table, with loca alongside.

use font_types::Tag;
use kurbo::{BezPath, CubicBez, ParamCurve, PathEl, Point};

use crate::round::OtRound;
use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"glyf");
pub(crate) const LOCA_TAG: Tag = Tag::new(b"loca");

const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

/// How far apart the two candidate control points may sit, in font units,
/// before a cubic is split instead of collapsed to one quadratic.
const QUAD_TOLERANCE: f64 = 1.0;
const MAX_SPLIT_DEPTH: u32 = 5;

/// One point on a TrueType contour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CurvePoint {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) on_curve: bool,
}

impl CurvePoint {
    fn on(point: Point) -> Self {
        let (x, y) = point.ot_round();
        CurvePoint { x, y, on_curve: true }
    }

    fn off(point: Point) -> Self {
        let (x, y) = point.ot_round();
        CurvePoint {
            x,
            y,
            on_curve: false,
        }
    }
}

/// The bounding box of a glyph's rounded points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bbox {
    pub(crate) x_min: i16,
    pub(crate) y_min: i16,
    pub(crate) x_max: i16,
    pub(crate) y_max: i16,
}

impl Bbox {
    fn of_point(point: &CurvePoint) -> Self {
        Bbox {
            x_min: point.x,
            y_min: point.y,
            x_max: point.x,
            y_max: point.y,
        }
    }

    fn add_point(self, point: &CurvePoint) -> Self {
        Bbox {
            x_min: self.x_min.min(point.x),
            y_min: self.y_min.min(point.y),
            x_max: self.x_max.max(point.x),
            y_max: self.y_max.max(point.y),
        }
    }

    pub(crate) fn union(self, other: Bbox) -> Bbox {
        Bbox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// A fully quadratic glyph, rounded to font units and ready to compile.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SimpleGlyph {
    contours: Vec<Vec<CurvePoint>>,
}

impl SimpleGlyph {
    /// Builds contours from a path in font units.
    ///
    /// Cubics are approximated by quadratic splines. Each contour's
    /// direction is reversed (keeping the starting point first), which
    /// restores the fill convention for paths that were drawn in a y-down
    /// space and then flipped.
    pub(crate) fn from_path(path: &BezPath) -> Self {
        let mut glyph = SimpleGlyph::default();
        let mut contour = Vec::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    glyph.finish_contour(&mut contour);
                    contour.push(CurvePoint::on(p));
                    current = p;
                    start = p;
                }
                PathEl::LineTo(p) => {
                    contour.push(CurvePoint::on(p));
                    current = p;
                }
                PathEl::QuadTo(c, p) => {
                    contour.push(CurvePoint::off(c));
                    contour.push(CurvePoint::on(p));
                    current = p;
                }
                PathEl::CurveTo(c1, c2, p) => {
                    push_quadratics(&mut contour, CubicBez::new(current, c1, c2, p), MAX_SPLIT_DEPTH);
                    current = p;
                }
                PathEl::ClosePath => current = start,
            }
        }
        glyph.finish_contour(&mut contour);
        glyph
    }

    fn finish_contour(&mut self, contour: &mut Vec<CurvePoint>) {
        if contour.is_empty() {
            return;
        }
        // a closing point that duplicates the start is implicit
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        contour[1..].reverse();
        self.contours.push(std::mem::take(contour));
    }

    pub(crate) fn contour_count(&self) -> usize {
        self.contours.len()
    }

    pub(crate) fn point_count(&self) -> usize {
        self.contours.iter().map(Vec::len).sum()
    }

    /// True when the counts fit the binary fields: numberOfContours is an
    /// i16 and point counts must stay within u16 indices.
    pub(crate) fn fits_format_limits(&self) -> bool {
        self.contour_count() <= i16::MAX as usize && self.point_count() <= u16::MAX as usize
    }

    pub(crate) fn bbox(&self) -> Option<Bbox> {
        let mut points = self.contours.iter().flatten();
        let first = Bbox::of_point(points.next()?);
        Some(points.fold(first, Bbox::add_point))
    }

    /// Writes the simple-glyph binary. A glyph with no contours compiles
    /// to no bytes at all.
    pub(crate) fn compile(&self) -> Vec<u8> {
        let Some(bbox) = self.bbox() else {
            return Vec::new();
        };
        let mut buffer = TableBuffer::new();
        buffer.write_i16(self.contours.len() as i16);
        buffer.write_i16(bbox.x_min);
        buffer.write_i16(bbox.y_min);
        buffer.write_i16(bbox.x_max);
        buffer.write_i16(bbox.y_max);
        let mut end = 0_usize;
        for contour in &self.contours {
            end += contour.len();
            buffer.write_u16(end as u16 - 1);
        }
        // no instructions
        buffer.write_u16(0);

        let mut flags = Vec::new();
        let mut x_deltas = Vec::new();
        let mut y_deltas = Vec::new();
        let (mut prev_x, mut prev_y) = (0_i16, 0_i16);
        for point in self.contours.iter().flatten() {
            let (x_flag, x_delta) =
                flag_and_delta(point.x as i32 - prev_x as i32, X_SHORT, X_SAME_OR_POSITIVE);
            let (y_flag, y_delta) =
                flag_and_delta(point.y as i32 - prev_y as i32, Y_SHORT, Y_SAME_OR_POSITIVE);
            let mut flag = x_flag | y_flag;
            if point.on_curve {
                flag |= ON_CURVE;
            }
            flags.push(flag);
            x_deltas.push(x_delta);
            y_deltas.push(y_delta);
            prev_x = point.x;
            prev_y = point.y;
        }
        push_flags(&mut buffer, &flags);
        for delta in x_deltas.iter().chain(&y_deltas) {
            delta.write(&mut buffer);
        }
        buffer.finish()
    }
}

fn push_quadratics(contour: &mut Vec<CurvePoint>, cubic: CubicBez, depth: u32) {
    // A cubic that was raised from a quadratic converts back exactly:
    // both candidate control points land on the original control point.
    let first = cubic.p0 + (cubic.p1 - cubic.p0) * 1.5;
    let second = cubic.p3 + (cubic.p2 - cubic.p3) * 1.5;
    if depth == 0 || (second - first).hypot() <= QUAD_TOLERANCE {
        contour.push(CurvePoint::off(first.midpoint(second)));
        contour.push(CurvePoint::on(cubic.p3));
    } else {
        let (left, right) = cubic.subdivide();
        push_quadratics(contour, left, depth - 1);
        push_quadratics(contour, right, depth - 1);
    }
}

#[derive(Clone, Copy, Debug)]
enum Delta {
    Skip,
    Short(u8),
    Long(i16),
}

impl Delta {
    fn write(&self, buffer: &mut TableBuffer) {
        match self {
            Delta::Skip => (),
            Delta::Short(value) => buffer.write_u8(*value),
            Delta::Long(value) => buffer.write_i16(*value),
        }
    }
}

fn flag_and_delta(value: i32, short_flag: u8, same_or_positive: u8) -> (u8, Delta) {
    match value {
        0 => (same_or_positive, Delta::Skip),
        -255..=-1 => (short_flag, Delta::Short(value.unsigned_abs() as u8)),
        1..=255 => (short_flag | same_or_positive, Delta::Short(value as u8)),
        _ => (0, Delta::Long(value as i16)),
    }
}

fn push_flags(buffer: &mut TableBuffer, flags: &[u8]) {
    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let mut run = 1;
        while i + run < flags.len() && flags[i + run] == flag && run < 256 {
            run += 1;
        }
        match run {
            // a repeat count of one saves nothing
            1 => buffer.write_u8(flag),
            2 => {
                buffer.write_u8(flag);
                buffer.write_u8(flag);
            }
            _ => {
                buffer.write_u8(flag | REPEAT);
                buffer.write_u8((run - 1) as u8);
            }
        }
        i += run;
    }
}

/// Accumulates compiled glyphs and the matching loca offsets.
///
/// Offsets always use the long format, so head's indexToLocFormat is 1.
#[derive(Clone, Debug, Default)]
pub(crate) struct GlyfLoca {
    glyf: Vec<u8>,
    ends: Vec<u32>,
    max_points: u16,
    max_contours: u16,
}

impl GlyfLoca {
    pub(crate) fn push(&mut self, glyph: &SimpleGlyph) {
        self.glyf.extend_from_slice(&glyph.compile());
        if self.glyf.len() % 2 != 0 {
            self.glyf.push(0);
        }
        self.ends.push(self.glyf.len() as u32);
        self.max_points = self.max_points.max(glyph.point_count() as u16);
        self.max_contours = self.max_contours.max(glyph.contour_count() as u16);
    }

    pub(crate) fn max_points(&self) -> u16 {
        self.max_points
    }

    pub(crate) fn max_contours(&self) -> u16 {
        self.max_contours
    }

    pub(crate) fn finish(self) -> (Vec<u8>, Vec<u8>) {
        let mut loca = TableBuffer::new();
        loca.write_u32(0);
        for end in &self.ends {
            loca.write_u32(*end);
        }
        (self.glyf, loca.finish())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn on(x: i16, y: i16) -> CurvePoint {
        CurvePoint { x, y, on_curve: true }
    }

    fn off(x: i16, y: i16) -> CurvePoint {
        CurvePoint {
            x,
            y,
            on_curve: false,
        }
    }

    fn path(svg: &str) -> BezPath {
        BezPath::from_svg(svg).unwrap()
    }

    #[test]
    fn contours_are_reversed_keeping_the_start() {
        let glyph = SimpleGlyph::from_path(&path("M0 0L10 0L10 10L0 10Z"));
        assert_eq!(
            vec![vec![on(0, 0), on(0, 10), on(10, 10), on(10, 0)]],
            glyph.contours
        );
    }

    #[test]
    fn closing_point_duplicating_the_start_is_dropped() {
        let glyph = SimpleGlyph::from_path(&path("M0 0L10 0L5 10L0 0Z"));
        assert_eq!(vec![vec![on(0, 0), on(5, 10), on(10, 0)]], glyph.contours);
    }

    #[test]
    fn quadratic_controls_stay_off_curve() {
        let glyph = SimpleGlyph::from_path(&path("M0 0Q30 0 30 30"));
        assert_eq!(vec![vec![on(0, 0), on(30, 30), off(30, 0)]], glyph.contours);
    }

    #[test]
    fn raised_quadratic_converts_back_to_one_quadratic() {
        // "M0 0Q30 0 30 30" after raising to a cubic
        let glyph = SimpleGlyph::from_path(&path("M0 0C20 0 30 10 30 30"));
        assert_eq!(vec![vec![on(0, 0), on(30, 30), off(30, 0)]], glyph.contours);
    }

    #[test]
    fn genuine_cubic_splits_into_several_quadratics() {
        let glyph = SimpleGlyph::from_path(&path("M0 0C0 100 100 -100 100 0"));
        let points = &glyph.contours[0];
        assert!(points.len() > 3, "expected a split, got {points:?}");
        assert!(points.iter().any(|p| !p.on_curve));
        assert_eq!(on(0, 0), points[0]);
    }

    #[test]
    fn bbox_covers_off_curve_points() {
        let glyph = SimpleGlyph::from_path(&path("M0 0Q50 -40 100 0"));
        assert_eq!(
            Some(Bbox {
                x_min: 0,
                y_min: -40,
                x_max: 100,
                y_max: 0
            }),
            glyph.bbox()
        );
    }

    #[test]
    fn square_compiles_to_expected_bytes() {
        let glyph = SimpleGlyph::from_path(&path("M0 0L10 0L10 10L0 10Z"));
        let expected = vec![
            0, 1, // numberOfContours
            0, 0, 0, 0, 0, 10, 0, 10, // bbox
            0, 3, // endPtsOfContours
            0, 0, // instructionLength
            0x31, 0x35, 0x33, 0x15, // flags
            10, // x deltas
            10, 10, // y deltas
        ];
        assert_eq!(expected, glyph.compile());
    }

    #[test]
    fn empty_path_compiles_to_no_bytes() {
        let glyph = SimpleGlyph::from_path(&BezPath::new());
        assert_eq!(None, glyph.bbox());
        assert!(glyph.compile().is_empty());
    }

    #[test]
    fn flag_runs_use_the_repeat_bit() {
        let mut buffer = TableBuffer::new();
        push_flags(&mut buffer, &[7, 7, 7, 7, 9]);
        assert_eq!(vec![7 | REPEAT, 3, 9], buffer.finish());

        let mut buffer = TableBuffer::new();
        push_flags(&mut buffer, &[7, 7]);
        assert_eq!(vec![7, 7], buffer.finish());

        let mut buffer = TableBuffer::new();
        push_flags(&mut buffer, &[7; 300]);
        assert_eq!(vec![7 | REPEAT, 255, 7 | REPEAT, 43], buffer.finish());
    }

    #[test]
    fn format_limits_bound_contours_and_points() {
        let inside = SimpleGlyph {
            contours: vec![vec![on(0, 0); 4]; 8000],
        };
        assert!(inside.fits_format_limits());

        let too_many_contours = SimpleGlyph {
            contours: vec![vec![on(0, 0)]; 0x8000],
        };
        assert!(!too_many_contours.fits_format_limits());

        let too_many_points = SimpleGlyph {
            contours: vec![vec![on(0, 0); 0x10000]],
        };
        assert!(!too_many_points.fits_format_limits());
    }

    #[test]
    fn loca_offsets_track_padded_glyph_ends() {
        let mut glyf = GlyfLoca::default();
        glyf.push(&SimpleGlyph::default());
        glyf.push(&SimpleGlyph::from_path(&path("M0 0L10 0L5 10Z")));
        let (glyf, loca) = glyf.finish();
        // 21 bytes of triangle data, padded to 22
        assert_eq!(22, glyf.len());
        let offsets: Vec<u32> = loca
            .chunks_exact(4)
            .map(|word| u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
            .collect();
        assert_eq!(vec![0, 0, 22], offsets);
    }
}
