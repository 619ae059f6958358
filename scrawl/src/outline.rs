//! Glyph outlines and their bounding boxes.

use kurbo::{BezPath, PathEl, Point, QuadBez, Rect, SvgParseError};
use serde::{Deserialize, Serialize};

/// An immutable glyph outline in design units.
///
/// An outline is an ordered sequence of move/line/cubic/close commands.
/// Quadratic segments in source data are raised to cubics on construction
/// so every consumer sees the same four command kinds. Producing a new
/// shape always means building a new [`Outline`]; there is no in-place
/// mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    path: BezPath,
}

/// Axis-aligned bounds over every coordinate of an outline, curve control
/// points included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Outline {
    /// Builds an outline from a path, raising any quadratic segments to
    /// cubics.
    pub fn from_path(path: BezPath) -> Self {
        Outline {
            path: raise_quads(path),
        }
    }

    /// Builds an outline from SVG path data, e.g. `"M10 10L20 10L20 20Z"`.
    ///
    /// Only fill geometry is understood; strokes, gradients and clips have
    /// no representation here.
    pub fn from_svg_path(data: &str) -> Result<Self, SvgParseError> {
        Ok(Self::from_path(BezPath::from_svg(data)?))
    }

    /// A single closed rectangle.
    pub fn rect(rect: Rect) -> Self {
        let mut path = BezPath::new();
        push_rect(&mut path, rect);
        Outline { path }
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// The bounds of every on-curve and control coordinate, or `None` if no
    /// command carries a coordinate.
    ///
    /// This is deliberately the control-point box, not the tight curve box:
    /// it covers every point a consumer of the command list will see.
    pub fn control_bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut push = |p: &Point| {
            let next = Bounds::from_point(*p);
            bounds = Some(match bounds {
                Some(prior) => prior.union(next),
                None => next,
            });
        };
        for el in self.path.elements() {
            match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => push(p),
                PathEl::QuadTo(p1, p2) => {
                    push(p1);
                    push(p2);
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    push(p1);
                    push(p2);
                    push(p3);
                }
                PathEl::ClosePath => (),
            }
        }
        bounds
    }

    /// SVG path data for this outline.
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }
}

impl Bounds {
    fn from_point(p: Point) -> Bounds {
        Bounds {
            x_min: p.x,
            y_min: p.y,
            x_max: p.x,
            y_max: p.y,
        }
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Zero for a degenerate single point.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Append a closed rectangle subpath.
pub(crate) fn push_rect(path: &mut BezPath, rect: Rect) {
    path.move_to((rect.x0, rect.y0));
    path.line_to((rect.x1, rect.y0));
    path.line_to((rect.x1, rect.y1));
    path.line_to((rect.x0, rect.y1));
    path.close_path();
}

/// Replace quadratic segments with their exact cubic equivalent.
fn raise_quads(path: BezPath) -> BezPath {
    if !path
        .elements()
        .iter()
        .any(|el| matches!(el, PathEl::QuadTo(..)))
    {
        return path;
    }
    let mut out = BezPath::new();
    let mut subpath_start = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                subpath_start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                let cubic = QuadBez::new(current, p1, p2).raise();
                out.curve_to(cubic.p1, cubic.p2, cubic.p3);
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(p1, p2, p3);
                current = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = subpath_start;
            }
        }
    }
    out
}

// Persisted form is SVG path data, which round-trips f64 coordinates and
// lets session files elide outlines entirely.
impl Serialize for Outline {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_svg())
    }
}

impl<'de> Deserialize<'de> for Outline {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = String::deserialize(deserializer)?;
        Outline::from_svg_path(&data).map_err(serde::de::Error::custom)
    }
}
