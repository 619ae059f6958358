//! Building a typeface out of hand-drawn or traced glyph artwork.
//!
//! The pipeline runs in design units with the y axis pointing down:
//! [`trace`] turns raster artwork into an [`Outline`], [`transform`] maps
//! outlines through per-glyph transforms and style variants, [`typeset`]
//! lays glyph runs out along a line, and [`project`] holds the editing
//! session a font assembler reads. Binary font output and import live in
//! the companion `scrawl-otf` crate.

#![forbid(unsafe_code)]

pub mod glyph;
pub mod guides;
pub mod kerning;
pub mod outline;
pub mod project;
pub mod trace;
pub mod transform;
pub mod typeset;

pub use glyph::{GlyphRecord, DEFAULT_ADVANCE, DEFAULT_SIDE_BEARING};
pub use guides::GuideSet;
pub use kerning::{KernPair, KerningTable};
pub use outline::{Bounds, Outline};
pub use project::{repertoire, FontMetadata, FontProject, KerningUpdate, MetricUpdate};
pub use trace::RasterImage;
pub use transform::{GlyphTransform, StyleVariant};
pub use typeset::{LayoutGlyph, LayoutMode, Typesetter};
