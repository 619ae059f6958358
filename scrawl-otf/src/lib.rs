//! Binary font compilation for [scrawl] sessions.
//!
//! [`compile_font`] turns a [`FontProject`](scrawl::FontProject) into a
//! complete standalone TrueType binary for one style variant; glyph
//! outlines are flipped out of the y-down design space, converted to
//! quadratic contours, and packed together with metrics, character
//! mappings, pair kerning, and naming. [`import_font`] is the inverse
//! boundary: it recovers per-character glyph records (and the family
//! name) from an existing binary.
//!
//! Compilation is deterministic: identical projects produce identical
//! bytes, timestamps included.

#![forbid(unsafe_code)]

mod error;
mod export;
mod import;
mod round;
mod sfnt;
mod tables;

pub use error::{ExportError, ImportError};
pub use export::{compile_family, compile_font, CompiledFont, BOLD_ADVANCE_FACTOR};
pub use import::{import_font, ImportedFont};
