//! Errors surfaced while compiling or reading a font binary.

use std::fmt;

use skrifa::raw::ReadError;

/// An error produced while compiling a font.
///
/// Glyphs without artwork are skipped, never reported; compilation fails
/// only when a glyph that should be exported cannot be measured or cannot
/// be represented in the binary format.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportError {
    /// The glyph's outline carried no coordinate data, so no bounding
    /// box (and no metrics) could be computed for it.
    UnmeasurableGlyph(char),
    /// The glyph's outline has more contours or points than the glyf
    /// format's counters can hold.
    OversizedGlyph(char),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportError::UnmeasurableGlyph(ch) => {
                write!(f, "no bounding box could be computed for glyph '{ch}'")
            }
            ExportError::OversizedGlyph(ch) => {
                write!(f, "glyph '{ch}' has too many contours or points for the glyf format")
            }
        }
    }
}

impl std::error::Error for ExportError {}

/// An error produced while reading glyph records back out of a binary font.
#[derive(Clone, Debug)]
pub enum ImportError {
    /// The bytes could not be parsed as a font.
    Read(ReadError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportError::Read(inner) => write!(f, "failed to read font data: '{inner}'"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Read(inner) => Some(inner),
        }
    }
}

impl From<ReadError> for ImportError {
    fn from(src: ReadError) -> Self {
        ImportError::Read(src)
    }
}
