//! Markup scanning and style resolution
//!
//! This module provides the core of the crate:
//! - scanning a line for legacy `&` codes and MiniMessage `<tags>`
//! - resolving the matches into styled segments or byte spans
//! - gradient interpolation per visible character

mod gradient;
mod highlighter;
mod palette;
mod resolver;
mod rules;
mod scanner;
mod scope;
mod style;

pub use gradient::{color_at, interpolate};
pub use highlighter::{highlight_line, DocumentHighlights, HighlightMap, Highlighter, LineRange};
pub use resolver::{highlight_spans, resolve, GradientPiece, GradientRange};
pub use rules::{MatchKind, StyleMatch};
pub use scanner::{scan, Scanner};
pub use style::{FormatKind, Rgb, Span, Style, StyleKey, StyledSegment};

use crate::config::ParserSettings;

/// Scan and resolve a line in one step (preview path)
pub fn segments(line: &str, settings: &ParserSettings) -> Vec<StyledSegment> {
    resolve(line, &scan(line, settings), settings)
}
