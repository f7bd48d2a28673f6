//! Document highlighting
//!
//! This module provides the Highlighter that resolves every line of a
//! document independently and groups the resulting spans by style key,
//! which is the shape a host editor needs to apply one decoration per
//! distinct style.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::config::ParserSettings;

use super::resolver::highlight_spans;
use super::scanner::scan;
use super::style::{Span, StyleKey};

/// Byte ranges of one line, grouped by style key
pub type HighlightMap = BTreeMap<StyleKey, Vec<Range<usize>>>;

/// Highlight one line and group its spans by style key
pub fn highlight_line(line: &str, settings: &ParserSettings) -> HighlightMap {
    let mut map = HighlightMap::new();
    for span in highlight_spans(line, &scan(line, settings), settings) {
        map.entry(span.style.key()).or_default().push(span.start..span.end);
    }
    map
}

/// A byte range positioned in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// Zero-based line index
    pub line: usize,
    /// Byte offset where the range starts (inclusive)
    pub start: usize,
    /// Byte offset where the range ends (exclusive)
    pub end: usize,
}

impl LineRange {
    fn from_span(line: usize, span: &Span) -> Self {
        Self {
            line,
            start: span.start,
            end: span.end,
        }
    }
}

/// Ranges of a whole document, grouped by style key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHighlights {
    ranges: BTreeMap<StyleKey, Vec<LineRange>>,
}

impl DocumentHighlights {
    /// Ranges for one style, in document order
    pub fn get(&self, key: &StyleKey) -> Option<&[LineRange]> {
        self.ranges.get(key).map(Vec::as_slice)
    }

    /// Whether any range uses this style
    pub fn contains(&self, key: &StyleKey) -> bool {
        self.ranges.contains_key(key)
    }

    /// Every style in use, in key order
    pub fn keys(&self) -> impl Iterator<Item = &StyleKey> {
        self.ranges.keys()
    }

    /// Iterate `(style key, ranges)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &[LineRange])> {
        self.ranges.iter().map(|(key, ranges)| (key, ranges.as_slice()))
    }

    /// Number of distinct styles
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Highlights documents with one set of settings
#[derive(Debug, Clone)]
pub struct Highlighter {
    settings: ParserSettings,
    /// Whether highlighting is enabled
    pub enabled: bool,
}

impl Highlighter {
    /// Create an enabled highlighter
    pub fn new(settings: ParserSettings) -> Self {
        Self {
            settings,
            enabled: true,
        }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Replace the settings (e.g. after the host config changed)
    pub fn set_settings(&mut self, settings: ParserSettings) {
        self.settings = settings;
    }

    /// Toggle highlighting on/off
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::debug!(enabled = self.enabled, "toggled highlighting");
        self.enabled
    }

    /// Highlight a single line
    ///
    /// Returns spans for the line. Empty vec if highlighting is disabled.
    pub fn highlight_line(&self, line: &str) -> Vec<Span> {
        if !self.enabled {
            return Vec::new();
        }
        highlight_spans(line, &scan(line, &self.settings), &self.settings)
    }

    /// Highlight every line of a document
    ///
    /// Lines are split on `\n` (a trailing `\r` is dropped) and resolved
    /// independently; no style carries over from one line to the next.
    pub fn highlight_document(&self, text: &str) -> DocumentHighlights {
        let mut highlights = DocumentHighlights::default();
        if !self.enabled {
            return highlights;
        }

        for (line_idx, line) in text.lines().enumerate() {
            for span in self.highlight_line(line) {
                highlights
                    .ranges
                    .entry(span.style.key())
                    .or_default()
                    .push(LineRange::from_span(line_idx, &span));
            }
        }

        tracing::debug!(styles = highlights.len(), "highlighted document");
        highlights
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(ParserSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::style::{Rgb, Style};

    fn red() -> StyleKey {
        Style::color(Rgb::new(0xFF, 0x55, 0x55)).key()
    }

    #[test]
    fn test_highlight_line_groups_by_key() {
        let map = highlight_line("&cA <blue>B</blue> &cC", &ParserSettings::default());
        assert_eq!(map.len(), 2);
        // The space after </blue> falls back to the outer red
        assert_eq!(map[&red()], vec![2..4, 18..19, 21..22]);
        assert_eq!(map[&Style::color(Rgb::new(0x55, 0x55, 0xFF)).key()], vec![10..11]);
    }

    #[test]
    fn test_highlight_document() {
        let highlighter = Highlighter::default();
        let doc = highlighter.highlight_document("&cone\nplain\r\n<red>three");

        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.get(&red()).unwrap(),
            &[
                LineRange { line: 0, start: 2, end: 5 },
                LineRange { line: 2, start: 5, end: 10 },
            ]
        );
    }

    #[test]
    fn test_lines_are_independent() {
        let highlighter = Highlighter::default();
        let doc = highlighter.highlight_document("<bold>open\nnext");
        let bold = Style::default().with_bold().key();
        assert_eq!(doc.get(&bold).unwrap(), &[LineRange { line: 0, start: 6, end: 10 }]);
    }

    #[test]
    fn test_disabled() {
        let mut highlighter = Highlighter::default();
        assert!(!highlighter.toggle());
        assert!(highlighter.highlight_document("&chello").is_empty());
        assert!(highlighter.highlight_line("&chello").is_empty());
        assert!(highlighter.toggle());
        assert!(!highlighter.highlight_document("&chello").is_empty());
    }

    #[test]
    fn test_set_settings() {
        let mut highlighter = Highlighter::default();
        let mut settings = ParserSettings::default();
        settings.legacy_enabled = false;
        highlighter.set_settings(settings);
        assert!(!highlighter.settings().legacy_enabled);
        assert!(highlighter.highlight_document("&chello").is_empty());
    }
}
