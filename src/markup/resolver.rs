//! Style resolver
//!
//! Walks the ordered matches of one line, keeping a style state with a
//! color stack, and produces styled runs. Two outputs share the walk:
//!
//! - the preview path ([`resolve`]) keeps every run as a text segment;
//! - the live path ([`highlight_spans`]) keeps only styled runs as byte
//!   spans, and narrows legacy codes with the scope heuristics.
//!
//! Gradient bodies are collected as pieces (the text between the tags
//! inside the gradient, each with its own format flags) and recolored
//! per visible character when the gradient closes.

use crate::config::ParserSettings;

use super::gradient;
use super::rules::{MatchKind, StyleMatch};
use super::scope;
use super::style::{FormatKind, Rgb, Span, Style, StyledSegment};

/// Which consumer the walk is producing for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Preview,
    Live,
}

/// Text run inside a gradient body, with the flags in effect there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientPiece {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

/// One open...close gradient pair on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientRange {
    /// Byte offset just past the opening tag
    pub start: usize,
    /// Byte offset of the closing tag (or wherever it was cut off)
    pub end: usize,
    /// Stop colors
    pub colors: Vec<Rgb>,
    /// Visible text of the body, tags excised
    pub pieces: Vec<GradientPiece>,
}

impl GradientRange {
    fn new(start: usize, colors: Vec<Rgb>) -> Self {
        Self {
            start,
            end: start,
            colors,
            pieces: Vec::new(),
        }
    }

    fn push_piece(&mut self, start: usize, end: usize, style: Style) {
        if end > start {
            self.pieces.push(GradientPiece { start, end, style });
        }
        self.end = self.end.max(end);
    }

    /// Drop everything at or after `cutoff`
    fn cut_at(&mut self, cutoff: usize) {
        self.pieces.retain(|p| p.start < cutoff);
        if let Some(last) = self.pieces.last_mut() {
            last.end = last.end.min(cutoff);
        }
        self.end = self.end.min(cutoff);
    }

    /// Number of visible characters in the body
    pub fn visible_len(&self, line: &str) -> usize {
        self.pieces
            .iter()
            .map(|p| line[p.start..p.end].chars().count())
            .sum()
    }

    /// One span per visible character, colored by its position in the body
    pub fn expand(&self, line: &str) -> Vec<Span> {
        let total = self.visible_len(line);
        let mut spans = Vec::with_capacity(total);
        let mut index = 0;

        for piece in &self.pieces {
            for (offset, ch) in line[piece.start..piece.end].char_indices() {
                let start = piece.start + offset;
                let color = gradient::color_at(&self.colors, index, total);
                spans.push(Span::new(start, start + ch.len_utf8(), piece.style.with_color(color)));
                index += 1;
            }
        }

        tracing::trace!(chars = total, stops = self.colors.len(), "expanded gradient");
        spans
    }

    /// The body without gradient colors, one span per piece
    fn abandon(self) -> impl Iterator<Item = Span> {
        self.pieces
            .into_iter()
            .map(|p| Span::new(p.start, p.end, p.style.with_color(None)))
    }
}

/// Per-line resolver state
#[derive(Debug, Default)]
struct StyleState {
    style: Style,
    color_stack: Vec<Rgb>,
    gradient: Option<GradientRange>,
}

impl StyleState {
    fn open_color(&mut self, color: Option<Rgb>) {
        if let Some(current) = self.style.color {
            self.color_stack.push(current);
        }
        self.style.color = color;
    }

    fn close_color(&mut self) {
        self.style.color = self.color_stack.pop();
    }

    /// Clear everything; hands back the gradient that was open, if any
    fn reset(&mut self) -> Option<GradientRange> {
        let abandoned = self.gradient.take();
        self.style = Style::default();
        self.color_stack.clear();
        abandoned
    }

    /// Apply one match, emitting any gradient it finishes into `runs`
    fn apply(&mut self, m: &StyleMatch, line: &str, runs: &mut Vec<Span>) {
        match &m.kind {
            MatchKind::Format(FormatKind::Reset) => {
                if let Some(abandoned) = self.reset() {
                    runs.extend(abandoned.abandon());
                }
            }
            MatchKind::Format(format) => self.style.set_format(*format, !m.closing),
            MatchKind::Color(color) => self.open_color(Some(*color)),
            MatchKind::ColorClose => self.close_color(),
            MatchKind::Gradient(colors) => {
                // A gradient opened inside another one ends the outer one here
                if let Some(outer) = self.gradient.take() {
                    runs.extend(outer.expand(line));
                }
                self.open_color(None);
                self.gradient = Some(GradientRange::new(m.end(), colors.clone()));
            }
            MatchKind::GradientClose => {
                if let Some(finished) = self.gradient.take() {
                    runs.extend(finished.expand(line));
                }
                self.close_color();
            }
        }
    }
}

/// Walk the matches and produce every run, styled or not, in line order
fn walk(line: &str, matches: &[StyleMatch], settings: &ParserSettings, mode: Mode) -> Vec<Span> {
    let suppress_in_backticks = mode == Mode::Live && !settings.highlight_in_backticks;
    let matches: Vec<&StyleMatch> = matches
        .iter()
        .filter(|m| !(suppress_in_backticks && scope::inside_backticks(line, m.start)))
        .collect();

    let mut runs = Vec::new();
    let Some(first) = matches.first() else {
        runs.push(Span::new(0, line.len(), Style::default()));
        return runs;
    };
    if first.start > 0 {
        runs.push(Span::new(0, first.start, Style::default()));
    }

    let mut state = StyleState::default();
    // Style in force before the current run of legacy codes
    let mut legacy_base: Option<Style> = None;
    for (i, m) in matches.iter().enumerate() {
        if m.mini_message {
            legacy_base = None;
        } else if legacy_base.is_none() {
            legacy_base = Some(state.style);
        }
        state.apply(m, line, &mut runs);

        let start = m.end();
        let next = matches.get(i + 1).map_or(line.len(), |n| n.start);

        if let Some(gradient) = state.gradient.as_mut() {
            gradient.push_piece(start, next, state.style);
            continue;
        }

        let end = if mode == Mode::Live && !m.mini_message {
            scope::truncate(line, m.start, start, next, settings)
        } else {
            next
        };
        if end > start {
            runs.push(Span::new(start, end, state.style));
        }
        // A cut-short legacy span hands the rest back to the outer style
        if end < next {
            let base = legacy_base.unwrap_or_default();
            runs.push(Span::new(end.max(start), next, base));
        }
    }

    // Unclosed gradient runs to the end of the line, or in the editor
    // to the first backtick after it
    if let Some(mut open) = state.gradient.take() {
        if mode == Mode::Live {
            if let Some(tick) = scope::next_backtick(line, open.start) {
                open.cut_at(tick);
            }
        }
        runs.extend(open.expand(line));
    }

    runs
}

/// Resolve a line into styled text segments (preview path)
///
/// Tags and codes are excised. A line without matches comes back as a
/// single unstyled segment.
pub fn resolve(line: &str, matches: &[StyleMatch], settings: &ParserSettings) -> Vec<StyledSegment> {
    if matches.is_empty() {
        return vec![StyledSegment::plain(line)];
    }

    walk(line, matches, settings, Mode::Preview)
        .into_iter()
        .filter(|run| !run.is_empty())
        .map(|run| StyledSegment::new(&line[run.start..run.end], run.style))
        .collect()
}

/// Resolve a line into styled byte spans (live-highlighting path)
///
/// Only spans with a non-default style are returned, in line order.
pub fn highlight_spans(line: &str, matches: &[StyleMatch], settings: &ParserSettings) -> Vec<Span> {
    walk(line, matches, settings, Mode::Live)
        .into_iter()
        .filter(|run| !run.is_empty() && !run.style.is_default())
        .collect()
}
