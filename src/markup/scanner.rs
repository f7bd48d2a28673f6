//! Match scanner
//!
//! Tokenizes one line into style matches for both dialects. Every
//! enabled rule is run over the whole line, then the matches are merged
//! and stably sorted by start offset, so ties keep rule priority order.

use std::sync::LazyLock;

use regex::Captures;

use crate::config::ParserSettings;

use super::palette::{self, Variable};
use super::rules::{builtin_rules, Category, MatchKind, PatternRule, StyleMatch};
use super::style::{FormatKind, Rgb};

static SCANNER: LazyLock<Scanner> = LazyLock::new(Scanner::new);

/// Scan a line with the shared built-in scanner
pub fn scan(line: &str, settings: &ParserSettings) -> Vec<StyleMatch> {
    SCANNER.scan(line, settings)
}

/// Compiled rule set for both dialects
pub struct Scanner {
    rules: Vec<PatternRule>,
}

impl Scanner {
    /// Create a scanner with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Tokenize one line into matches ordered by start offset
    pub fn scan(&self, line: &str, settings: &ParserSettings) -> Vec<StyleMatch> {
        let mut matches = Vec::new();

        for rule in &self.rules {
            if !rule.category.enabled(settings) {
                continue;
            }
            for caps in rule.captures(line) {
                if let Some(m) = to_match(rule.category, &caps, settings) {
                    tracing::trace!(rule = rule.name, start = m.start, "rule matched");
                    matches.push(m);
                }
            }
        }

        // Stable: equal starts keep rule order
        matches.sort_by_key(|m| m.start);
        tracing::trace!(count = matches.len(), "scanned line");
        matches
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn one regex hit into a match, or drop it if the settings or the
/// tables reject it
fn to_match(category: Category, caps: &Captures<'_>, settings: &ParserSettings) -> Option<StyleMatch> {
    let whole = caps.get(0)?;
    let arg = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let lower = arg.to_ascii_lowercase();

    let (closing, kind) = match category {
        Category::LegacyCode => {
            let code = arg.chars().next()?;
            if let Some(rgb) = palette::legacy_color(code) {
                if !settings.legacy_colors {
                    return None;
                }
                (false, MatchKind::Color(rgb))
            } else {
                let format = palette::legacy_format(code)?;
                if !settings.legacy_formatting {
                    return None;
                }
                (false, MatchKind::Format(format))
            }
        }
        Category::LegacyHex | Category::MiniHex => (false, MatchKind::Color(Rgb::from_hex(arg).ok()?)),
        Category::GradientOpen => {
            let stops = arg
                .split(':')
                .map(Rgb::from_hex)
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            (false, MatchKind::Gradient(stops))
        }
        Category::GradientClose => (true, MatchKind::GradientClose),
        Category::ColorClose => {
            // Format closes and </gradient> are handled by their own rules
            if lower == "gradient" || format_name(&lower, settings).is_some() {
                return None;
            }
            (true, MatchKind::ColorClose)
        }
        Category::NamedTag => (false, named_tag(&lower, settings)?),
        Category::FormatClose => (true, MatchKind::Format(format_name(&lower, settings)?)),
    };

    Some(StyleMatch {
        start: whole.start(),
        len: whole.len(),
        closing,
        mini_message: category.is_mini_message(),
        kind,
    })
}

/// Resolve an opening `<name>` tag
fn named_tag(name: &str, settings: &ParserSettings) -> Option<MatchKind> {
    if let Some(rgb) = palette::named_color(name) {
        return settings.mini_message_colors.then_some(MatchKind::Color(rgb));
    }
    if let Some(format) = palette::named_format(name) {
        return settings.mini_message_formatting.then_some(MatchKind::Format(format));
    }
    match palette::custom_variable(&settings.custom_variables, name)? {
        Variable::Color(rgb) => settings.mini_message_colors.then_some(MatchKind::Color(rgb)),
        Variable::Format(format) => settings.mini_message_formatting.then_some(MatchKind::Format(format)),
    }
}

/// Format keyword or custom variable naming a format
fn format_name(name: &str, settings: &ParserSettings) -> Option<FormatKind> {
    if let Some(format) = palette::named_format(name) {
        return Some(format);
    }
    if palette::named_color(name).is_some() {
        return None;
    }
    match palette::custom_variable(&settings.custom_variables, name)? {
        Variable::Format(format) => Some(format),
        Variable::Color(_) => None,
    }
}
