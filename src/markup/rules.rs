//! Pattern rules for markup scanning
//!
//! Each rule is one grammar of one dialect. Rules are kept in scan
//! priority order; the scanner merges their matches afterwards.

use regex::{CaptureMatches, Regex};

use crate::config::ParserSettings;

use super::style::{FormatKind, Rgb};

/// Grammar a rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `&0`-`&f`, `&k`-`&o`, `&r`
    LegacyCode,
    /// `&#RRGGBB`
    LegacyHex,
    /// `<gradient:#RRGGBB:#RRGGBB...>`
    GradientOpen,
    /// `</gradient>`
    GradientClose,
    /// `<#RRGGBB>`
    MiniHex,
    /// `</#RRGGBB>` or any unrecognized `</name>`
    ColorClose,
    /// `<name>` for colors, formats and custom variables
    NamedTag,
    /// `</name>` for format keywords
    FormatClose,
}

impl Category {
    /// Whether the settings allow this grammar at all
    pub fn enabled(self, settings: &ParserSettings) -> bool {
        match self {
            Category::LegacyCode => settings.legacy_enabled,
            Category::LegacyHex => settings.legacy_hex_enabled,
            Category::GradientOpen | Category::GradientClose => {
                settings.mini_message_enabled && settings.mini_message_gradients
            }
            Category::MiniHex | Category::ColorClose => {
                settings.mini_message_enabled && settings.mini_message_colors
            }
            Category::NamedTag => settings.mini_message_enabled,
            Category::FormatClose => {
                settings.mini_message_enabled && settings.mini_message_formatting
            }
        }
    }

    /// Whether matches of this grammar are MiniMessage tags
    pub fn is_mini_message(self) -> bool {
        !matches!(self, Category::LegacyCode | Category::LegacyHex)
    }
}

/// A single-line pattern rule
pub struct PatternRule {
    /// Name for debugging
    pub name: &'static str,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Grammar this rule recognizes
    pub category: Category,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(name: &'static str, pattern: &str, category: Category) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name,
            pattern: regex,
            category,
        })
    }

    /// All non-overlapping matches in the line, left to right
    pub fn captures<'r, 't>(&'r self, text: &'t str) -> CaptureMatches<'r, 't> {
        self.pattern.captures_iter(text)
    }
}

/// What a match does to the style state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// Open a color scope
    Color(Rgb),
    /// Close the innermost color scope
    ColorClose,
    /// Open or close a format flag, depending on `StyleMatch::closing`
    Format(FormatKind),
    /// Open a gradient with these stops
    Gradient(Vec<Rgb>),
    /// Close the active gradient
    GradientClose,
}

/// One recognized token in a line
///
/// Offsets are UTF-8 byte offsets into the scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMatch {
    /// Byte offset of the first character of the token
    pub start: usize,
    /// Length of the token in bytes
    pub len: usize,
    /// `</...>` form
    pub closing: bool,
    /// `<...>` dialect rather than `&` codes
    pub mini_message: bool,
    pub kind: MatchKind,
}

impl StyleMatch {
    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Built-in rules in scan priority order
pub fn builtin_rules() -> Vec<PatternRule> {
    let table = [
        ("legacy_code", r"&([0-9a-fA-FkKlLmMnNoOrR])", Category::LegacyCode),
        ("legacy_hex", r"&#([0-9a-fA-F]{6})", Category::LegacyHex),
        (
            "gradient_open",
            r"(?i)<gradient:(#[0-9a-f]{6}(?::#[0-9a-f]{6})+)>",
            Category::GradientOpen,
        ),
        ("gradient_close", r"(?i)</gradient>", Category::GradientClose),
        ("mini_hex", r"<#([0-9a-fA-F]{6})>", Category::MiniHex),
        ("color_close", r"(?i-u)</(#[0-9a-f]{6}|[a-z_]+)>", Category::ColorClose),
        ("named_tag", r"(?i-u)<([a-z_]+)>", Category::NamedTag),
        ("format_close", r"(?i-u)</([a-z_]+)>", Category::FormatClose),
    ];

    let mut rules = Vec::with_capacity(table.len());
    for (name, pattern, category) in table {
        if let Some(rule) = PatternRule::new(name, pattern, category) {
            rules.push(rule);
        } else {
            tracing::warn!(name, "failed to compile markup rule");
        }
    }
    rules
}
