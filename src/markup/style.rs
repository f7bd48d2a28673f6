//! Style types for markup highlighting
//!
//! This module provides the resolved style tuple shared by the
//! preview path (styled segments) and the live-highlighting path
//! (byte spans), plus its canonical string key.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Formatting directives shared by both dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Obfuscated,
    /// Clears color, color stack, gradient and every flag
    Reset,
}

/// Resolved text style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color (None = host default)
    pub color: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl Style {
    /// Create a style with just a color
    pub fn color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Option<Rgb>) -> Self {
        self.color = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set strikethrough
    pub fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Builder: set obfuscated
    pub fn with_obfuscated(mut self) -> Self {
        self.obfuscated = true;
        self
    }

    /// Turn a format flag on or off. `Reset` is handled by the resolver.
    pub fn set_format(&mut self, format: FormatKind, on: bool) {
        match format {
            FormatKind::Bold => self.bold = on,
            FormatKind::Italic => self.italic = on,
            FormatKind::Underline => self.underline = on,
            FormatKind::Strikethrough => self.strikethrough = on,
            FormatKind::Obfuscated => self.obfuscated = on,
            FormatKind::Reset => {}
        }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// CSS-like text decoration for this style, if any
    pub fn text_decoration(&self) -> Option<&'static str> {
        match (self.underline, self.strikethrough) {
            (true, true) => Some("underline line-through"),
            (true, false) => Some("underline"),
            (false, true) => Some("line-through"),
            (false, false) => None,
        }
    }

    /// Canonical key for this style tuple
    pub fn key(&self) -> StyleKey {
        let color = match self.color {
            Some(color) => color.to_string(),
            None => "none".to_string(),
        };
        let flag = |on: bool| if on { '1' } else { '0' };
        StyleKey(format!(
            "{}:{}{}{}{}{}",
            color,
            flag(self.bold),
            flag(self.italic),
            flag(self.underline),
            flag(self.strikethrough),
            flag(self.obfuscated),
        ))
    }
}

/// Canonical string identifying a [`Style`]
///
/// Format: `<#rrggbb|none>:<bold><italic><underline><strikethrough><obfuscated>`
/// with each flag encoded as `1` or `0`, e.g. `#ff5555:10000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleKey(String);

impl StyleKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back into the style it was built from
    pub fn to_style(&self) -> Option<Style> {
        let (color, flags) = self.0.split_once(':')?;
        let color = match color {
            "none" => None,
            hex => Some(Rgb::from_hex(hex).ok()?),
        };

        let flags: Vec<bool> = flags
            .chars()
            .map(|c| match c {
                '1' => Some(true),
                '0' => Some(false),
                _ => None,
            })
            .collect::<Option<_>>()?;
        let &[bold, italic, underline, strikethrough, obfuscated] = flags.as_slice() else {
            return None;
        };

        Some(Style {
            color,
            bold,
            italic,
            underline,
            strikethrough,
            obfuscated,
        })
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A run of text sharing one resolved style (preview path)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: Style,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Segment with no styling
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// A styled span of text within a line (live-highlighting path)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#FF5555"), Ok(Rgb::new(0xff, 0x55, 0x55)));
        assert_eq!(Rgb::from_hex("00aa00"), Ok(Rgb::new(0, 0xaa, 0)));
        assert_eq!(Rgb::from_hex(""), Err(ColorParseError::Empty));
        assert_eq!(Rgb::from_hex("#fff"), Err(ColorParseError::InvalidLength(3)));
        assert!(matches!(Rgb::from_hex("#gg0000"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(Rgb::from_hex("+f+f+f"), Err(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_rgb_display_is_lowercase() {
        assert_eq!(Rgb::new(0xff, 0x55, 0x55).to_string(), "#ff5555");
        assert_eq!("#ABCDEF".parse::<Rgb>().unwrap().to_string(), "#abcdef");
    }

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.color, None);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::color(Rgb::WHITE).with_bold().with_underline();
        assert_eq!(style.color, Some(Rgb::WHITE));
        assert!(style.bold);
        assert!(style.underline);
        assert!(!style.italic);
        assert!(!style.is_default());
    }

    #[test]
    fn test_text_decoration() {
        assert_eq!(Style::default().text_decoration(), None);
        assert_eq!(Style::default().with_underline().text_decoration(), Some("underline"));
        assert_eq!(
            Style::default().with_underline().with_strikethrough().text_decoration(),
            Some("underline line-through")
        );
    }

    #[test]
    fn test_style_key() {
        let style = Style::color(Rgb::new(0xff, 0x55, 0x55)).with_bold();
        assert_eq!(style.key().as_str(), "#ff5555:10000");
        assert_eq!(Style::default().key().as_str(), "none:00000");
        assert_eq!(Style::default().with_obfuscated().key().as_str(), "none:00001");
    }

    #[test]
    fn test_style_key_decodes() {
        let style = Style::color(Rgb::new(1, 2, 3)).with_italic().with_strikethrough();
        assert_eq!(style.key().to_style(), Some(style));
        assert_eq!(StyleKey("garbage".into()).to_style(), None);
        assert_eq!(StyleKey("none:101".into()).to_style(), None);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, Style::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }
}
