//! Terminal output using crossterm
//!
//! Writes resolved segments as 24-bit ANSI escape sequences. Works on
//! any `Write` so it can target stdout or a buffer.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::error::Result;
use crate::markup::{Rgb, Style, StyledSegment};

/// Glyph drawn in place of each obfuscated character
const OBFUSCATED_GLYPH: char = '▒';

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Queue the escape sequences that switch to `style`
fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if let Some(color) = style.color {
        queue!(out, SetForegroundColor(to_color(color)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.strikethrough {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

/// Reset all attributes
fn reset_attributes<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Write one line of segments, ending with a reset and a newline
pub fn write_segments<W: Write>(out: &mut W, segments: &[StyledSegment]) -> Result<()> {
    for segment in segments {
        if segment.style.is_default() {
            queue!(out, Print(&segment.text))?;
            continue;
        }

        apply_style(out, &segment.style)?;
        if segment.style.obfuscated {
            let hidden: String = segment.text.chars().map(|_| OBFUSCATED_GLYPH).collect();
            queue!(out, Print(hidden))?;
        } else {
            queue!(out, Print(&segment.text))?;
        }
        reset_attributes(out)?;
    }

    queue!(out, Print('\n'))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[StyledSegment]) -> String {
        let mut buf = Vec::new();
        write_segments(&mut buf, segments).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_segment_has_no_escapes() {
        assert_eq!(render(&[StyledSegment::plain("hello")]), "hello\n");
    }

    #[test]
    fn test_colored_segment() {
        let out = render(&[StyledSegment::new("hi", Style::color(Rgb::new(255, 85, 85)).with_bold())]);
        assert!(out.contains("\x1b[38;2;255;85;85m"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_obfuscated_segment_is_hidden() {
        let out = render(&[StyledSegment::new("abc", Style::default().with_obfuscated())]);
        assert!(!out.contains("abc"));
        assert!(out.contains("▒▒▒"));
    }
}
