//! SVG preview rendering
//!
//! Lays resolved segments out on a fixed monospace grid and emits a
//! small SVG image, or the same image as a base64 `data:` URI for hosts
//! that embed images in markdown.

use base64::Engine;
use rand::Rng;
use unicode_width::UnicodeWidthChar;

use crate::config::ParserSettings;
use crate::markup::{self, StyledSegment};

/// Width of one grid cell in pixels
pub const CELL_WIDTH: usize = 9;
/// Height of one grid cell in pixels
pub const CELL_HEIGHT: usize = 16;
/// Padding around the text in pixels
pub const PADDING: usize = 8;

const BACKGROUND: &str = "#1e1e1e";
const FOREGROUND: &str = "#d4d4d4";
const FONT_SIZE: usize = 14;

/// Glyphs substituted for obfuscated text
pub const OBFUSCATED_GLYPHS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Grid cells taken by a character (wide characters take two)
fn cells(ch: char) -> usize {
    ch.width().unwrap_or(1).max(1)
}

/// Grid cells taken by a string
pub fn text_cells(text: &str) -> usize {
    text.chars().map(cells).sum()
}

/// Replace every character with a random glyph of the same cell count
fn obfuscate(text: &str) -> String {
    let mut rng = rand::rng();
    text.chars()
        .flat_map(|ch| 0..cells(ch))
        .map(|_| char::from(OBFUSCATED_GLYPHS[rng.random_range(0..OBFUSCATED_GLYPHS.len())]))
        .collect()
}

/// Escape text for an SVG text node
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render already-resolved segments
///
/// Returns `None` when there is nothing to draw.
pub fn render_segments(segments: &[StyledSegment]) -> Option<String> {
    if segments.is_empty() {
        return None;
    }

    let total_cells: usize = segments.iter().map(|s| text_cells(&s.text)).sum();
    let width = total_cells * CELL_WIDTH + PADDING * 2;
    let height = CELL_HEIGHT + PADDING * 2;
    let baseline = PADDING + CELL_HEIGHT - 4;

    let mut svg = format!(r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#);
    svg.push_str(&format!(r#"<rect width="100%" height="100%" fill="{BACKGROUND}" rx="4"/>"#));

    let mut x = PADDING;
    for segment in segments {
        let style = &segment.style;
        let fill = style
            .color
            .map_or_else(|| FOREGROUND.to_string(), |color| color.to_string());
        let weight = if style.bold { "bold" } else { "normal" };
        let font_style = if style.italic { "italic" } else { "normal" };
        let text = if style.obfuscated {
            obfuscate(&segment.text)
        } else {
            segment.text.clone()
        };

        svg.push_str(&format!(
            r#"<text x="{x}" y="{baseline}" fill="{fill}" font-family="monospace" font-size="{FONT_SIZE}" font-weight="{weight}" font-style="{font_style}""#
        ));
        if let Some(decoration) = style.text_decoration() {
            svg.push_str(&format!(r#" text-decoration="{decoration}""#));
        }
        svg.push_str(&format!(">{}</text>", escape(&text)));

        x += text_cells(&segment.text) * CELL_WIDTH;
    }

    svg.push_str("</svg>");
    Some(svg)
}

/// Render a preview of `text` as SVG
pub fn render_svg(text: &str, settings: &ParserSettings) -> Option<String> {
    render_segments(&markup::segments(text, settings))
}

/// Render a preview of `text` as a `data:image/svg+xml;base64,...` URI
pub fn render_data_uri(text: &str, settings: &ParserSettings) -> Option<String> {
    let svg = render_svg(text, settings)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg);
    Some(format!("data:image/svg+xml;base64,{encoded}"))
}
