//! mccolors - Minecraft color markup highlighting
//!
//! Recognizes legacy `&` color codes and MiniMessage tags in text,
//! resolves them into styled segments or byte spans, and renders
//! previews as SVG or 24-bit terminal output.
//!
//! ```
//! use mccolors::{markup, ParserSettings, Rgb};
//!
//! let segments = markup::segments("&cHello &9World", &ParserSettings::default());
//! assert_eq!(segments[0].text, "Hello ");
//! assert_eq!(segments[0].style.color, Some(Rgb::new(0xFF, 0x55, 0x55)));
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod preview;
pub mod registry;
pub mod terminal;

pub use config::ParserSettings;
pub use error::{ColorParseError, Error, Result};
pub use markup::{
    color_at, highlight_line, highlight_spans, resolve, scan, DocumentHighlights, FormatKind,
    Highlighter, MatchKind, Rgb, Span, Style, StyleKey, StyleMatch, StyledSegment,
};
pub use registry::StyleRegistry;
