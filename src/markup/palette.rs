//! Color and format tables for both markup dialects
//!
//! Legacy codes are single characters after `&`; MiniMessage names are
//! the lowercase words between angle brackets.

use std::collections::HashMap;

use super::style::{FormatKind, Rgb};

/// Legacy color code (`&0`-`&9`, `&a`-`&f`), case-insensitive
pub fn legacy_color(code: char) -> Option<Rgb> {
    let rgb = match code.to_ascii_lowercase() {
        '0' => Rgb::new(0x00, 0x00, 0x00), // black
        '1' => Rgb::new(0x00, 0x00, 0xAA), // dark blue
        '2' => Rgb::new(0x00, 0xAA, 0x00), // dark green
        '3' => Rgb::new(0x00, 0xAA, 0xAA), // dark aqua
        '4' => Rgb::new(0xAA, 0x00, 0x00), // dark red
        '5' => Rgb::new(0xAA, 0x00, 0xAA), // dark purple
        '6' => Rgb::new(0xFF, 0xAA, 0x00), // gold
        '7' => Rgb::new(0xAA, 0xAA, 0xAA), // gray
        '8' => Rgb::new(0x55, 0x55, 0x55), // dark gray
        '9' => Rgb::new(0x55, 0x55, 0xFF), // blue
        'a' => Rgb::new(0x55, 0xFF, 0x55), // green
        'b' => Rgb::new(0x55, 0xFF, 0xFF), // aqua
        'c' => Rgb::new(0xFF, 0x55, 0x55), // red
        'd' => Rgb::new(0xFF, 0x55, 0xFF), // light purple
        'e' => Rgb::new(0xFF, 0xFF, 0x55), // yellow
        'f' => Rgb::new(0xFF, 0xFF, 0xFF), // white
        _ => return None,
    };
    Some(rgb)
}

/// Legacy format code (`&k`-`&o`, `&r`), case-insensitive
pub fn legacy_format(code: char) -> Option<FormatKind> {
    match code.to_ascii_lowercase() {
        'k' => Some(FormatKind::Obfuscated),
        'l' => Some(FormatKind::Bold),
        'm' => Some(FormatKind::Strikethrough),
        'n' => Some(FormatKind::Underline),
        'o' => Some(FormatKind::Italic),
        'r' => Some(FormatKind::Reset),
        _ => None,
    }
}

/// MiniMessage named color; `name` must already be lowercase
pub fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "black" => Rgb::new(0x00, 0x00, 0x00),
        "dark_blue" => Rgb::new(0x00, 0x00, 0xAA),
        "dark_green" => Rgb::new(0x00, 0xAA, 0x00),
        "dark_aqua" => Rgb::new(0x00, 0xAA, 0xAA),
        "dark_red" => Rgb::new(0xAA, 0x00, 0x00),
        "dark_purple" => Rgb::new(0xAA, 0x00, 0xAA),
        "gold" => Rgb::new(0xFF, 0xAA, 0x00),
        "gray" | "grey" => Rgb::new(0xAA, 0xAA, 0xAA),
        "dark_gray" | "dark_grey" => Rgb::new(0x55, 0x55, 0x55),
        "blue" => Rgb::new(0x55, 0x55, 0xFF),
        "green" => Rgb::new(0x55, 0xFF, 0x55),
        "aqua" => Rgb::new(0x55, 0xFF, 0xFF),
        "red" => Rgb::new(0xFF, 0x55, 0x55),
        "light_purple" => Rgb::new(0xFF, 0x55, 0xFF),
        "yellow" => Rgb::new(0xFF, 0xFF, 0x55),
        "white" => Rgb::new(0xFF, 0xFF, 0xFF),
        _ => return None,
    };
    Some(rgb)
}

/// MiniMessage format keyword, including short aliases; `name` must
/// already be lowercase
pub fn named_format(name: &str) -> Option<FormatKind> {
    match name {
        "bold" | "b" => Some(FormatKind::Bold),
        "italic" | "em" | "i" => Some(FormatKind::Italic),
        "underlined" | "u" => Some(FormatKind::Underline),
        "strikethrough" | "st" => Some(FormatKind::Strikethrough),
        "obfuscated" | "obf" => Some(FormatKind::Obfuscated),
        "reset" => Some(FormatKind::Reset),
        _ => None,
    }
}

/// What a custom variable stands for once resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Color(Rgb),
    Format(FormatKind),
}

/// Resolve a custom variable by name (case-insensitive)
///
/// The value may be a hex color, a MiniMessage color name or a format
/// keyword. Anything else resolves to `None`.
pub fn custom_variable(variables: &HashMap<String, String>, name: &str) -> Option<Variable> {
    let value = variables
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())?;

    if let Ok(rgb) = Rgb::from_hex(value) {
        return Some(Variable::Color(rgb));
    }
    let lower = value.to_ascii_lowercase();
    if let Some(rgb) = named_color(&lower) {
        return Some(Variable::Color(rgb));
    }
    if let Some(format) = named_format(&lower) {
        return Some(Variable::Format(format));
    }

    tracing::debug!(name, value, "ignoring custom variable with unknown value");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_tables() {
        assert_eq!(legacy_color('c'), Some(Rgb::new(0xFF, 0x55, 0x55)));
        assert_eq!(legacy_color('C'), Some(Rgb::new(0xFF, 0x55, 0x55)));
        assert_eq!(legacy_color('9'), Some(Rgb::new(0x55, 0x55, 0xFF)));
        assert_eq!(legacy_color('g'), None);
        assert_eq!(legacy_format('L'), Some(FormatKind::Bold));
        assert_eq!(legacy_format('r'), Some(FormatKind::Reset));
        assert_eq!(legacy_format('p'), None);
    }

    #[test]
    fn test_named_tables() {
        assert_eq!(named_color("grey"), named_color("gray"));
        assert_eq!(named_color("dark_grey"), Some(Rgb::new(0x55, 0x55, 0x55)));
        assert_eq!(named_color("orange"), None);
        assert_eq!(named_format("b"), Some(FormatKind::Bold));
        assert_eq!(named_format("em"), Some(FormatKind::Italic));
        assert_eq!(named_format("underlined"), Some(FormatKind::Underline));
        assert_eq!(named_format("underline"), None);
        assert_eq!(named_format("st"), Some(FormatKind::Strikethrough));
        assert_eq!(named_format("obf"), Some(FormatKind::Obfuscated));
    }

    #[test]
    fn test_custom_variable() {
        let mut vars = HashMap::new();
        vars.insert("primary".to_string(), "#FF8800".to_string());
        vars.insert("Warn".to_string(), "gold".to_string());
        vars.insert("loud".to_string(), "b".to_string());
        vars.insert("broken".to_string(), "not a color".to_string());
        vars.insert("signed".to_string(), "+1+2+3".to_string());

        assert_eq!(
            custom_variable(&vars, "primary"),
            Some(Variable::Color(Rgb::new(0xFF, 0x88, 0x00)))
        );
        assert_eq!(
            custom_variable(&vars, "warn"),
            Some(Variable::Color(Rgb::new(0xFF, 0xAA, 0x00)))
        );
        assert_eq!(custom_variable(&vars, "loud"), Some(Variable::Format(FormatKind::Bold)));
        assert_eq!(custom_variable(&vars, "broken"), None);
        assert_eq!(custom_variable(&vars, "signed"), None);
        assert_eq!(custom_variable(&vars, "missing"), None);
    }
}
