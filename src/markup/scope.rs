//! Scope boundary heuristics for legacy codes
//!
//! Legacy codes have no closing form, so in source files they would
//! otherwise color everything up to the next code. These helpers cut
//! that range short at code spans, template expressions and the end of
//! the enclosing string literal.

use crate::config::ParserSettings;

/// Whether byte offset `pos` lies inside a backtick span, judged by the
/// parity of backticks from the start of the line
pub fn inside_backticks(line: &str, pos: usize) -> bool {
    let before = line.as_bytes().get(..pos).unwrap_or(line.as_bytes());
    before.iter().filter(|&&b| b == b'`').count() % 2 == 1
}

/// Quote character (`"` or `'`) still open at byte offset `pos`
///
/// A quote opens a string until the same quote kind closes it; the
/// other kind is ignored while a string is open.
pub fn open_quote(line: &str, pos: usize) -> Option<u8> {
    let before = line.as_bytes().get(..pos).unwrap_or(line.as_bytes());
    let mut open = None;
    for &b in before {
        match (open, b) {
            (None, b'"' | b'\'') => open = Some(b),
            (Some(q), b) if b == q => open = None,
            _ => {}
        }
    }
    open
}

/// First occurrence of `needle` in `line[start..end]`, as an absolute offset
fn find_in(line: &str, start: usize, end: usize, needle: &str) -> Option<usize> {
    line.get(start..end)?.find(needle).map(|i| start + i)
}

/// First backtick at or after `start`
pub fn next_backtick(line: &str, start: usize) -> Option<usize> {
    find_in(line, start, line.len(), "`")
}

/// Narrow the effective end of a legacy code's span
///
/// `match_start` is where the code itself begins, `start..end` the span
/// it would otherwise style. Returns the new end, never before `start`.
pub fn truncate(line: &str, match_start: usize, start: usize, end: usize, settings: &ParserSettings) -> usize {
    let mut end = end;
    if start >= end {
        return end;
    }

    if let Some(tick) = find_in(line, start, end, "`") {
        end = tick;
    }

    if settings.stop_at_template_expressions {
        if let Some(expr) = find_in(line, start, end, "${") {
            end = expr;
        }
    }

    if let Some(quote) = open_quote(line, match_start) {
        let quote = if quote == b'"' { "\"" } else { "'" };
        if let Some(close) = find_in(line, start, end, quote) {
            end = close;
        }
    }

    end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_backticks() {
        let line = "a `b` c `d";
        assert!(!inside_backticks(line, 0));
        assert!(inside_backticks(line, 3));
        assert!(!inside_backticks(line, 6));
        assert!(inside_backticks(line, 9));
        assert!(!inside_backticks(line, 2));
    }

    #[test]
    fn test_open_quote() {
        let line = r#"say("&cHi") + 'it"s' x"#;
        assert_eq!(open_quote(line, 0), None);
        assert_eq!(open_quote(line, 5), Some(b'"'));
        assert_eq!(open_quote(line, 11), None);
        // The double quote inside single quotes does not open a string
        assert_eq!(open_quote(line, 18), Some(b'\''));
        assert_eq!(open_quote(line, line.len()), None);
    }

    #[test]
    fn test_truncate_at_backtick() {
        let settings = ParserSettings::default();
        let line = "&cred `code`";
        assert_eq!(truncate(line, 0, 2, line.len(), &settings), 6);
    }

    #[test]
    fn test_truncate_at_template() {
        let line = "&cHi ${name} there";
        let mut settings = ParserSettings::default();
        assert_eq!(truncate(line, 0, 2, line.len(), &settings), line.len());
        settings.stop_at_template_expressions = true;
        assert_eq!(truncate(line, 0, 2, line.len(), &settings), 5);
    }

    #[test]
    fn test_truncate_at_closing_quote() {
        let settings = ParserSettings::default();
        let line = r#"msg = "&cHello" + more"#;
        assert_eq!(truncate(line, 7, 9, line.len(), &settings), 14);

        // Not inside a string: no quote truncation
        let line = r#"&cHello "x""#;
        assert_eq!(truncate(line, 0, 2, line.len(), &settings), line.len());
    }

    #[test]
    fn test_truncate_keeps_empty_spans_empty() {
        let settings = ParserSettings::default();
        assert_eq!(truncate("&c`", 0, 2, 2, &settings), 2);
        assert_eq!(truncate("&c`x`", 0, 2, 5, &settings), 2);
    }
}
