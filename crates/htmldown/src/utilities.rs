//! Text normalization and escaping primitives.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Check if a character belongs to the collapsible whitespace class.
///
/// This is a fixed set rather than `char::is_whitespace`: ASCII space, tab,
/// CR, LF, non-breaking space and ideographic space are the space-like
/// characters that show up in real-world HTML text content.
pub fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{00A0}' | '\u{3000}')
}

/// Collapse every maximal run of collapsible whitespace to one ASCII space.
///
/// Leading and trailing runs become single spaces too; trimming is the
/// responsibility of the enclosing block, not the text leaf.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if is_collapsible_whitespace(c) {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Backslash-escape characters that would otherwise read as Markdown syntax.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '*' | '[' | ']' | '`' | '_' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Named entities recognized by [`decode_entities`].
static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        ("hellip", '…'),
        ("mdash", '—'),
        ("ndash", '–'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("copy", '©'),
        ("reg", '®'),
        ("trade", '™'),
        ("laquo", '«'),
        ("raquo", '»'),
        ("middot", '·'),
        ("times", '×'),
        ("deg", '°'),
        ("euro", '€'),
        ("pound", '£'),
        ("yen", '¥'),
        ("sect", '§'),
    ])
});

/// Decode HTML entities to literal characters.
///
/// Handles the common named entities plus numeric (`&#65;`) and hex
/// (`&#x41;`) references. Anything unrecognized passes through untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        // An entity name is short; anything longer is a bare ampersand.
        match rest.find(';') {
            Some(end) if end > 1 && end <= 32 => {
                if let Some(decoded) = decode_entity(&rest[1..end]) {
                    result.push(decoded);
                    rest = &rest[end + 1..];
                } else {
                    result.push('&');
                    rest = &rest[1..];
                }
            }
            _ => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let value = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(value);
    }

    NAMED_ENTITIES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b"), "a b");
        assert_eq!(collapse_whitespace("a\t\r\n b"), "a b");
        assert_eq!(collapse_whitespace(" word "), " word ");
        assert_eq!(collapse_whitespace("a\u{00A0}\u{3000}b"), "a b");
    }

    #[test]
    fn test_collapse_preserves_other_unicode_spacing() {
        // Thin space is not in the collapsible class
        assert_eq!(collapse_whitespace("a\u{2009}b"), "a\u{2009}b");
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*test*"), "\\*test\\*");
        assert_eq!(escape_markdown("_test_"), "\\_test\\_");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("`code`"), "\\`code\\`");
        assert_eq!(escape_markdown("normal"), "normal");
    }

    #[test]
    fn test_escape_markdown_leaves_other_syntax_alone() {
        assert_eq!(escape_markdown("# heading - item"), "# heading - item");
    }

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
        assert_eq!(decode_entities("&hellip;"), "…");
        assert_eq!(decode_entities("&nbsp;"), "\u{00A0}");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#65;&#66;"), "AB");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("&#X2014;"), "—");
    }

    #[test]
    fn test_decode_leaves_unknown_entities() {
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("a &"), "a &");
    }

    #[test]
    fn test_is_collapsible_whitespace() {
        assert!(is_collapsible_whitespace(' '));
        assert!(is_collapsible_whitespace('\u{3000}'));
        assert!(is_collapsible_whitespace('\u{00A0}'));
        assert!(!is_collapsible_whitespace('a'));
        assert!(!is_collapsible_whitespace('\u{200B}'));
    }
}
