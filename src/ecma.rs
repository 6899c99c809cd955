//! Translation of ECMA 262 regular expressions into the flavor understood
//! by `fancy_regex`.
//!
//! JSON Schema patterns use ECMA 262 semantics. Two constructs need
//! rewriting: the shorthand classes (`\d`, `\w`, `\s` and their negations),
//! which are ASCII-oriented in ECMA 262 but Unicode-aware in Rust, and the
//! `\cX` control escapes, which Rust does not know at all. Bracket
//! expressions also differ: `[`, `&` and `~` are literals within an ECMA
//! class but open nested classes or set operations in Rust, so they are
//! escaped in class context. Everything else is handed to the backtracking
//! engine as is.
use std::{iter::Peekable, str::Chars};

// The ranges ECMA 262 assigns to the shorthand classes. The whitespace set
// is WhiteSpace plus LineTerminator.
const DIGIT_RANGES: &str = "0-9";
const WORD_RANGES: &str = "0-9A-Z_a-z";
const SPACE_RANGES: &str =
    "\\t-\\r \\u{a0}\\u{1680}\\u{2000}-\\u{200a}\\u{2028}\\u{2029}\\u{202f}\\u{205f}\\u{3000}\\u{feff}";

pub(crate) fn convert_regex(pattern: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    while let Some(current) = chars.next() {
        match current {
            '\\' => match chars.next() {
                Some('d') => push_shorthand(&mut out, DIGIT_RANGES, false, in_class),
                Some('D') => push_shorthand(&mut out, DIGIT_RANGES, true, in_class),
                Some('w') => push_shorthand(&mut out, WORD_RANGES, false, in_class),
                Some('W') => push_shorthand(&mut out, WORD_RANGES, true, in_class),
                Some('s') => push_shorthand(&mut out, SPACE_RANGES, false, in_class),
                Some('S') => push_shorthand(&mut out, SPACE_RANGES, true, in_class),
                Some('c') => push_control(&mut out, &mut chars),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                // A trailing backslash is rejected by the engine below
                None => out.push('\\'),
            },
            '[' => {
                if in_class {
                    out.push_str("\\[");
                } else {
                    in_class = true;
                    out.push('[');
                }
            }
            ']' => {
                in_class = false;
                out.push(']');
            }
            '&' | '~' if in_class => {
                out.push('\\');
                out.push(current);
            }
            _ => out.push(current),
        }
    }
    fancy_regex::Regex::new(&out)
}

fn push_shorthand(out: &mut String, ranges: &str, negated: bool, in_class: bool) {
    if in_class {
        if negated {
            // A nested class is the only way to negate within an enclosing one
            out.push_str("[^");
            out.push_str(ranges);
            out.push(']');
        } else {
            out.push_str(ranges);
        }
    } else {
        out.push('[');
        if negated {
            out.push('^');
        }
        out.push_str(ranges);
        out.push(']');
    }
}

/// `\cX` selects the control code of the letter: `\cA` is U+0001, `\cj`
/// is U+000A. Without a letter the sequence stands for a literal backslash
/// followed by `c`.
fn push_control(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    match chars.peek() {
        Some(letter) if letter.is_ascii_alphabetic() => {
            let code = letter.to_ascii_uppercase() as u8 - b'A' + 1;
            out.push_str(&format!("\\x{:02x}", code));
            chars.next();
        }
        _ => out.push_str("\\\\c"),
    }
}

#[cfg(test)]
mod tests {
    use super::convert_regex;
    use test_case::test_case;

    #[test_case(r"^[\w\-\.\+]+$", "CC-BY-4.0", true)]
    #[test_case(r"^[\w\-\.\+]+$", "CC-BY-!", false)]
    #[test_case(r"^\W+$", "1_0", false)]
    #[test_case(r"\\w", r"\w", true; "an escaped escape stays literal")]
    #[test_case(r"^[\d]+$", "123", true)]
    #[test_case(r"^[\D]$", "a", true; "negated shorthand nests inside a class")]
    #[test_case(r"^[\D]$", "5", false)]
    #[test_case(r"^\s$", "\u{2003}", true; "em space is ECMA whitespace")]
    #[test_case(r"^\s$", "x", false)]
    #[test_case(r"a\cJb", "a\nb", true; "control escapes map to control codes")]
    #[test_case("^(?!eo:)", "proj:epsg", true)]
    #[test_case("^(?!eo:)", "eo:bands", false)]
    fn regex_matches(pattern: &str, text: &str, is_matching: bool) {
        let compiled = convert_regex(pattern).expect("A valid regex");
        assert_eq!(
            compiled.is_match(text).expect("A valid pattern"),
            is_matching
        );
    }

    #[test_case(r"\")]
    #[test_case(r"\d\")]
    fn invalid_escape_sequences(pattern: &str) {
        assert!(convert_regex(pattern).is_err())
    }
}
