//! Value-text helpers: top-level splitting and flow-keyword rewriting.
//!
//! Values are opaque strings. These helpers only know enough grammar to keep
//! `calc(1px + 2px)` or `url("a b")` in one piece and to find the first
//! argument of a gradient function.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Direction;
use crate::mapping::handler::{physical_side, Axis, Edge};

static FLOW_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(inline|block)-(start|end)").expect("valid keyword pattern"));

static GRADIENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:repeating-)?(linear|radial)-gradient\(").expect("valid gradient pattern")
});

/// A `(`, `[` or quote that never closes, or a closer with no opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbalanced;

/// Split `value` at top-level occurrences of `is_separator`.
///
/// Empty pieces are dropped, so runs of whitespace act as one separator.
fn split_top_level(
    value: &str,
    is_separator: impl Fn(char) -> bool,
) -> Result<Vec<&str>, Unbalanced> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;

    for (i, ch) in value.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.checked_sub(1).ok_or(Unbalanced)?,
            c if depth == 0 && is_separator(c) => {
                if start < i {
                    parts.push(&value[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 || quote.is_some() {
        return Err(Unbalanced);
    }
    if start < value.len() {
        parts.push(&value[start..]);
    }
    Ok(parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect())
}

/// Split a value into its space-separated components.
pub fn split_components(value: &str) -> Result<Vec<&str>, Unbalanced> {
    split_top_level(value, char::is_whitespace)
}

/// Byte index of the `)` closing the `(` at `open`.
fn matching_paren(value: &str, open: usize) -> Result<usize, Unbalanced> {
    let mut depth = 0usize;
    let mut quote = None;

    for (i, ch) in value[open..].char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(Unbalanced)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Replace whole-word `inline-start`, `inline-end`, `block-start` and
/// `block-end` with physical sides. Returns `None` when nothing matched.
pub fn replace_flow_keywords(text: &str, direction: Direction) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for caps in FLOW_KEYWORD.captures_iter(text) {
        let (Some(whole), Some(axis), Some(edge)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        if before.is_some_and(is_ident_char) || after.is_some_and(is_ident_char) {
            continue;
        }
        let axis = if axis.as_str().eq_ignore_ascii_case("inline") {
            Axis::Inline
        } else {
            Axis::Block
        };
        let edge = if edge.as_str().eq_ignore_ascii_case("start") {
            Edge::Start
        } else {
            Edge::End
        };
        out.push_str(&text[cursor..whole.start()]);
        out.push_str(physical_side(axis, edge, direction));
        cursor = whole.end();
    }

    if cursor == 0 {
        return None;
    }
    out.push_str(&text[cursor..]);
    Some(out)
}

/// Whether `value` has a flow keyword anywhere a gradient rewrite could touch.
pub fn has_flow_keyword(value: &str) -> bool {
    GRADIENT.is_match(value) && replace_flow_keywords(value, Direction::Ltr).is_some()
}

fn starts_with_word(text: &str, word: &str) -> bool {
    let mut words = text.split_whitespace();
    words.next().is_some_and(|w| w.eq_ignore_ascii_case(word))
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|w| w.eq_ignore_ascii_case(word))
}

/// Rewrite flow keywords in the `to ...` clause of linear gradients and the
/// `at ...` clause of radial gradients. Returns `Ok(None)` when the value has
/// nothing to rewrite.
pub fn rewrite_gradients(value: &str, direction: Direction) -> Result<Option<String>, Unbalanced> {
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;

    for caps in GRADIENT.captures_iter(value) {
        let (Some(whole), Some(kind)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < cursor {
            continue;
        }
        let open = whole.end() - 1;
        let close = matching_paren(value, open)?;
        let args = &value[open + 1..close];
        let first_len = split_top_level(args, |c| c == ',')?
            .first()
            .and_then(|first| args.find(first).map(|at| at + first.len()))
            .unwrap_or(0);
        let first = &args[..first_len];

        let gated = if kind.as_str().eq_ignore_ascii_case("linear") {
            starts_with_word(first, "to")
        } else {
            contains_word(first, "at")
        };
        if !gated {
            continue;
        }
        if let Some(rewritten) = replace_flow_keywords(first, direction) {
            out.push_str(&value[cursor..=open]);
            out.push_str(&rewritten);
            cursor = open + 1 + first_len;
        }
    }

    if cursor == 0 {
        return Ok(None);
    }
    out.push_str(&value[cursor..]);
    Ok(Some(out))
}
