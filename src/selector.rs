//! Selector direction analysis.
//!
//! Finds direction hints in raw selector text: the `:dir(ltr|rtl)` pseudo-class,
//! `[dir=ltr|rtl]` attribute selectors in any quoting, and the two configured
//! tokens. When a selector carries several hints the rightmost one wins, since
//! in a descendant chain it is the one closest to the subject.
//!
//! Everything here is a pure function over `&str`; nothing touches the tree.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Direction, DirectionConfig};

static DIR_PSEUDO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i):dir\(\s*(ltr|rtl)\s*\)").expect("valid :dir() pattern"));

static DIR_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\[\s*dir\s*=\s*(?:"(ltr|rtl)"|'(ltr|rtl)'|(ltr|rtl))\s*(?:[is]\s*)?\]"#)
        .expect("valid [dir] pattern")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Characters that may directly follow a configured token.
const TOKEN_FOLLOWERS: &[char] = &[':', '.', '[', '#', '>', '+', '~', ',', ')'];

/// A direction hint found in a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hint {
    start: usize,
    end: usize,
    direction: Direction,
}

fn parse_direction(text: &str) -> Option<Direction> {
    if text.eq_ignore_ascii_case("ltr") {
        Some(Direction::Ltr)
    } else if text.eq_ignore_ascii_case("rtl") {
        Some(Direction::Rtl)
    } else {
        None
    }
}

fn builtin_hints(selector: &str, out: &mut Vec<Hint>) {
    for pattern in [&*DIR_PSEUDO, &*DIR_ATTRIBUTE] {
        for caps in pattern.captures_iter(selector) {
            let Some(whole) = caps.get(0) else { continue };
            let direction = caps
                .iter()
                .skip(1)
                .flatten()
                .find_map(|m| parse_direction(m.as_str()));
            if let Some(direction) = direction {
                out.push(Hint {
                    start: whole.start(),
                    end: whole.end(),
                    direction,
                });
            }
        }
    }
}

/// Offsets where `token` occurs in `selector` as a whole selector component.
///
/// `.ltr` must not match inside `.theme-ltr` or `.ltr-theme`: the token has to
/// start the selector, follow whitespace or a combinator, or chain onto a
/// compound, and be followed by the end, whitespace, or a component boundary.
fn component_offsets(selector: &str, token: &str) -> Vec<usize> {
    if token.is_empty() {
        return Vec::new();
    }
    let chains = token.starts_with(['.', '[', '#', ':']);

    selector
        .match_indices(token)
        .filter(|&(start, _)| {
            let before = selector[..start].chars().next_back();
            let after = selector[start + token.len()..].chars().next();
            let before_ok = match before {
                None => true,
                Some(ch) if ch.is_whitespace() => true,
                Some('.' | '>' | '+' | '~' | '(' | ',') => true,
                Some(_) => chains,
            };
            let after_ok = match after {
                None => true,
                Some(ch) => ch.is_whitespace() || TOKEN_FOLLOWERS.contains(&ch),
            };
            before_ok && after_ok
        })
        .map(|(start, _)| start)
        .collect()
}

fn configured_hints(selector: &str, config: &DirectionConfig, out: &mut Vec<Hint>) {
    for direction in [Direction::Ltr, Direction::Rtl] {
        let token = config.token(direction);
        for start in component_offsets(selector, token) {
            out.push(Hint {
                start,
                end: start + token.len(),
                direction,
            });
        }
    }
}

fn all_hints(selector: &str, config: &DirectionConfig) -> Vec<Hint> {
    let mut hints = Vec::new();
    builtin_hints(selector, &mut hints);
    configured_hints(selector, config, &mut hints);
    hints
}

/// Detect which direction a selector is scoped to, if any.
///
/// The hint with the largest offset decides.
pub fn detect_direction(selector: &str, config: &DirectionConfig) -> Option<Direction> {
    all_hints(selector, config)
        .into_iter()
        .max_by_key(|hint| hint.start)
        .map(|hint| hint.direction)
}

/// Remove every built-in and configured direction hint from `selector`,
/// collapsing the whitespace left behind and dropping a combinator left
/// dangling at the end.
pub fn strip_direction(selector: &str, config: &DirectionConfig) -> String {
    let mut hints = all_hints(selector, config);
    hints.sort_by_key(|hint| (hint.start, hint.end));

    let mut cleaned = String::with_capacity(selector.len());
    let mut cursor = 0;
    for hint in hints {
        // Overlapping hints (a configured token equal to a built-in form).
        if hint.start < cursor {
            cursor = cursor.max(hint.end);
            continue;
        }
        cleaned.push_str(&selector[cursor..hint.start]);
        cursor = hint.end;
    }
    cleaned.push_str(&selector[cursor..]);

    WHITESPACE
        .replace_all(&cleaned, " ")
        .trim_end_matches(|ch: char| ch.is_whitespace() || matches!(ch, '>' | '+' | '~'))
        .trim()
        .to_string()
}

/// Scope an already-cleaned selector to `direction` by prefixing its token.
pub fn prefix_direction(selector: &str, direction: Direction, config: &DirectionConfig) -> String {
    let token = config.token(direction);
    if selector.is_empty() {
        token.to_string()
    } else {
        format!("{token} {selector}")
    }
}

/// Rewrite `selector` so it is scoped to `target`.
///
/// A selector already scoped to `target` comes back unchanged; anything else is
/// stripped of its direction hints and prefixed with the target token.
pub fn generate_selector(selector: &str, target: Direction, config: &DirectionConfig) -> String {
    if detect_direction(selector, config) == Some(target) {
        return selector.to_string();
    }
    prefix_direction(&strip_direction(selector, config), target, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_config() -> DirectionConfig {
        DirectionConfig::default()
    }

    fn class_config() -> DirectionConfig {
        DirectionConfig::new(".ltr", ".rtl")
    }

    #[test]
    fn no_direction() {
        assert_eq!(detect_direction(".button", &default_config()), None);
        assert_eq!(detect_direction("a[href] > span", &default_config()), None);
    }

    #[test]
    fn attribute_forms() {
        let config = default_config();
        for selector in [
            "[dir=rtl] .a",
            "[dir=\"rtl\"] .a",
            "[dir='rtl'] .a",
            "[ dir = \"rtl\" ] .a",
            "html[dir=rtl] .a",
            "[DIR=RTL] .a",
            "[dir=\"rtl\" i] .a",
        ] {
            assert_eq!(
                detect_direction(selector, &config),
                Some(Direction::Rtl),
                "{selector}"
            );
        }
    }

    #[test]
    fn dir_pseudo_class() {
        let config = default_config();
        assert_eq!(detect_direction(".a:dir(ltr)", &config), Some(Direction::Ltr));
        assert_eq!(detect_direction(".a:dir( rtl )", &config), Some(Direction::Rtl));
    }

    #[test]
    fn rightmost_wins() {
        let config = default_config();
        assert_eq!(
            detect_direction("[dir=rtl] .wrapper [dir=ltr] .a", &config),
            Some(Direction::Ltr)
        );
        assert_eq!(
            detect_direction(".a:dir(ltr) > .b:dir(rtl)", &config),
            Some(Direction::Rtl)
        );
    }

    #[test]
    fn configured_tokens() {
        let config = class_config();
        assert_eq!(detect_direction(".rtl .button", &config), Some(Direction::Rtl));
        assert_eq!(detect_direction(".btn.ltr", &config), Some(Direction::Ltr));
        assert_eq!(detect_direction(".ltr>.btn", &config), Some(Direction::Ltr));
        assert_eq!(detect_direction(":is(.rtl) .btn", &config), Some(Direction::Rtl));
    }

    #[test]
    fn no_false_substring_match() {
        let config = class_config();
        assert_eq!(detect_direction(".theme-ltr .button", &config), None);
        assert_eq!(detect_direction(".ltr-theme .button", &config), None);
        assert_eq!(detect_direction(".filtr .button", &config), None);
    }

    #[test]
    fn bare_token_needs_boundary() {
        let config = DirectionConfig::new("ltr-mode", "rtl-mode");
        assert_eq!(detect_direction("body.rtl-mode .x", &config), Some(Direction::Rtl));
        assert_eq!(detect_direction("body xrtl-mode .x", &config), None);
    }

    #[test]
    fn strips_direction() {
        let config = default_config();
        assert_eq!(strip_direction("[dir=\"rtl\"] .a", &config), ".a");
        assert_eq!(strip_direction("html[dir=rtl]  .a", &config), "html .a");
        assert_eq!(strip_direction(".a:dir(ltr) .b", &config), ".a .b");
        assert_eq!(strip_direction("[dir=rtl]", &config), "");
    }

    #[test]
    fn strip_drops_dangling_combinator() {
        let config = default_config();
        assert_eq!(strip_direction(".a > [dir=rtl]", &config), ".a");
        assert_eq!(strip_direction(".a ~ :dir(ltr)", &config), ".a");
        assert_eq!(strip_direction(".a + .rtl", &class_config()), ".a");
        assert_eq!(
            generate_selector(".a > [dir=rtl]", Direction::Ltr, &config),
            "[dir=\"ltr\"] .a"
        );
        assert_eq!(strip_direction("[dir=rtl] > .a", &config), "> .a");
    }

    #[test]
    fn strip_configured_tokens() {
        let config = class_config();
        assert_eq!(strip_direction(".rtl .button", &config), ".button");
        assert_eq!(strip_direction(".btn.ltr:hover", &config), ".btn:hover");
    }

    #[test]
    fn generates_selector() {
        let config = default_config();
        assert_eq!(
            generate_selector(".button", Direction::Ltr, &config),
            "[dir=\"ltr\"] .button"
        );
        assert_eq!(
            generate_selector("[dir=rtl] .button", Direction::Ltr, &config),
            "[dir=\"ltr\"] .button"
        );
        assert_eq!(
            generate_selector("[dir=rtl] .button", Direction::Rtl, &config),
            "[dir=rtl] .button"
        );
        assert_eq!(generate_selector("[dir=ltr]", Direction::Rtl, &config), "[dir=\"rtl\"]");
    }

    #[test]
    fn generate_selector_with_configured_tokens() {
        let config = class_config();
        assert_eq!(generate_selector(".button", Direction::Rtl, &config), ".rtl .button");
        assert_eq!(
            generate_selector(".button:dir(ltr)", Direction::Rtl, &config),
            ".rtl .button"
        );
    }

    fn selector_strategy() -> impl Strategy<Value = String> {
        let component = prop_oneof![
            Just(".a".to_string()),
            Just("#main".to_string()),
            Just("span".to_string()),
            Just("[dir=rtl]".to_string()),
            Just("[dir=\"ltr\"]".to_string()),
            Just(":dir(rtl)".to_string()),
            Just(".ltr".to_string()),
            Just(".rtl".to_string()),
            Just(".theme-ltr".to_string()),
        ];
        let combinator = prop_oneof![Just(" "), Just(" > "), Just(" + "), Just(" ~ ")];
        prop::collection::vec((component, combinator), 1..5).prop_map(|parts| {
            let mut out = String::new();
            for (i, (component, combinator)) in parts.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(combinator);
                }
                out.push_str(&component);
            }
            out
        })
    }

    proptest! {
        #[test]
        fn prop_generate_is_idempotent(
            selector in selector_strategy(),
            rtl in any::<bool>(),
            custom in any::<bool>(),
        ) {
            let config = if custom { class_config() } else { default_config() };
            let direction = if rtl { Direction::Rtl } else { Direction::Ltr };
            let once = generate_selector(&selector, direction, &config);
            let twice = generate_selector(&once, direction, &config);
            prop_assert_eq!(&twice, &once);
            prop_assert_eq!(detect_direction(&once, &config), Some(direction));
        }

        #[test]
        fn prop_rightmost_hint_wins(
            first_rtl in any::<bool>(),
            combinator in prop_oneof![Just(" "), Just(" > "), Just(" + "), Just(" ~ ")],
            custom in any::<bool>(),
        ) {
            let config = if custom { class_config() } else { default_config() };
            let (first, second) = if first_rtl {
                (Direction::Rtl, Direction::Ltr)
            } else {
                (Direction::Ltr, Direction::Rtl)
            };
            let selector = format!(
                "{}{}{} .x",
                config.token(first),
                combinator,
                config.token(second)
            );
            prop_assert_eq!(detect_direction(&selector, &config), Some(second));
        }
    }
}
