//! The closed set of rewrite rules a table entry can hold.

use log::trace;

use crate::config::Direction;
use crate::css::model::Declaration;
use crate::error::MappingError;
use crate::mapping::values::{self, Unbalanced};

/// Flow-relative axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Block,
    Inline,
}

/// Start or end edge of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// The physical side an edge lands on in horizontal writing mode.
///
/// Block edges are always `top`/`bottom`; inline edges follow the direction.
pub fn physical_side(axis: Axis, edge: Edge, direction: Direction) -> &'static str {
    match (axis, edge, direction) {
        (Axis::Block, Edge::Start, _) => "top",
        (Axis::Block, Edge::End, _) => "bottom",
        (Axis::Inline, Edge::Start, Direction::Ltr)
        | (Axis::Inline, Edge::End, Direction::Rtl) => "left",
        (Axis::Inline, Edge::End, Direction::Ltr)
        | (Axis::Inline, Edge::Start, Direction::Rtl) => "right",
    }
}

/// Replacement for a keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Same physical keyword in both directions (`resize: block` -> `vertical`).
    Fixed(&'static str),
    /// The physical side of a flow edge (`text-align: start` -> `left`/`right`).
    Side(Axis, Edge),
}

impl Keyword {
    fn resolve(self, direction: Direction) -> &'static str {
        match self {
            Keyword::Fixed(word) => word,
            Keyword::Side(axis, edge) => physical_side(axis, edge, direction),
        }
    }
}

/// How one logical property is rewritten.
///
/// Property patterns contain a single `{}` that is replaced by the physical
/// side, e.g. `"margin-{}"` or `"border-{}-width"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Axis shorthand (`margin-inline: 1rem 2rem`). With `spread`, one value
    /// covers both edges and two values go start then end; without it the whole
    /// value is copied to both edges (`border-inline: 1px solid`).
    Axis {
        pattern: &'static str,
        axis: Axis,
        spread: bool,
    },
    /// A single edge (`padding-inline-start`).
    Edge {
        pattern: &'static str,
        axis: Axis,
        edge: Edge,
    },
    /// A logical border-radius corner, named block edge first.
    Corner { block: Edge, inline: Edge },
    /// Same value under a physical name (`inline-size` -> `width`).
    Rename(&'static str),
    /// `inset: <1-4 values>` -> `top right bottom left`.
    Inset,
    /// Whole-value keyword swap; values not listed pass through.
    Keywords(&'static [(&'static str, Keyword)]),
    /// Flow keywords inside gradient `to`/`at` clauses.
    Gradient,
    /// Try the first handler, fall back to the second if it leaves the
    /// declaration alone.
    Chain(Box<Handler>, Box<Handler>),
}

impl Handler {
    /// Rewrite `decl` for `direction`.
    ///
    /// `Ok(None)` means the declaration has no logical content for this handler
    /// and stays as written. Every produced declaration keeps `decl`'s
    /// importance.
    pub fn apply(
        &self,
        decl: &Declaration,
        direction: Direction,
    ) -> Result<Option<Vec<Declaration>>, MappingError> {
        let unbalanced = |_: Unbalanced| MappingError::UnbalancedParentheses {
            property: decl.property.clone(),
            value: decl.value.clone(),
        };

        let mapped = match self {
            Handler::Axis {
                pattern,
                axis,
                spread,
            } => {
                let (first, second) = if *spread {
                    match values::split_components(&decl.value).map_err(unbalanced)?.as_slice() {
                        [only] => (only.to_string(), only.to_string()),
                        [start, end] => (start.to_string(), end.to_string()),
                        _ => (decl.value.clone(), decl.value.clone()),
                    }
                } else {
                    (decl.value.clone(), decl.value.clone())
                };
                Some(vec![
                    decl.derive(side_property(pattern, *axis, Edge::Start, direction), first),
                    decl.derive(side_property(pattern, *axis, Edge::End, direction), second),
                ])
            }
            Handler::Edge {
                pattern,
                axis,
                edge,
            } => Some(vec![decl.derive(
                side_property(pattern, *axis, *edge, direction),
                decl.value.clone(),
            )]),
            Handler::Corner { block, inline } => {
                let vertical = physical_side(Axis::Block, *block, direction);
                let horizontal = physical_side(Axis::Inline, *inline, direction);
                Some(vec![decl.derive(
                    format!("border-{vertical}-{horizontal}-radius"),
                    decl.value.clone(),
                )])
            }
            Handler::Rename(physical) => Some(vec![decl.derive(*physical, decl.value.clone())]),
            Handler::Inset => {
                let parts = values::split_components(&decl.value).map_err(unbalanced)?;
                let [top, right, bottom, left] = match parts.as_slice() {
                    [all] => [*all; 4],
                    [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
                    [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
                    [top, right, bottom, left] => [*top, *right, *bottom, *left],
                    _ => [decl.value.as_str(); 4],
                };
                Some(vec![
                    decl.derive("top", top),
                    decl.derive("right", right),
                    decl.derive("bottom", bottom),
                    decl.derive("left", left),
                ])
            }
            Handler::Keywords(table) => {
                let value = decl.value.trim();
                table
                    .iter()
                    .find(|(logical, _)| value.eq_ignore_ascii_case(logical))
                    .map(|(_, keyword)| {
                        vec![decl.derive(decl.property.clone(), keyword.resolve(direction))]
                    })
            }
            Handler::Gradient => values::rewrite_gradients(&decl.value, direction)
                .map_err(unbalanced)?
                .map(|value| vec![decl.derive(decl.property.clone(), value)]),
            Handler::Chain(first, fallback) => match first.apply(decl, direction)? {
                Some(mapped) => Some(mapped),
                None => fallback.apply(decl, direction)?,
            },
        };

        if let Some(mapped) = &mapped {
            trace!(
                "{direction}: {} -> {}",
                decl.property,
                mapped
                    .iter()
                    .map(|d| d.property.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(mapped)
    }

    /// Whether a declaration with this value could be rewritten at all.
    ///
    /// Gradient entries only count when a flow keyword sits inside a gradient,
    /// so plain `background: red` does not send a rule through the splitter.
    pub fn applies_to(&self, value: &str) -> bool {
        match self {
            Handler::Gradient => values::has_flow_keyword(value),
            Handler::Chain(first, fallback) => {
                first.applies_to(value) || fallback.applies_to(value)
            }
            _ => true,
        }
    }
}

fn side_property(pattern: &str, axis: Axis, edge: Edge, direction: Direction) -> String {
    pattern.replacen("{}", physical_side(axis, edge, direction), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl(property: &str, value: &str) -> Declaration {
        Declaration::new(property, value, false)
    }

    fn pairs(mapped: Option<Vec<Declaration>>) -> Vec<(String, String)> {
        mapped
            .unwrap_or_default()
            .into_iter()
            .map(|d| (d.property, d.value))
            .collect()
    }

    fn pair(property: &str, value: &str) -> (String, String) {
        (property.to_string(), value.to_string())
    }

    const MARGIN_INLINE: Handler = Handler::Axis {
        pattern: "margin-{}",
        axis: Axis::Inline,
        spread: true,
    };

    #[test]
    fn physical_sides() {
        assert_eq!(physical_side(Axis::Inline, Edge::Start, Direction::Ltr), "left");
        assert_eq!(physical_side(Axis::Inline, Edge::Start, Direction::Rtl), "right");
        assert_eq!(physical_side(Axis::Block, Edge::End, Direction::Rtl), "bottom");
    }

    #[test]
    fn axis_one_value() {
        let mapped = MARGIN_INLINE.apply(&decl("margin-inline", "1rem"), Direction::Ltr).unwrap();
        assert_eq!(pairs(mapped), vec![pair("margin-left", "1rem"), pair("margin-right", "1rem")]);
    }

    #[test]
    fn axis_two_values() {
        let ltr = MARGIN_INLINE.apply(&decl("margin-inline", "1rem 2rem"), Direction::Ltr).unwrap();
        assert_eq!(pairs(ltr), vec![pair("margin-left", "1rem"), pair("margin-right", "2rem")]);
        let rtl = MARGIN_INLINE.apply(&decl("margin-inline", "1rem 2rem"), Direction::Rtl).unwrap();
        assert_eq!(pairs(rtl), vec![pair("margin-right", "1rem"), pair("margin-left", "2rem")]);
    }

    #[test]
    fn axis_invalid_value_is_copied() {
        let mapped = MARGIN_INLINE
            .apply(&decl("margin-inline", "invalid-value"), Direction::Ltr)
            .unwrap();
        assert_eq!(
            pairs(mapped),
            vec![pair("margin-left", "invalid-value"), pair("margin-right", "invalid-value")]
        );
    }

    #[test]
    fn axis_without_spread_copies_whole_value() {
        let border = Handler::Axis {
            pattern: "border-{}",
            axis: Axis::Inline,
            spread: false,
        };
        let mapped = border.apply(&decl("border-inline", "1px solid red"), Direction::Rtl).unwrap();
        assert_eq!(
            pairs(mapped),
            vec![pair("border-right", "1px solid red"), pair("border-left", "1px solid red")]
        );
    }

    #[test]
    fn importance_is_kept() {
        let important = Declaration::new("margin-inline", "1px", true);
        let mapped = MARGIN_INLINE.apply(&important, Direction::Ltr).unwrap().unwrap();
        assert!(mapped.iter().all(|d| d.important));
    }

    #[test]
    fn maps_corner() {
        let corner = Handler::Corner {
            block: Edge::Start,
            inline: Edge::End,
        };
        let ltr = corner.apply(&decl("border-start-end-radius", "4px"), Direction::Ltr).unwrap();
        assert_eq!(pairs(ltr), vec![pair("border-top-right-radius", "4px")]);
        let rtl = corner.apply(&decl("border-start-end-radius", "4px"), Direction::Rtl).unwrap();
        assert_eq!(pairs(rtl), vec![pair("border-top-left-radius", "4px")]);
    }

    #[test]
    fn inset_shorthand() {
        let mapped = Handler::Inset.apply(&decl("inset", "1px 2px 3px"), Direction::Ltr).unwrap();
        assert_eq!(
            pairs(mapped),
            vec![
                pair("top", "1px"),
                pair("right", "2px"),
                pair("bottom", "3px"),
                pair("left", "2px"),
            ]
        );
    }

    #[test]
    fn keywords_pass_through_unknown() {
        const ALIGN: &[(&str, Keyword)] = &[
            ("start", Keyword::Side(Axis::Inline, Edge::Start)),
            ("end", Keyword::Side(Axis::Inline, Edge::End)),
        ];
        let handler = Handler::Keywords(ALIGN);
        let start = handler.apply(&decl("text-align", "START"), Direction::Rtl).unwrap();
        assert_eq!(pairs(start), vec![pair("text-align", "right")]);
        assert_eq!(handler.apply(&decl("text-align", "center"), Direction::Rtl).unwrap(), None);
    }

    #[test]
    fn chain_delegates_when_first_declines() {
        const FIRST: &[(&str, Keyword)] = &[("flow", Keyword::Fixed("left"))];
        let chain = Handler::Chain(
            Box::new(Handler::Keywords(FIRST)),
            Box::new(Handler::Rename("width")),
        );
        let first = chain.apply(&decl("x", "flow"), Direction::Ltr).unwrap();
        assert_eq!(pairs(first), vec![pair("x", "left")]);
        let fallback = chain.apply(&decl("x", "10px"), Direction::Ltr).unwrap();
        assert_eq!(pairs(fallback), vec![pair("width", "10px")]);
    }

    #[test]
    fn unbalanced_value_is_an_error() {
        let result = MARGIN_INLINE.apply(&decl("margin-inline", "calc(1px"), Direction::Ltr);
        assert!(matches!(result, Err(MappingError::UnbalancedParentheses { .. })));
    }

    #[test]
    fn gradient_applies_only_with_keywords() {
        assert!(Handler::Gradient.applies_to("linear-gradient(to inline-end, red, blue)"));
        assert!(!Handler::Gradient.applies_to("red"));
        assert!(Handler::Rename("width").applies_to("red"));
    }
}
