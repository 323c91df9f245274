//! Rule splitting: one source rule in, one to three rules out.
//!
//! A rule is processed when it has logical declarations or a selector already
//! scoped to a direction. Logical-only rules whose mapping differs between
//! directions become an LTR and an RTL variant, ordered by
//! [`OutputOrder`](crate::config::OutputOrder), preceded by an unscoped rule
//! holding the declarations that map the same both ways (block axis, sizes).
//! Rules whose whole mapping is the same both ways stay a single unscoped
//! rule. Rules with author-scoped selectors keep each selector in its own
//! direction's variant, LTR first.

use log::{debug, warn};

use crate::config::{Direction, Options};
use crate::css::model::{Declaration, Rule};
use crate::error::MappingError;
use crate::mapping::MappingTable;
use crate::selector::{detect_direction, prefix_direction, strip_direction};

/// How a rule relates to direction, before any rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub has_logical: bool,
    /// Selectors scoped to LTR, direction hints stripped.
    pub ltr: Vec<String>,
    /// Selectors scoped to RTL, direction hints stripped.
    pub rtl: Vec<String>,
    /// Selectors with no direction hint, as written.
    pub neutral: Vec<String>,
}

impl Classification {
    pub fn has_ltr_selector(&self) -> bool {
        !self.ltr.is_empty()
    }

    pub fn has_rtl_selector(&self) -> bool {
        !self.rtl.is_empty()
    }

    /// Whether the splitter has anything to do with this rule.
    pub fn needs_processing(&self) -> bool {
        self.has_logical || self.has_ltr_selector() || self.has_rtl_selector()
    }

    fn explicitly_scoped(&self) -> bool {
        self.has_ltr_selector() || self.has_rtl_selector()
    }
}

/// Splits rules using a mapping table and run options.
#[derive(Debug, Clone, Copy)]
pub struct Splitter<'a> {
    table: &'a MappingTable,
    options: &'a Options,
}

impl<'a> Splitter<'a> {
    pub fn new(table: &'a MappingTable, options: &'a Options) -> Self {
        Self { table, options }
    }

    /// Sort a rule's selectors by direction and check for logical declarations.
    pub fn classify(&self, rule: &Rule) -> Classification {
        let config = &self.options.direction;
        let mut classification = Classification {
            has_logical: self.table.has_logical_properties(rule),
            ..Classification::default()
        };

        for selector in &rule.selectors {
            match detect_direction(selector, config) {
                Some(Direction::Ltr) => classification.ltr.push(strip_direction(selector, config)),
                Some(Direction::Rtl) => classification.rtl.push(strip_direction(selector, config)),
                None => classification.neutral.push(selector.clone()),
            }
        }
        classification
    }

    /// Whether `rule` would be touched by [`Splitter::split`].
    pub fn needs_processing(&self, rule: &Rule) -> bool {
        self.classify(rule).needs_processing()
    }

    /// Split `rule` into its output rules.
    ///
    /// A rule with nothing to do comes back as a single clone. If mapping fails
    /// the failure is logged and the rule is also returned unchanged.
    pub fn split(&self, rule: &Rule) -> Vec<Rule> {
        let classification = self.classify(rule);
        if !classification.needs_processing() {
            return vec![rule.clone()];
        }

        let mapped = if classification.has_logical {
            match self.map_both(&rule.declarations) {
                Ok(mapped) => mapped,
                Err(err) => {
                    warn!("leaving rule `{}` unmapped: {err}", rule.selector_text());
                    return vec![rule.clone()];
                }
            }
        } else {
            rule.declarations.iter().map(Mapped::verbatim).collect()
        };
        let symmetric = mapped.iter().all(Mapped::is_symmetric);

        let out = if classification.explicitly_scoped() {
            let (ltr_declarations, rtl_declarations) = flatten(mapped);
            self.split_scoped(&classification, symmetric, ltr_declarations, rtl_declarations)
        } else if symmetric {
            vec![Rule::new(rule.selectors.clone(), flatten(mapped).0)]
        } else {
            self.split_unscoped(&classification.neutral, mapped)
        };

        debug!(
            "split `{}` into {} rule(s){}",
            rule.selector_text(),
            out.len(),
            if symmetric { " (direction-independent)" } else { "" }
        );
        out
    }

    fn map_both(&self, declarations: &[Declaration]) -> Result<Vec<Mapped>, MappingError> {
        declarations
            .iter()
            .map(|decl| -> Result<Mapped, MappingError> {
                Ok(Mapped {
                    logical: self.table.is_logical(decl),
                    ltr: self.table.map_declaration(decl, Direction::Ltr)?,
                    rtl: self.table.map_declaration(decl, Direction::Rtl)?,
                })
            })
            .collect()
    }

    fn scope(&self, selectors: &[String], direction: Direction) -> Vec<String> {
        selectors
            .iter()
            .map(|selector| prefix_direction(selector, direction, &self.options.direction))
            .collect()
    }

    /// Logical-only rule: an unscoped rule for declarations that map the same
    /// way in both directions, then both scoped variants in the configured
    /// order.
    ///
    /// A direction-independent declaration stays scoped when an earlier scoped
    /// declaration sets an overlapping property, since the scoped rules win
    /// over the unscoped one regardless of source order.
    fn split_unscoped(&self, selectors: &[String], mapped: Vec<Mapped>) -> Vec<Rule> {
        let mut shared = Vec::new();
        let mut ltr_declarations: Vec<Declaration> = Vec::new();
        let mut rtl_declarations: Vec<Declaration> = Vec::new();

        for entry in mapped {
            let shadowed = entry.ltr.iter().any(|decl| {
                ltr_declarations
                    .iter()
                    .chain(&rtl_declarations)
                    .any(|scoped| overlaps(&scoped.property, &decl.property))
            });
            if entry.logical && entry.is_symmetric() && !shadowed {
                shared.extend(entry.ltr);
            } else {
                ltr_declarations.extend(entry.ltr);
                rtl_declarations.extend(entry.rtl);
            }
        }

        let mut out = Vec::with_capacity(3);
        if !shared.is_empty() {
            out.push(Rule::new(selectors.to_vec(), shared));
        }
        let mut ltr = Some(Rule::new(self.scope(selectors, Direction::Ltr), ltr_declarations));
        let mut rtl = Some(Rule::new(self.scope(selectors, Direction::Rtl), rtl_declarations));
        out.extend(
            self.options
                .output_order
                .directions()
                .into_iter()
                .filter_map(|direction| match direction {
                    Direction::Ltr => ltr.take(),
                    Direction::Rtl => rtl.take(),
                }),
        );
        out
    }

    /// Rule with author-scoped selectors: each direction keeps its own
    /// selectors, always LTR then RTL.
    ///
    /// Neutral selectors in the same group need both variants when the mapping
    /// differs by direction; otherwise they ride along unprefixed with the
    /// first variant.
    fn split_scoped(
        &self,
        classification: &Classification,
        symmetric: bool,
        ltr_declarations: Vec<Declaration>,
        rtl_declarations: Vec<Declaration>,
    ) -> Vec<Rule> {
        let mut ltr_selectors = self.scope(&classification.ltr, Direction::Ltr);
        let mut rtl_selectors = self.scope(&classification.rtl, Direction::Rtl);

        if !classification.neutral.is_empty() {
            if symmetric {
                let first = if ltr_selectors.is_empty() {
                    &mut rtl_selectors
                } else {
                    &mut ltr_selectors
                };
                first.extend(classification.neutral.iter().cloned());
            } else {
                ltr_selectors.extend(self.scope(&classification.neutral, Direction::Ltr));
                rtl_selectors.extend(self.scope(&classification.neutral, Direction::Rtl));
            }
        }

        let mut out = Vec::with_capacity(2);
        if !ltr_selectors.is_empty() {
            out.push(Rule::new(ltr_selectors, ltr_declarations));
        }
        if !rtl_selectors.is_empty() {
            out.push(Rule::new(rtl_selectors, rtl_declarations));
        }
        out
    }
}

/// One source declaration mapped for both directions.
#[derive(Debug)]
struct Mapped {
    logical: bool,
    ltr: Vec<Declaration>,
    rtl: Vec<Declaration>,
}

impl Mapped {
    fn verbatim(decl: &Declaration) -> Self {
        Self {
            logical: false,
            ltr: vec![decl.clone()],
            rtl: vec![decl.clone()],
        }
    }

    fn is_symmetric(&self) -> bool {
        self.ltr == self.rtl
    }
}

fn flatten(mapped: Vec<Mapped>) -> (Vec<Declaration>, Vec<Declaration>) {
    let mut ltr = Vec::new();
    let mut rtl = Vec::new();
    for entry in mapped {
        ltr.extend(entry.ltr);
        rtl.extend(entry.rtl);
    }
    (ltr, rtl)
}

/// Whether setting one property can change the other: the same name, or a
/// shorthand and one of its longhands (`margin` and `margin-top`).
fn overlaps(a: &str, b: &str) -> bool {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    a == b || is_longhand_of(&a, &b) || is_longhand_of(&b, &a)
}

fn is_longhand_of(longhand: &str, shorthand: &str) -> bool {
    longhand
        .strip_prefix(shorthand)
        .is_some_and(|rest| rest.starts_with('-'))
}
