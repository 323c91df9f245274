//! Tree walking and rule merging.
//!
//! [`Transformer::run`] makes two passes over a [`Stylesheet`]:
//!
//! 1. Every rule that needs processing (logical declarations or a
//!    direction-scoped selector) is split and its outputs are spliced into the
//!    parent container where the rule was. Untouched rules keep their place and
//!    content. `@keyframes` bodies are never entered.
//! 2. [`merge_rules`] folds rules with identical selector text within the same
//!    container into the first one.

use std::collections::HashMap;

use log::debug;

use crate::config::Options;
use crate::css::model::NodeKind;
use crate::css::parser::parse_css;
use crate::css::printer::to_css;
use crate::css::tree::{NodeId, Stylesheet};
use crate::error::Result;
use crate::mapping::MappingTable;
use crate::split::Splitter;

/// Counters describing what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Rules visited by the walker.
    pub rules_seen: usize,
    /// Rules that were handed to the splitter.
    pub rules_split: usize,
    /// Rules the splitter produced in their place.
    pub rules_emitted: usize,
    /// Rules folded into an earlier rule by the merge pass.
    pub rules_merged: usize,
}

/// A transformation engine: one immutable mapping table plus run options.
#[derive(Debug, Clone)]
pub struct Transformer {
    table: MappingTable,
    options: Options,
}

impl Transformer {
    /// Create an engine with the standard mapping table.
    pub fn new(options: Options) -> Self {
        Self::with_table(options, MappingTable::standard())
    }

    /// Create an engine with a custom mapping table.
    pub fn with_table(options: Options, table: MappingTable) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Transform `sheet` in place.
    pub fn run(&self, sheet: &mut Stylesheet) -> TransformStats {
        let splitter = Splitter::new(&self.table, &self.options);
        let mut stats = TransformStats::default();

        let walked = sheet.walk_rules();
        stats.rules_seen = walked.len();
        let pending: Vec<NodeId> = walked
            .into_iter()
            .filter(|&(_, id)| sheet.rule(id).is_some_and(|rule| splitter.needs_processing(rule)))
            .map(|(_, id)| id)
            .collect();

        for id in pending {
            let Some(rule) = sheet.rule(id) else { continue };
            let replacements = splitter.split(rule);
            stats.rules_split += 1;
            stats.rules_emitted += replacements.len();
            sheet.replace(id, replacements.into_iter().map(NodeKind::Rule));
        }

        stats.rules_merged = merge_rules(sheet);
        debug!(
            "transformed {} rule(s): {} split into {}, {} merged",
            stats.rules_seen, stats.rules_split, stats.rules_emitted, stats.rules_merged
        );
        stats
    }

    /// Parse, transform, and print a stylesheet.
    pub fn transform_css(&self, input: &str) -> Result<String> {
        let mut sheet = parse_css(input)?;
        self.run(&mut sheet);
        Ok(to_css(&sheet))
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Transform `sheet` in place with a fresh engine.
pub fn transform(sheet: &mut Stylesheet, options: &Options) -> TransformStats {
    Transformer::new(options.clone()).run(sheet)
}

/// Parse, transform, and print CSS text.
pub fn transform_css(input: &str, options: &Options) -> Result<String> {
    Transformer::new(options.clone()).transform_css(input)
}

/// Fold every rule whose selector text matches an earlier rule in the same
/// container into that earlier rule.
///
/// A later declaration overwrites the last earlier declaration with the same
/// property name in place, taking its value and its importance; new properties
/// are appended.
/// Returns the number of rules removed.
pub fn merge_rules(sheet: &mut Stylesheet) -> usize {
    let mut merged = 0;

    for container in sheet.containers() {
        let mut seen: HashMap<String, NodeId> = HashMap::new();

        for child in sheet.children(container).to_vec() {
            let Some(key) = sheet.rule(child).map(|rule| rule.selector_text()) else {
                continue;
            };
            let Some(&target) = seen.get(&key) else {
                seen.insert(key, child);
                continue;
            };
            let Some(NodeKind::Rule(later)) = sheet.remove(child) else {
                continue;
            };
            if let Some(earlier) = sheet.rule_mut(target) {
                for decl in later.declarations {
                    match earlier
                        .declarations
                        .iter_mut()
                        .rev()
                        .find(|existing| existing.property == decl.property)
                    {
                        Some(existing) => {
                            existing.value = decl.value;
                            existing.important = decl.important;
                        }
                        None => earlier.declarations.push(decl),
                    }
                }
            }
            merged += 1;
        }
    }

    merged
}
