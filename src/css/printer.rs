//! Stylesheet serializer.
//!
//! Prints a [`Stylesheet`] back to CSS text with two-space indentation per
//! nesting level and one declaration per line. Node order and per-declaration
//! `!important` are preserved; `@keyframes` bodies are written back verbatim.

use std::fmt::Write;

use crate::css::model::{AtRuleBody, Declaration, NodeKind};
use crate::css::tree::{NodeId, Stylesheet};

const INDENT: &str = "  ";

/// Serialize a stylesheet to CSS text.
pub fn to_css(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    for &child in sheet.children(sheet.root()) {
        write_node(sheet, child, 0, &mut out);
    }
    out
}

/// Serialize a single declaration without indentation or trailing newline.
pub fn declaration_to_css(decl: &Declaration) -> String {
    if decl.important {
        format!("{}: {} !important;", decl.property, decl.value)
    } else {
        format!("{}: {};", decl.property, decl.value)
    }
}

fn write_node(sheet: &Stylesheet, id: NodeId, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    match sheet.get(id) {
        Some(NodeKind::Rule(rule)) => {
            write_block_open(out, &indent, &rule.selector_text());
            write_declarations(out, &rule.declarations, depth + 1);
            let _ = writeln!(out, "{indent}}}");
        }
        Some(NodeKind::AtRule(at)) => {
            let head = if at.prelude.is_empty() {
                format!("@{}", at.name)
            } else {
                format!("@{} {}", at.name, at.prelude)
            };
            match &at.body {
                AtRuleBody::Statement => {
                    let _ = writeln!(out, "{indent}{head};");
                }
                AtRuleBody::Rules => {
                    write_block_open(out, &indent, &head);
                    for &child in sheet.children(id) {
                        write_node(sheet, child, depth + 1, out);
                    }
                    let _ = writeln!(out, "{indent}}}");
                }
                AtRuleBody::Declarations(declarations) => {
                    write_block_open(out, &indent, &head);
                    write_declarations(out, declarations, depth + 1);
                    let _ = writeln!(out, "{indent}}}");
                }
                AtRuleBody::Raw(raw) => {
                    let _ = writeln!(out, "{indent}{head} {{{raw}}}");
                }
            }
        }
        Some(NodeKind::Root) | None => {}
    }
}

fn write_block_open(out: &mut String, indent: &str, head: &str) {
    let _ = writeln!(out, "{indent}{head} {{");
}

fn write_declarations(out: &mut String, declarations: &[Declaration], depth: usize) {
    let indent = INDENT.repeat(depth);
    for decl in declarations {
        let _ = writeln!(out, "{indent}{}", declaration_to_css(decl));
    }
}
