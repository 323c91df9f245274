//! Stylesheet AST: Declaration, Rule, AtRule, NodeKind.

/// A single CSS property declaration, e.g. `margin-inline: 1rem 2rem !important`.
///
/// The value is kept as opaque source text; nothing in this crate validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name as written, e.g. `"margin-inline-start"`.
    pub property: String,
    /// The raw value text with surrounding whitespace trimmed.
    pub value: String,
    /// Whether `!important` was specified.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important,
        }
    }

    /// Create a declaration that copies this one's importance onto a new property/value.
    pub fn derive(&self, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, value, self.important)
    }

    /// Returns `true` for custom properties (`--name`).
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }
}

/// A style rule: a comma-separated selector group and its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    /// Selectors in source order, whitespace-collapsed.
    pub selectors: Vec<String>,
    /// Declarations in source order. Later same-named declarations win.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Create a new rule.
    pub fn new(selectors: Vec<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// The selector group as it is printed: selectors joined with `", "`.
    pub fn selector_text(&self) -> String {
        self.selectors.join(", ")
    }
}

/// What an at-rule carries after its prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBody {
    /// Statement at-rule terminated by `;` (`@import`, `@charset`, `@layer a, b;`).
    Statement,
    /// Block whose children are rules and nested at-rules (`@media`, `@supports`, ...).
    /// The children live in the tree, not here.
    Rules,
    /// Block holding declarations directly (`@font-face`, `@page`, ...).
    Declarations(Vec<Declaration>),
    /// Block kept verbatim (`@keyframes`).
    Raw(String),
}

/// An at-rule such as `@media (min-width: 40em) { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Lowercased name without the `@`, e.g. `"media"`.
    pub name: String,
    /// Prelude text between the name and the block/semicolon.
    pub prelude: String,
    pub body: AtRuleBody,
}

impl AtRule {
    /// Create a new at-rule.
    pub fn new(name: impl Into<String>, prelude: impl Into<String>, body: AtRuleBody) -> Self {
        Self {
            name: name.into(),
            prelude: prelude.into(),
            body,
        }
    }

    /// Returns `true` for `@keyframes` and its vendor-prefixed forms.
    pub fn is_keyframes(&self) -> bool {
        self.name.ends_with("keyframes")
    }

    /// Whether this at-rule's children are style rules that can be walked.
    pub fn holds_rules(&self) -> bool {
        matches!(self.body, AtRuleBody::Rules)
    }
}

/// Data stored in one arena node of a [`crate::css::tree::Stylesheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The stylesheet root container.
    Root,
    Rule(Rule),
    AtRule(AtRule),
}

impl NodeKind {
    /// Borrow the rule if this node is one.
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Mutably borrow the rule if this node is one.
    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Whether this node can hold rule children that the walker descends into.
    pub fn is_rule_container(&self) -> bool {
        match self {
            NodeKind::Root => true,
            NodeKind::AtRule(at) => at.holds_rules() && !at.is_keyframes(),
            NodeKind::Rule(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_new() {
        let decl = Declaration::new("color", "red", false);
        assert_eq!(decl.property, "color");
        assert_eq!(decl.value, "red");
        assert!(!decl.important);
    }

    #[test]
    fn declaration_derive_keeps_importance() {
        let decl = Declaration::new("margin-inline-start", "10px", true);
        let derived = decl.derive("margin-left", "10px");
        assert_eq!(derived, Declaration::new("margin-left", "10px", true));
    }

    #[test]
    fn custom_property_detection() {
        assert!(Declaration::new("--margin-inline", "1px", false).is_custom_property());
        assert!(!Declaration::new("margin-inline", "1px", false).is_custom_property());
    }

    #[test]
    fn rule_selector_text() {
        let rule = Rule::new(vec![".a".into(), ".b > .c".into()], Vec::new());
        assert_eq!(rule.selector_text(), ".a, .b > .c");
    }

    #[test]
    fn keyframes_detection() {
        let plain = AtRule::new("keyframes", "spin", AtRuleBody::Raw(String::new()));
        let prefixed = AtRule::new("-webkit-keyframes", "spin", AtRuleBody::Raw(String::new()));
        let media = AtRule::new("media", "print", AtRuleBody::Rules);
        assert!(plain.is_keyframes());
        assert!(prefixed.is_keyframes());
        assert!(!media.is_keyframes());
    }

    #[test]
    fn rule_containers() {
        assert!(NodeKind::Root.is_rule_container());
        let media = AtRule::new("media", "print", AtRuleBody::Rules);
        assert!(NodeKind::AtRule(media).is_rule_container());
        assert!(!NodeKind::AtRule(AtRule::new(
            "font-face",
            "",
            AtRuleBody::Declarations(Vec::new())
        ))
        .is_rule_container());
        assert!(!NodeKind::Rule(Rule::default()).is_rule_container());
    }
}
