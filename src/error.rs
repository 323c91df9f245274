//! Crate-level error types.

use crate::css::parser::ParseError;

/// Errors from configuration parsing. Only surfaced by strict parsers such as
/// `OutputOrder::from_str`; the engine itself falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown output order: {0:?} (expected \"ltr-first\" or \"rtl-first\")")]
    UnknownOutputOrder(String),
}

/// Errors from mapping a declaration to physical properties.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("unbalanced parentheses in value of {property}: {value}")]
    UnbalancedParentheses { property: String, value: String },
}

/// Errors returned by the text-level entry points.
///
/// Mapping failures never reach this type: the splitter logs them and leaves
/// the rule as written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Convenience result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
