//! Engine configuration: direction selector tokens and output order.
//!
//! Invalid values never fail a run: blank selector tokens and unknown output
//! orders fall back to the defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default selector fragment scoping a rule to left-to-right documents.
pub const DEFAULT_LTR_SELECTOR: &str = "[dir=\"ltr\"]";
/// Default selector fragment scoping a rule to right-to-left documents.
pub const DEFAULT_RTL_SELECTOR: &str = "[dir=\"rtl\"]";

/// A reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }

    /// `"ltr"` or `"rtl"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selector fragments used to scope rules to a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionConfig {
    ltr: String,
    rtl: String,
}

impl DirectionConfig {
    /// Create a config from two selector tokens. Blank tokens fall back to the
    /// `[dir="..."]` defaults.
    pub fn new(ltr: impl Into<String>, rtl: impl Into<String>) -> Self {
        Self {
            ltr: token_or_default(ltr.into(), DEFAULT_LTR_SELECTOR),
            rtl: token_or_default(rtl.into(), DEFAULT_RTL_SELECTOR),
        }
    }

    /// The selector token for `direction`.
    pub fn token(&self, direction: Direction) -> &str {
        match direction {
            Direction::Ltr => &self.ltr,
            Direction::Rtl => &self.rtl,
        }
    }
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            ltr: DEFAULT_LTR_SELECTOR.to_string(),
            rtl: DEFAULT_RTL_SELECTOR.to_string(),
        }
    }
}

fn token_or_default(token: String, default: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Relative order of the two variants generated from an unscoped rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputOrder {
    #[default]
    LtrFirst,
    RtlFirst,
}

impl OutputOrder {
    /// Parse `"ltr-first"` / `"rtl-first"`, falling back to [`OutputOrder::LtrFirst`].
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// The two directions in emission order.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            OutputOrder::LtrFirst => [Direction::Ltr, Direction::Rtl],
            OutputOrder::RtlFirst => [Direction::Rtl, Direction::Ltr],
        }
    }
}

impl FromStr for OutputOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr-first" => Ok(OutputOrder::LtrFirst),
            "rtl-first" => Ok(OutputOrder::RtlFirst),
            other => Err(ConfigError::UnknownOutputOrder(other.to_string())),
        }
    }
}

/// Options for a transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Selector tokens used for direction scoping.
    pub direction: DirectionConfig,
    /// Emission order for variants of unscoped rules.
    pub output_order: OutputOrder,
}

impl Options {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the LTR selector token (builder). Blank values keep the default.
    pub fn with_ltr_selector(mut self, selector: impl Into<String>) -> Self {
        self.direction.ltr = token_or_default(selector.into(), DEFAULT_LTR_SELECTOR);
        self
    }

    /// Set the RTL selector token (builder). Blank values keep the default.
    pub fn with_rtl_selector(mut self, selector: impl Into<String>) -> Self {
        self.direction.rtl = token_or_default(selector.into(), DEFAULT_RTL_SELECTOR);
        self
    }

    /// Set the output order (builder).
    pub fn with_output_order(mut self, order: OutputOrder) -> Self {
        self.output_order = order;
        self
    }
}
