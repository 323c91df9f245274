//! # dirscope
//!
//! Rewrites CSS logical properties into direction-scoped physical rules.
//!
//! A rule such as `.button { padding-inline-start: 1rem }` has no physical meaning
//! until a writing direction is known. dirscope emits one rule per direction, each
//! scoped by a configurable selector token and carrying physical declarations:
//!
//! ```
//! use dirscope::{transform_css, Options};
//!
//! let out =
//!     transform_css(".button { padding-inline-start: 1rem; }", &Options::default()).unwrap();
//! assert_eq!(
//!     out,
//!     "[dir=\"ltr\"] .button {\n  padding-left: 1rem;\n}\n\
//!      [dir=\"rtl\"] .button {\n  padding-right: 1rem;\n}\n"
//! );
//! ```
//!
//! ## Core Systems
//!
//! - **[`css`]** - Tokenizer, parser, slotmap-backed stylesheet tree, printer
//! - **[`selector`]** - Direction detection and rewriting on raw selector text
//! - **[`mapping`]** - Layered logical-to-physical mapping table
//! - **[`split`]** - Splits one rule into its LTR and RTL variants
//! - **[`transform`]** - Tree walker, rule merger, [`Transformer`] engine
//! - **[`config`]** - Direction tokens and output order

// Foundation
pub mod config;
pub mod error;

// Stylesheet model
pub mod css;

// Direction analysis and mapping
pub mod mapping;
pub mod selector;

// Rewriting
pub mod split;
pub mod transform;

pub use config::{Direction, DirectionConfig, Options, OutputOrder};
pub use css::parser::parse_css;
pub use css::printer::to_css;
pub use css::tree::Stylesheet;
pub use error::{Error, Result};
pub use mapping::MappingTable;
pub use transform::{merge_rules, transform, transform_css, TransformStats, Transformer};
