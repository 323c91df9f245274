//! CSS engine: tokenizer, parser, node model, arena tree, printer.

pub mod tokenizer;
pub mod model;
pub mod tree;
pub mod parser;
pub mod printer;
