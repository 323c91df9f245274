//! Logical-to-physical mapping: handlers, value helpers, and the layered table.

mod baseline;
mod experimental;
pub mod handler;
mod shim;
pub mod table;
pub mod values;

pub use handler::{physical_side, Axis, Edge, Handler, Keyword};
pub use table::{MappingTable, MappingTableBuilder};
