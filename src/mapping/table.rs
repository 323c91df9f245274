//! The composed logical-to-physical table.
//!
//! A table is built once per engine from layers. When a later layer names a
//! property an earlier layer already handles, the two are chained: the new
//! handler runs first and the old one only sees declarations it declined.

use std::collections::HashMap;

use crate::config::Direction;
use crate::css::model::{Declaration, Rule};
use crate::error::MappingError;
use crate::mapping::handler::Handler;
use crate::mapping::{baseline, experimental, shim};

/// Immutable property-name -> handler map.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    handlers: HashMap<&'static str, Handler>,
}

/// Layer-by-layer builder for a [`MappingTable`].
#[derive(Debug, Default)]
pub struct MappingTableBuilder {
    handlers: HashMap<&'static str, Handler>,
}

impl MappingTableBuilder {
    /// Add a layer of entries on top of everything added so far.
    pub fn layer(mut self, entries: impl IntoIterator<Item = (&'static str, Handler)>) -> Self {
        for (property, handler) in entries {
            let composed = match self.handlers.remove(property) {
                Some(previous) => Handler::Chain(Box::new(handler), Box::new(previous)),
                None => handler,
            };
            self.handlers.insert(property, composed);
        }
        self
    }

    /// Finish the table.
    pub fn build(self) -> MappingTable {
        MappingTable {
            handlers: self.handlers,
        }
    }
}

impl MappingTable {
    /// Start an empty table.
    pub fn builder() -> MappingTableBuilder {
        MappingTableBuilder::default()
    }

    /// Baseline, then shim, then experimental layers.
    pub fn standard() -> Self {
        Self::builder()
            .layer(baseline::entries())
            .layer(shim::entries())
            .layer(experimental::entries())
            .build()
    }

    /// Number of property names handled.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler for a property name, case-insensitively.
    pub fn handler(&self, property: &str) -> Option<&Handler> {
        self.handlers.get(property.to_ascii_lowercase().as_str())
    }

    /// Handler for a declaration. Custom properties never match.
    fn handler_for(&self, decl: &Declaration) -> Option<&Handler> {
        if decl.is_custom_property() {
            return None;
        }
        self.handler(&decl.property)
    }

    /// Whether `decl` is something this table would try to rewrite.
    pub fn is_logical(&self, decl: &Declaration) -> bool {
        self.handler_for(decl)
            .is_some_and(|handler| handler.applies_to(&decl.value))
    }

    /// Whether any declaration in `rule` is logical.
    pub fn has_logical_properties(&self, rule: &Rule) -> bool {
        rule.declarations.iter().any(|decl| self.is_logical(decl))
    }

    /// Rewrite one declaration for `direction`. Non-logical declarations come
    /// back as a single clone.
    pub fn map_declaration(
        &self,
        decl: &Declaration,
        direction: Direction,
    ) -> Result<Vec<Declaration>, MappingError> {
        match self.handler_for(decl) {
            Some(handler) => Ok(handler
                .apply(decl, direction)?
                .unwrap_or_else(|| vec![decl.clone()])),
            None => Ok(vec![decl.clone()]),
        }
    }

    /// Rewrite a declaration list for `direction`, keeping source order.
    pub fn map_declarations(
        &self,
        declarations: &[Declaration],
        direction: Direction,
    ) -> Result<Vec<Declaration>, MappingError> {
        let mut out = Vec::with_capacity(declarations.len());
        for decl in declarations {
            out.extend(self.map_declaration(decl, direction)?);
        }
        Ok(out)
    }
}
