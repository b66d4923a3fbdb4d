//! Schema model: classes, properties, hierarchy, and column bindings.
//!
//! Everything is reached through [`SchemaRegistry`]. Config loading and
//! interactive derivation both build it through `define_class` and
//! `define_property` only.

mod binder;
mod hierarchy;
mod item;
mod registry;

pub use item::{ClassDef, Item, ItemKind, PropertyDef};
pub use registry::SchemaRegistry;

/// Universal top class that root classes are placed under on output.
pub const TOP_CLASS: &str = "Thing";
