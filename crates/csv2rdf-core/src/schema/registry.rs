//! The schema registry: classes, their properties, and column indexes.

use super::binder::{ColumnIndex, PropertyKey};
use super::hierarchy::{class_key, walk_ancestors, HierarchyIndex};
use super::{ClassDef, PropertyDef};
use indexmap::IndexMap;
use std::cell::OnceCell;
use tracing::{debug, warn};

/// Registry of classes and properties built from config records and/or
/// interactive answers, in any order.
///
/// Class lookup is case-insensitive. Classes referenced before they are
/// defined are created as placeholders and refined in place later.
///
/// The hierarchy (ancestor chains and output order) is computed on first
/// read and discarded by every structural write, so queries may interleave
/// with definitions.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Classes keyed by lower-cased display name, in insertion order.
    pub(crate) classes: IndexMap<String, ClassDef>,
    /// Source column name indexes.
    pub(crate) columns: ColumnIndex,
    /// Lazily built hierarchy, reset on structural change.
    hierarchy: OnceCell<HierarchyIndex>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Definitions ====================

    /// Define a class, or refine an existing one with the same identity.
    ///
    /// An existing class takes a non-empty `superclass` or `source_name` that
    /// differs from its current one. Its display capitalization is replaced
    /// only by an explicit definition, i.e. one with a non-empty source name.
    /// A missing superclass is created as a placeholder.
    ///
    /// Returns `None` when `display_name` is empty; the definition is dropped.
    pub fn define_class(
        &mut self,
        source_name: &str,
        display_name: &str,
        superclass: &str,
    ) -> Option<&ClassDef> {
        if display_name.is_empty() {
            warn!(source_name, "ignoring class with an empty display name");
            return None;
        }
        debug!(source_name, display_name, superclass, "defining class");

        let key = class_key(display_name);
        let superclass = if !superclass.is_empty() && self.would_cycle(&key, superclass) {
            warn!(
                class = display_name,
                superclass, "ignoring superclass that would create an inheritance cycle"
            );
            ""
        } else {
            superclass
        };

        let mut stale_source = None;
        match self.classes.get_mut(&key) {
            None => {
                self.classes
                    .insert(key.clone(), ClassDef::new(source_name, display_name, superclass));
                self.invalidate();
            }
            Some(class) => {
                let mut restructured = false;
                if !superclass.is_empty() && class_key(&class.superclass) != class_key(superclass)
                {
                    debug!(
                        class = %class.display_name,
                        from = %class.superclass,
                        to = superclass,
                        "changing superclass"
                    );
                    restructured = true;
                }
                if !superclass.is_empty() {
                    class.superclass = superclass.to_string();
                }
                if !source_name.is_empty() {
                    if class.source_name != source_name {
                        stale_source =
                            Some(std::mem::replace(&mut class.source_name, source_name.to_string()));
                    }
                    if class.display_name != display_name {
                        class.display_name = display_name.to_string();
                    }
                }
                if restructured {
                    self.invalidate();
                }
            }
        }

        if let Some(stale) = stale_source.filter(|s| !s.is_empty()) {
            self.columns.unregister_class(&stale, &key);
        }
        if !source_name.is_empty() {
            self.columns.register_class(source_name, &key);
        }

        if !superclass.is_empty() && !self.class_exists(superclass) {
            self.define_class("", superclass, "");
        }

        self.classes.get(&key)
    }

    /// Define a property on `owner`, creating the owner as a placeholder if
    /// needed. A property with the same display name on that class is
    /// replaced.
    ///
    /// Returns `None` when the property or owner name is empty.
    pub fn define_property(
        &mut self,
        source_name: &str,
        display_name: &str,
        owner: &str,
    ) -> Option<&PropertyDef> {
        if display_name.is_empty() || owner.is_empty() {
            warn!(
                source_name,
                display_name, owner, "ignoring property without a name or owning class"
            );
            return None;
        }
        debug!(source_name, display_name, owner, "defining property");

        let owner_key = class_key(owner);
        if !self.classes.contains_key(&owner_key) {
            self.define_class("", owner, "");
        }
        let class = self.classes.get_mut(&owner_key)?;

        let mut property = PropertyDef::new(source_name, display_name, owner);
        let key = PropertyKey {
            class: owner_key.clone(),
            name: display_name.to_string(),
        };

        let replaced = class.properties.get(display_name).cloned();
        if let Some(old) = &replaced {
            debug!(owner, property = display_name, "replacing property");
            if old.source_name == source_name {
                property.column = old.column;
            }
        }
        class.properties.insert(display_name.to_string(), property);

        if let Some(old) = replaced.filter(|old| old.source_name != source_name) {
            self.columns.unregister_property(&old.source_name, &key);
        }
        if !source_name.is_empty() {
            self.columns.register_property(source_name, key);
        }

        self.classes
            .get(&owner_key)
            .and_then(|c| c.properties.get(display_name))
    }

    /// Whether giving `key` the superclass `superclass` would close a loop.
    fn would_cycle(&self, key: &str, superclass: &str) -> bool {
        let super_key = class_key(superclass);
        super_key == key || walk_ancestors(&self.classes, &super_key).iter().any(|a| a == key)
    }

    fn invalidate(&mut self) {
        self.hierarchy.take();
    }

    fn hierarchy(&self) -> &HierarchyIndex {
        self.hierarchy
            .get_or_init(|| HierarchyIndex::build(&self.classes))
    }

    // ==================== Class Lookups ====================

    /// Case-insensitive existence check.
    pub fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(&class_key(name))
    }

    /// Get a class by display name (case-insensitive).
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(&class_key(name))
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.values()
    }

    /// Number of classes, placeholders included.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Total number of properties across all classes.
    pub fn property_count(&self) -> usize {
        self.classes.values().map(ClassDef::property_count).sum()
    }

    /// Display name of a class's superclass.
    ///
    /// `Some("")` for a root class, `None` when the class does not exist.
    pub fn superclass_of(&self, name: &str) -> Option<&str> {
        let class = self.get_class(name)?;
        if class.superclass.is_empty() {
            return Some("");
        }
        Some(
            self.get_class(&class.superclass)
                .map(ClassDef::display_name)
                .unwrap_or(&class.superclass),
        )
    }

    // ==================== Hierarchy Queries ====================

    /// Whether `candidate` is a strict ancestor of `name`.
    pub fn is_ancestor_of(&self, name: &str, candidate: &str) -> bool {
        self.hierarchy()
            .is_ancestor(&class_key(name), &class_key(candidate))
    }

    /// Display names of the strict ancestors of a class, closest first.
    pub fn ancestors(&self, name: &str) -> Vec<&str> {
        self.hierarchy()
            .ancestors(&class_key(name))
            .iter()
            .filter_map(|key| self.classes.get(key))
            .map(ClassDef::display_name)
            .collect()
    }

    /// Display names of all classes with every ancestor before its
    /// descendants. Unrelated classes keep insertion order.
    pub fn ordered_class_names(&self) -> Vec<&str> {
        self.ordered_classes().map(ClassDef::display_name).collect()
    }

    /// All classes in hierarchy order.
    pub fn ordered_classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.hierarchy()
            .order()
            .iter()
            .filter_map(|key| self.classes.get(key))
    }

    // ==================== Property Queries ====================

    /// Names of the properties declared directly on a class.
    pub fn direct_properties(&self, name: &str) -> Option<Vec<&str>> {
        self.get_class(name).map(|c| c.property_names().collect())
    }

    /// Names of every property a class has, its own first, then its parent's,
    /// and so on up to the root.
    ///
    /// A name declared at several levels appears once per level.
    pub fn all_properties(&self, name: &str) -> Vec<&str> {
        let key = class_key(name);
        self.hierarchy()
            .lineage(&key)
            .filter_map(|k| self.classes.get(k))
            .flat_map(ClassDef::property_names)
            .collect()
    }

    /// Find a property on a class or its closest ancestor declaring it.
    pub fn get_property(&self, class: &str, property: &str) -> Option<&PropertyDef> {
        let key = class_key(class);
        let found = self
            .hierarchy()
            .lineage(&key)
            .filter_map(|k| self.classes.get(k))
            .find_map(|c| c.property(property));
        found
    }
}
