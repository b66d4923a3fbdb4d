//! Column binding: source column names to schema items and positions.

use super::{ClassDef, Item, PropertyDef, SchemaRegistry};
use std::collections::HashMap;

/// Location of a property inside the class table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PropertyKey {
    /// Lower-cased owner class key.
    pub(crate) class: String,
    /// Property display name.
    pub(crate) name: String,
}

/// Source-name indexes. A column feeds at most one class and one property.
#[derive(Debug, Default)]
pub(crate) struct ColumnIndex {
    classes: HashMap<String, String>,
    properties: HashMap<String, PropertyKey>,
}

impl ColumnIndex {
    pub(crate) fn register_class(&mut self, source_name: &str, class: &str) {
        if let Some(previous) = self
            .classes
            .insert(source_name.to_string(), class.to_string())
            .filter(|previous| previous != class)
        {
            tracing::warn!(
                column = source_name,
                previous = %previous,
                class,
                "column already fed a class, rebinding"
            );
        }
    }

    pub(crate) fn unregister_class(&mut self, source_name: &str, class: &str) {
        if self.classes.get(source_name).is_some_and(|c| c == class) {
            self.classes.remove(source_name);
        }
    }

    pub(crate) fn register_property(&mut self, source_name: &str, key: PropertyKey) {
        if let Some(previous) = self
            .properties
            .insert(source_name.to_string(), key.clone())
            .filter(|previous| *previous != key)
        {
            tracing::warn!(
                column = source_name,
                previous = %previous.name,
                property = %key.name,
                "column already fed a property, rebinding"
            );
        }
    }

    pub(crate) fn unregister_property(&mut self, source_name: &str, key: &PropertyKey) {
        if self.properties.get(source_name) == Some(key) {
            self.properties.remove(source_name);
        }
    }

    pub(crate) fn class(&self, source_name: &str) -> Option<&str> {
        self.classes.get(source_name).map(String::as_str)
    }

    pub(crate) fn property(&self, source_name: &str) -> Option<&PropertyKey> {
        self.properties.get(source_name)
    }

    /// All indexed source names.
    pub(crate) fn source_names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self
            .classes
            .keys()
            .chain(self.properties.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names.into_iter()
    }
}

impl SchemaRegistry {
    /// Record the column position of every item fed by `source_name`.
    ///
    /// Returns the number of items bound; unknown columns bind nothing.
    pub fn bind_column(&mut self, source_name: &str, column: usize) -> usize {
        let mut bound = 0;

        if let Some(key) = self.columns.class(source_name).map(str::to_string) {
            if let Some(class) = self.classes.get_mut(&key) {
                class.column = Some(column);
                bound += 1;
            }
        }

        if let Some(key) = self.columns.property(source_name).cloned() {
            if let Some(prop) = self
                .classes
                .get_mut(&key.class)
                .and_then(|c| c.properties.get_mut(&key.name))
            {
                prop.column = Some(column);
                bound += 1;
            }
        }

        if bound == 0 {
            tracing::debug!(column = source_name, "column not referenced by the schema");
        }
        bound
    }

    /// Forget every column position bound so far.
    pub fn clear_columns(&mut self) {
        for class in self.classes.values_mut() {
            class.column = None;
            for prop in class.properties.values_mut() {
                prop.column = None;
            }
        }
    }

    /// Bind every column of a header line by position.
    ///
    /// Positions from an earlier header are cleared first, so items missing
    /// from this header end up unbound.
    pub fn bind_header<S: AsRef<str>>(&mut self, header: &[S]) -> usize {
        self.clear_columns();
        header
            .iter()
            .enumerate()
            .map(|(i, name)| self.bind_column(name.as_ref().trim(), i))
            .sum()
    }

    /// Column position of an item, if bound.
    pub fn column_of(&self, item: Item<'_>) -> Option<usize> {
        item.column()
    }

    /// The class fed by the same column as `item`, if any.
    ///
    /// Matching is by source name only; display names play no part.
    pub fn aliased_as_class(&self, item: Item<'_>) -> Option<&str> {
        let source_name = item.source_name();
        if source_name.is_empty() {
            return None;
        }
        self.class_for_column(source_name)
            .map(ClassDef::display_name)
    }

    /// The class fed by a column.
    pub fn class_for_column(&self, source_name: &str) -> Option<&ClassDef> {
        self.columns
            .class(source_name)
            .and_then(|key| self.classes.get(key))
    }

    /// The property fed by a column.
    pub fn property_for_column(&self, source_name: &str) -> Option<&PropertyDef> {
        self.columns.property(source_name).and_then(|key| {
            self.classes
                .get(&key.class)
                .and_then(|c| c.properties.get(&key.name))
        })
    }

    /// Every item fed by a column: none, a class, a property, or both.
    pub fn items_for_column(&self, source_name: &str) -> Vec<Item<'_>> {
        let mut items = Vec::with_capacity(2);
        if let Some(class) = self.class_for_column(source_name) {
            items.push(Item::Class(class));
        }
        if let Some(prop) = self.property_for_column(source_name) {
            items.push(Item::Property(prop));
        }
        items
    }

    /// Every source column name the schema references, sorted.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.source_names().collect()
    }
}
