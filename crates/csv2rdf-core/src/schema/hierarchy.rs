//! Ancestor chains and hierarchy ordering.

use super::ClassDef;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Lower-cased lookup key for a class display name.
pub(crate) fn class_key(name: &str) -> String {
    name.to_lowercase()
}

/// Walk the superclass chain of `key`, returning strict ancestor keys from the
/// direct parent up to the root.
///
/// The walk stops after `classes.len()` steps; reaching that bound means the
/// table holds a cycle, which the registry never admits.
pub(crate) fn walk_ancestors(classes: &IndexMap<String, ClassDef>, key: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = match classes.get(key) {
        Some(class) => class_key(&class.superclass),
        None => return chain,
    };

    while !current.is_empty() {
        if chain.len() >= classes.len() {
            tracing::error!(class = key, "superclass chain does not terminate");
            break;
        }
        let Some(class) = classes.get(&current) else {
            break;
        };
        let next = class_key(&class.superclass);
        chain.push(current);
        current = next;
    }
    chain
}

/// Precomputed ancestor chains and topological order.
#[derive(Debug, Default)]
pub(crate) struct HierarchyIndex {
    /// Strict ancestors of each class, closest first.
    ancestors: HashMap<String, Vec<String>>,
    /// Class keys with every ancestor before its descendants.
    order: Vec<String>,
}

impl HierarchyIndex {
    /// Build the index from the class table.
    pub(crate) fn build(classes: &IndexMap<String, ClassDef>) -> Self {
        let ancestors: HashMap<String, Vec<String>> = classes
            .keys()
            .map(|key| (key.clone(), walk_ancestors(classes, key)))
            .collect();

        // Each class goes just before the first placed class it is an
        // ancestor of, or at the end.
        let mut order: Vec<String> = Vec::with_capacity(classes.len());
        for key in classes.keys() {
            let target = order
                .iter()
                .position(|placed| {
                    ancestors
                        .get(placed)
                        .is_some_and(|chain| chain.iter().any(|a| a == key))
                })
                .unwrap_or(order.len());
            order.insert(target, key.clone());
        }

        Self { ancestors, order }
    }

    /// Strict ancestors of a class, closest first.
    pub(crate) fn ancestors(&self, key: &str) -> &[String] {
        self.ancestors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The class itself followed by its ancestors.
    pub(crate) fn lineage<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(key).chain(self.ancestors(key).iter().map(String::as_str))
    }

    /// Whether `ancestor` is a strict ancestor of `key`.
    pub(crate) fn is_ancestor(&self, key: &str, ancestor: &str) -> bool {
        self.ancestors(key).iter().any(|a| a == ancestor)
    }

    /// Class keys in hierarchy order.
    pub(crate) fn order(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(defs: &[(&str, &str)]) -> IndexMap<String, ClassDef> {
        defs.iter()
            .map(|(name, superclass)| (class_key(name), ClassDef::new(*name, *name, *superclass)))
            .collect()
    }

    #[test]
    fn test_walk_ancestors() {
        let classes = table(&[("C", "B"), ("B", "A"), ("A", "")]);
        assert_eq!(walk_ancestors(&classes, "c"), vec!["b", "a"]);
        assert_eq!(walk_ancestors(&classes, "a"), Vec::<String>::new());
        assert!(walk_ancestors(&classes, "missing").is_empty());
    }

    #[test]
    fn test_walk_stops_on_cycle() {
        // Not reachable through the registry, only through a hand-built table.
        let classes = table(&[("A", "B"), ("B", "A")]);
        let chain = walk_ancestors(&classes, "a");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_order_descendants_first_in_table() {
        let classes = table(&[("C", "B"), ("B", "A"), ("A", "")]);
        let index = HierarchyIndex::build(&classes);
        assert_eq!(index.order(), ["a", "b", "c"]);
    }

    #[test]
    fn test_order_keeps_unrelated_in_insertion_order() {
        let classes = table(&[("Dog", "Animal"), ("Rock", ""), ("Animal", "")]);
        let index = HierarchyIndex::build(&classes);
        assert_eq!(index.order(), ["animal", "dog", "rock"]);
    }

    #[test]
    fn test_lineage() {
        let classes = table(&[("A", ""), ("B", "A"), ("C", "B")]);
        let index = HierarchyIndex::build(&classes);
        let lineage: Vec<&str> = index.lineage("c").collect();
        assert_eq!(lineage, ["c", "b", "a"]);
        assert!(index.is_ancestor("c", "a"));
        assert!(!index.is_ancestor("a", "c"));
        assert!(!index.is_ancestor("a", "a"));
    }
}
