//! Class and property records.

use indexmap::IndexMap;
use std::fmt;

/// Kind tag of a schema item, as written in the config format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An instance-producing class.
    Class,
    /// A literal attribute of a class.
    Property,
}

impl ItemKind {
    /// The tag used for this kind in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Class => "class",
            ItemKind::Property => "property",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class definition.
///
/// A class with an empty source name is a placeholder: it exists only because
/// another definition referenced it as a superclass or owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub(crate) source_name: String,
    pub(crate) display_name: String,
    pub(crate) superclass: String,
    pub(crate) properties: IndexMap<String, PropertyDef>,
    pub(crate) column: Option<usize>,
}

impl ClassDef {
    pub(crate) fn new(
        source_name: impl Into<String>,
        display_name: impl Into<String>,
        superclass: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            display_name: display_name.into(),
            superclass: superclass.into(),
            properties: IndexMap::new(),
            column: None,
        }
    }

    /// Column header this class is read from (empty for placeholders).
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Name used in output.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Superclass reference as it was last defined. Empty means root.
    ///
    /// The stored reference may differ in case from the superclass record;
    /// use [`SchemaRegistry::superclass_of`](super::SchemaRegistry::superclass_of)
    /// for the canonical display name.
    pub fn superclass(&self) -> &str {
        &self.superclass
    }

    /// Bound column position.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// Whether this record only exists to satisfy a reference.
    pub fn is_placeholder(&self) -> bool {
        self.source_name.is_empty()
    }

    /// Names of directly declared properties, in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Directly declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.values()
    }

    /// Get a directly declared property.
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Number of directly declared properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// A property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub(crate) source_name: String,
    pub(crate) display_name: String,
    pub(crate) owner: String,
    pub(crate) column: Option<usize>,
}

impl PropertyDef {
    pub(crate) fn new(
        source_name: impl Into<String>,
        display_name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            display_name: display_name.into(),
            owner: owner.into(),
            column: None,
        }
    }

    /// Column header this property is read from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Name used in output.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Owning class reference as given at definition time.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Bound column position.
    pub fn column(&self) -> Option<usize> {
        self.column
    }
}

/// A borrowed view of either kind of schema item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item<'a> {
    Class(&'a ClassDef),
    Property(&'a PropertyDef),
}

impl<'a> Item<'a> {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Class(_) => ItemKind::Class,
            Item::Property(_) => ItemKind::Property,
        }
    }

    pub fn source_name(&self) -> &'a str {
        match self {
            Item::Class(c) => c.source_name(),
            Item::Property(p) => p.source_name(),
        }
    }

    pub fn display_name(&self) -> &'a str {
        match self {
            Item::Class(c) => c.display_name(),
            Item::Property(p) => p.display_name(),
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            Item::Class(c) => c.column(),
            Item::Property(p) => p.column(),
        }
    }

    /// Superclass for a class, owning class for a property.
    pub fn related_class(&self) -> &'a str {
        match self {
            Item::Class(c) => c.superclass(),
            Item::Property(p) => p.owner(),
        }
    }
}
