//! csv2rdf core - schema registry, config format, and RDF/XML translation.
//!
//! A [`SchemaRegistry`] is built from a config file ([`load_config_file`]) or
//! from answers about the header line ([`derive_schema`]), then drives
//! [`translate_file`].

pub mod config;
pub mod error;
pub mod prompt;
pub mod schema;
pub mod translate;
pub mod writer;

pub use config::{load_config, load_config_file, parse_item_tag, sanitize_name, LoadReport};
pub use error::{Error, Result};
pub use prompt::{derive_schema, Prompter, ScriptedPrompter, ALL_CLASS};
pub use schema::{ClassDef, Item, ItemKind, PropertyDef, SchemaRegistry, TOP_CLASS};
pub use translate::{read_header, translate, translate_file, TranslateOptions, TranslateStats};
pub use writer::{RdfWriter, DEFAULT_VOCABULARY};
