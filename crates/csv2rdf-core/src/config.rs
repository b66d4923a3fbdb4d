//! Schema config files.
//!
//! Each record describes one column of the input file:
//!
//! ```text
//! source column,item type[(display name)],owning or super class
//! ```
//!
//! The item type is `class` (third field is the superclass) or anything
//! starting with `prop` (third field is the owning class). Other types are
//! ignored. Without a display name override the sanitized column name is used.

use crate::error::Result;
use crate::schema::{ItemKind, SchemaRegistry};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Counts gathered while loading a config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Class records applied.
    pub classes: usize,
    /// Property records applied.
    pub properties: usize,
    /// Records with an unknown item type or an unusable name.
    pub ignored: usize,
    /// Records without exactly three fields.
    pub malformed: usize,
}

/// Turn a raw column or answer into a name usable in output: trims, strips
/// surrounding double quotes, and replaces spaces with underscores.
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim().replace(' ', "_")
}

/// Split an item type field such as `prop(Name)` into its tag and optional
/// display name override.
pub fn parse_item_tag(field: &str) -> (String, Option<String>) {
    let field = field.trim();
    match field.split_once('(') {
        Some((tag, rest)) => {
            let display = rest.rsplit_once(')').map_or(rest, |(inner, _)| inner).trim();
            let display = (!display.is_empty()).then(|| display.to_string());
            (tag.trim().to_lowercase(), display)
        }
        None => (field.to_lowercase(), None),
    }
}

/// Which kind of item a tag stands for.
pub(crate) fn item_kind_for_tag(tag: &str) -> Option<ItemKind> {
    if tag == "class" {
        Some(ItemKind::Class)
    } else if tag.starts_with("prop") {
        Some(ItemKind::Property)
    } else {
        None
    }
}

/// Load config records into `registry`.
///
/// Malformed records and unknown item types are reported and skipped.
pub fn load_config<R: Read>(reader: R, registry: &mut SchemaRegistry) -> Result<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut report = LoadReport::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable config record");
                report.malformed += 1;
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 3 {
            warn!(line, fields = record.len(), "skipping config record without three fields");
            report.malformed += 1;
            continue;
        }

        let source_name = &record[0];
        let (tag, display) = parse_item_tag(&record[1]);
        let display_name = display.map_or_else(|| sanitize_name(source_name), |d| sanitize_name(&d));
        let class_name = sanitize_name(&record[2]);

        let applied = match item_kind_for_tag(&tag) {
            Some(ItemKind::Class) => {
                let applied = registry
                    .define_class(source_name, &display_name, &class_name)
                    .is_some();
                report.classes += usize::from(applied);
                applied
            }
            Some(ItemKind::Property) => {
                let applied = registry
                    .define_property(source_name, &display_name, &class_name)
                    .is_some();
                report.properties += usize::from(applied);
                applied
            }
            None => {
                warn!(line, tag = %tag, column = source_name, "ignoring config record");
                false
            }
        };
        if !applied {
            report.ignored += 1;
        }
    }

    info!(
        classes = report.classes,
        properties = report.properties,
        ignored = report.ignored,
        malformed = report.malformed,
        "config loaded"
    );
    Ok(report)
}

/// Load a config file into `registry`.
pub fn load_config_file(path: &Path, registry: &mut SchemaRegistry) -> Result<LoadReport> {
    info!(path = %path.display(), "reading config");
    let file = File::open(path)?;
    load_config(file, registry)
}

impl SchemaRegistry {
    /// Write every class (hierarchy order) followed by every property as
    /// config records.
    pub fn write_config<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

        for class in self.ordered_classes() {
            let superclass = self.superclass_of(class.display_name()).unwrap_or_default();
            writer.write_record([
                class.source_name(),
                item_type_field(ItemKind::Class, class.source_name(), class.display_name()).as_str(),
                superclass,
            ])?;
        }
        for class in self.ordered_classes() {
            for prop in class.properties() {
                writer.write_record([
                    prop.source_name(),
                    item_type_field(ItemKind::Property, prop.source_name(), prop.display_name())
                        .as_str(),
                    class.display_name(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// The config records as text.
    pub fn to_config_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_config(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the config records to a file.
    pub fn write_config_file(&self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "writing config");
        let file = File::create(path)?;
        self.write_config(file)
    }
}

fn item_type_field(kind: ItemKind, source_name: &str, display_name: &str) -> String {
    if display_name == source_name {
        kind.to_string()
    } else {
        format!("{}({})", kind, display_name)
    }
}
