//! CSV to RDF/XML translation driven by a schema.

use crate::config::sanitize_name;
use crate::error::{Error, Result};
use crate::schema::{Item, SchemaRegistry, TOP_CLASS};
use crate::writer::{RdfWriter, DEFAULT_VOCABULARY};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Options for a translation run.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Namespace of the property elements.
    pub vocabulary: String,
    /// Write class and property descriptions before the instances.
    pub describe_schema: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.to_string(),
            describe_schema: true,
        }
    }
}

impl TranslateOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary namespace.
    pub fn with_vocabulary(mut self, vocabulary: impl Into<String>) -> Self {
        self.vocabulary = vocabulary.into();
        self
    }

    /// Only write instances.
    pub fn without_schema(mut self) -> Self {
        self.describe_schema = false;
        self
    }
}

/// Counts gathered during a translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateStats {
    /// Data rows read, skipped ones included.
    pub rows_read: usize,
    /// Rows skipped for having the wrong number of fields.
    pub rows_skipped: usize,
    /// Instances written.
    pub instances_written: usize,
    /// Property values written.
    pub values_written: usize,
}

/// A property value to emit for each instance of a class.
#[derive(Debug)]
struct ValueSlot {
    property: String,
    column: usize,
    /// Set when the column also feeds a class: the value names an instance.
    references_class: bool,
}

/// An instance-producing class and the values each instance carries.
#[derive(Debug)]
struct InstancePlan {
    class: String,
    column: usize,
    values: Vec<ValueSlot>,
}

fn plan_instances(registry: &SchemaRegistry) -> Vec<InstancePlan> {
    registry
        .ordered_classes()
        .filter_map(|class| {
            let column = class.column()?;
            // Names repeated across levels resolve to the closest declaration
            // each time, so they are emitted once per level.
            let values = registry
                .all_properties(class.display_name())
                .into_iter()
                .filter_map(|name| registry.get_property(class.display_name(), name))
                .filter_map(|prop| {
                    Some(ValueSlot {
                        property: prop.display_name().to_string(),
                        column: prop.column()?,
                        references_class: registry
                            .aliased_as_class(Item::Property(prop))
                            .is_some(),
                    })
                })
                .collect();
            Some(InstancePlan {
                class: class.display_name().to_string(),
                column,
                values,
            })
        })
        .collect()
}

fn describe_schema<W: Write>(registry: &SchemaRegistry, writer: &mut RdfWriter<W>) -> Result<()> {
    for class in registry.ordered_classes() {
        if class.display_name().eq_ignore_ascii_case(TOP_CLASS) {
            continue;
        }
        let superclass = registry
            .superclass_of(class.display_name())
            .unwrap_or_default();
        writer.write_class(class.display_name(), superclass)?;
    }
    for class in registry.ordered_classes() {
        for prop in class.properties() {
            writer.write_property(prop.display_name(), class.display_name())?;
        }
    }
    Ok(())
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

fn read_trimmed_header<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if header.iter().all(String::is_empty) {
        return Err(Error::EmptyInput("no header line".to_string()));
    }
    Ok(header)
}

fn open_with_header(path: &Path) -> Result<(csv::Reader<File>, Vec<String>)> {
    let mut reader = csv_reader(File::open(path)?);
    let header = read_trimmed_header(&mut reader).map_err(|e| match e {
        Error::EmptyInput(_) => Error::EmptyInput(path.display().to_string()),
        other => other,
    })?;
    Ok((reader, header))
}

/// Read only the header line of a CSV file.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    open_with_header(path).map(|(_, header)| header)
}

/// Translate CSV from `input` into RDF/XML on `output`.
///
/// Columns are bound from the header line. Rows whose field count differs
/// from the header are reported and skipped.
pub fn translate<R: Read, W: Write>(
    registry: &mut SchemaRegistry,
    input: R,
    output: W,
    options: &TranslateOptions,
) -> Result<TranslateStats> {
    let mut reader = csv_reader(input);
    let header = read_trimmed_header(&mut reader)?;
    translate_records(registry, &header, reader, output, options)
}

/// Translate a CSV file into an RDF/XML file.
///
/// The output file is only created once the input has a header line.
pub fn translate_file(
    registry: &mut SchemaRegistry,
    input: &Path,
    output: &Path,
    options: &TranslateOptions,
) -> Result<TranslateStats> {
    info!(input = %input.display(), "reading CSV");
    let (reader, header) = open_with_header(input)?;

    info!(output = %output.display(), "writing RDF");
    let out = BufWriter::new(File::create(output)?);
    translate_records(registry, &header, reader, out, options)
}

fn translate_records<R: Read, W: Write>(
    registry: &mut SchemaRegistry,
    header: &[String],
    mut reader: csv::Reader<R>,
    output: W,
    options: &TranslateOptions,
) -> Result<TranslateStats> {
    let bound = registry.bind_header(header);
    debug!(columns = header.len(), bound, "header bound");

    let registry = &*registry;
    let plans = plan_instances(registry);
    if plans.is_empty() {
        warn!("no class is bound to a column; no instances will be written");
    }

    let mut writer = RdfWriter::with_vocabulary(output, options.vocabulary.as_str());
    writer.start()?;
    if options.describe_schema {
        describe_schema(registry, &mut writer)?;
    }

    let mut stats = TranslateStats::default();
    for result in reader.records() {
        stats.rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable row");
                stats.rows_skipped += 1;
                continue;
            }
        };

        if record.len() != header.len() {
            let row: Vec<&str> = record.iter().collect();
            warn!(
                line = record.position().map_or(0, |p| p.line()),
                expected = header.len(),
                found = record.len(),
                ?row,
                "badly formed row, skipping"
            );
            stats.rows_skipped += 1;
            continue;
        }

        for plan in &plans {
            let id = record.get(plan.column).map(sanitize_name).unwrap_or_default();
            if id.is_empty() {
                continue;
            }
            writer.start_instance(&id, &plan.class)?;
            for slot in &plan.values {
                let value = record.get(slot.column).map_or("", str::trim);
                if value.is_empty() {
                    continue;
                }
                if slot.references_class {
                    writer.write_reference(&slot.property, &sanitize_name(value))?;
                } else {
                    writer.write_literal(&slot.property, value)?;
                }
                stats.values_written += 1;
            }
            writer.end_instance()?;
            stats.instances_written += 1;
        }
    }

    writer.finish()?;
    info!(
        rows = stats.rows_read,
        skipped = stats.rows_skipped,
        instances = stats.instances_written,
        "translation complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    const CONFIG: &str = "\
Name,class(Person),Agent
Age,prop(age),Person
Country,class,Place
Country,prop(country),Person
Population,prop(population),Country
Code,prop(code),Place
";

    const DATA: &str = "\
Name,Age,Country,Population,Code
Ada Lovelace,36,England,56000000,ENG
Alan Turing,41,England,,ENG
broken,row
,50,,,
";

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        load_config(CONFIG.as_bytes(), &mut registry).unwrap();
        registry
    }

    fn run(registry: &mut SchemaRegistry, options: &TranslateOptions) -> (String, TranslateStats) {
        let mut out = Vec::new();
        let stats = translate(registry, DATA.as_bytes(), &mut out, options).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_translate_stats() {
        let mut registry = registry();
        let (_, stats) = run(&mut registry, &TranslateOptions::default());

        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.rows_skipped, 1);
        // Two people and two (same) countries; the last row has no ids.
        assert_eq!(stats.instances_written, 4);
    }

    #[test]
    fn test_schema_descriptions_in_hierarchy_order() {
        let mut registry = registry();
        let (text, _) = run(&mut registry, &TranslateOptions::default());

        let agent = text.find("rdf:ID=\"Agent\"").unwrap();
        let person = text.find("rdf:ID=\"Person\"").unwrap();
        let place = text.find("rdf:ID=\"Place\"").unwrap();
        let country = text.find("<rdf:Description rdf:ID=\"Country\"").unwrap();
        assert!(agent < person);
        assert!(place < country);
        assert!(text.contains("<rdf:Property rdf:ID=\"population\">"));
    }

    #[test]
    fn test_instances_with_inherited_and_reference_values() {
        let mut registry = registry();
        let (text, _) = run(&mut registry, &TranslateOptions::default().without_schema());

        assert!(text.contains("<rdf:Description rdf:ID=\"Ada_Lovelace\">"));
        assert!(text.contains("<sample:age>36</sample:age>"));
        assert!(text.contains("<sample:country rdf:resource=\"#England\"/>"));
        assert!(text.contains("<sample:population>56000000</sample:population>"));
        // Inherited from Place.
        assert!(text.contains("<sample:code>ENG</sample:code>"));
        assert!(!text.contains("<rdf:Property"));
    }

    #[test]
    fn test_empty_values_not_written() {
        let mut registry = registry();
        let (text, stats) = run(&mut registry, &TranslateOptions::default());

        assert_eq!(text.matches("<sample:population>").count(), 1);
        assert_eq!(stats.values_written, 7);
    }

    #[test]
    fn test_unbound_class_writes_no_instances() {
        let mut registry = SchemaRegistry::new();
        registry.define_class("Missing", "Ghost", "");
        let mut out = Vec::new();
        let stats = translate(&mut registry, DATA.as_bytes(), &mut out, &TranslateOptions::new())
            .unwrap();
        assert_eq!(stats.instances_written, 0);
        assert_eq!(stats.rows_read, 4);
    }

    #[test]
    fn test_empty_input() {
        let mut registry = registry();
        let mut out = Vec::new();
        let err = translate(&mut registry, "".as_bytes(), &mut out, &TranslateOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_reused_registry_rebinds_columns() {
        let mut registry = SchemaRegistry::new();
        registry.define_class("Name", "Person", "");
        registry.define_property("Age", "age", "Person");
        registry.define_property("Notes", "notes", "Person");
        let options = TranslateOptions::new().without_schema();

        let mut out = Vec::new();
        translate(&mut registry, "Name,Age,Notes\nAda,36,hello\n".as_bytes(), &mut out, &options)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<sample:age>36</sample:age>"));

        let mut out = Vec::new();
        translate(&mut registry, "Name,Notes,Other\nAlan,hi,x\n".as_bytes(), &mut out, &options)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<sample:notes>hi</sample:notes>"));
        assert!(!text.contains("<sample:age>"));

        let mut out = Vec::new();
        let stats =
            translate(&mut registry, "Name\nGrace\n".as_bytes(), &mut out, &options).unwrap();
        assert_eq!(stats.instances_written, 1);
        assert_eq!(stats.values_written, 0);
    }

    #[test]
    fn test_duplicate_inherited_names_emitted_per_level() {
        let mut registry = SchemaRegistry::new();
        registry.define_class("Name", "Person", "Agent");
        registry.define_property("Label", "label", "Agent");
        registry.define_property("Label", "label", "Person");

        let mut out = Vec::new();
        translate(
            &mut registry,
            "Name,Label\nAda,first\n".as_bytes(),
            &mut out,
            &TranslateOptions::new().without_schema(),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("<sample:label>first</sample:label>").count(), 2);
    }
}
