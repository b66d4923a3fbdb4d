//! Output formatters for schema inspection and run summaries.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use csv2rdf_core::{ClassDef, Result, SchemaRegistry, TranslateStats};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format (the config file format for schemas)
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format the classes and properties of a schema.
    fn format_schema(&self, registry: &SchemaRegistry) -> Result<String>;

    /// Format the counts of a finished translation.
    fn format_summary(&self, stats: &TranslateStats) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Properties a class inherits, in ancestor order.
fn inherited_properties<'a>(registry: &'a SchemaRegistry, class: &ClassDef) -> Vec<&'a str> {
    registry
        .all_properties(class.display_name())
        .into_iter()
        .skip(class.property_count())
        .collect()
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_schema(&self, registry: &SchemaRegistry) -> Result<String> {
        let mut table = Table::new();
        table.set_header(vec!["Class", "Superclass", "Column", "Properties", "Inherited"]);

        for class in registry.ordered_classes() {
            let column = if class.is_placeholder() {
                "-".to_string()
            } else {
                class.source_name().to_string()
            };
            let own: Vec<&str> = class.property_names().collect();
            table.add_row(vec![
                Cell::new(class.display_name()),
                Cell::new(registry.superclass_of(class.display_name()).unwrap_or_default()),
                Cell::new(column),
                Cell::new(own.join(", ")),
                Cell::new(inherited_properties(registry, class).join(", ")),
            ]);
        }

        Ok(format!(
            "{}\n{} class(es), {} propert(ies)",
            table,
            registry.class_count(),
            registry.property_count()
        ))
    }

    fn format_summary(&self, stats: &TranslateStats) -> String {
        format!(
            "{} row(s) read, {} skipped: {} instance(s), {} value(s) written",
            stats.rows_read, stats.rows_skipped, stats.instances_written, stats.values_written
        )
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_schema(&self, registry: &SchemaRegistry) -> Result<String> {
        let classes: Vec<serde_json::Value> = registry
            .ordered_classes()
            .map(|class| {
                let properties: Vec<serde_json::Value> = class
                    .properties()
                    .map(|prop| {
                        serde_json::json!({
                            "name": prop.display_name(),
                            "column": prop.source_name(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "class": class.display_name(),
                    "superclass": registry.superclass_of(class.display_name()).unwrap_or_default(),
                    "column": class.source_name(),
                    "placeholder": class.is_placeholder(),
                    "properties": properties,
                    "inherited": inherited_properties(registry, class),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&classes).unwrap_or_else(|_| "[]".to_string()))
    }

    fn format_summary(&self, stats: &TranslateStats) -> String {
        serde_json::json!({
            "rows_read": stats.rows_read,
            "rows_skipped": stats.rows_skipped,
            "instances_written": stats.instances_written,
            "values_written": stats.values_written,
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_schema(&self, registry: &SchemaRegistry) -> Result<String> {
        registry.to_config_string()
    }

    fn format_summary(&self, stats: &TranslateStats) -> String {
        format!(
            "rows_read,rows_skipped,instances_written,values_written\n{},{},{},{}",
            stats.rows_read, stats.rows_skipped, stats.instances_written, stats.values_written
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.define_class("Name", "Person", "Agent");
        registry.define_property("Age", "age", "Person");
        registry.define_property("Email", "email", "Agent");
        registry
    }

    #[test]
    fn test_inherited_properties() {
        let registry = sample_schema();
        let person = registry.get_class("Person").unwrap();
        assert_eq!(inherited_properties(&registry, person), ["email"]);
    }

    #[test]
    fn test_table_schema() {
        let output = TableFormatter.format_schema(&sample_schema()).unwrap();
        assert!(output.contains("Person"));
        assert!(output.contains("Agent"));
        assert!(output.contains("2 class(es), 2 propert(ies)"));
    }

    #[test]
    fn test_json_schema() {
        let output = JsonFormatter.format_schema(&sample_schema()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let classes = value.as_array().unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0]["class"], "Agent");
        assert_eq!(classes[0]["placeholder"], true);
        assert_eq!(classes[1]["superclass"], "Agent");
        assert_eq!(classes[1]["properties"][0]["column"], "Age");
        assert_eq!(classes[1]["inherited"][0], "email");
    }

    #[test]
    fn test_csv_schema_is_config() {
        let output = CsvFormatter.format_schema(&sample_schema()).unwrap();
        assert!(output.contains("Name,class(Person),Agent"));
        assert!(output.contains("Email,property(email),Agent"));
    }

    #[test]
    fn test_summaries() {
        let stats = TranslateStats {
            rows_read: 3,
            rows_skipped: 1,
            instances_written: 2,
            values_written: 5,
        };
        assert!(TableFormatter.format_summary(&stats).starts_with("3 row(s) read, 1 skipped"));
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_summary(&stats)).unwrap();
        assert_eq!(json["instances_written"], 2);
        assert!(CsvFormatter.format_summary(&stats).ends_with("3,1,2,5"));
    }
}
