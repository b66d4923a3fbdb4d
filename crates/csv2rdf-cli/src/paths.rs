//! Derived file paths.

use std::path::{Path, PathBuf};

/// Input file used when none is given.
pub const DEFAULT_INPUT: &str = "input.csv";

/// Appended to the input's base name to find its config file.
pub const CONFIG_SUFFIX: &str = "-config.csv";

/// Extension of the RDF/XML output file.
pub const OUTPUT_EXTENSION: &str = "rdf";

fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

/// `people.csv` -> `people-config.csv`, next to the input.
pub fn config_path_for(input: &Path) -> PathBuf {
    input.with_file_name(format!("{}{}", base_name(input), CONFIG_SUFFIX))
}

/// `people.csv` -> `people.rdf`, next to the input.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_file_name(format!("{}.{}", base_name(input), OUTPUT_EXTENSION))
}
