use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DATA: &str = "Name,Age,Country\nAda Lovelace,36,England\nAlan Turing,41,England\n";
const CONFIG: &str = "Name,class(Person),Agent\nAge,prop(age),Person\nCountry,prop(country),Person\n";

fn run_csv2rdf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csv2rdf"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("csv2rdf should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn write_fixture(dir: &Path) -> String {
    fs::write(dir.join("people.csv"), DATA).unwrap();
    fs::write(dir.join("people-config.csv"), CONFIG).unwrap();
    dir.join("people.csv").to_string_lossy().into_owned()
}

#[test]
fn translates_with_derived_paths() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());

    let output = run_csv2rdf(&[&input]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Reading CSV from"));
    assert!(stdout.contains("2 row(s) read, 0 skipped: 2 instance(s)"));

    let rdf = fs::read_to_string(dir.path().join("people.rdf")).unwrap();
    assert!(rdf.contains("<rdf:Description rdf:ID=\"Ada_Lovelace\">"));
    assert!(rdf.contains("<sample:age>41</sample:age>"));
}

#[test]
fn inspect_prints_schema_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());

    let output = run_csv2rdf(&[&input, "--inspect", "--format", "json"]);
    assert_success(&output);

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema[1]["class"], "Person");
    assert_eq!(schema[1]["superclass"], "Agent");
    assert!(!dir.path().join("people.rdf").exists());
}

#[test]
fn custom_vocabulary_and_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    let out = dir.path().join("custom.rdf");

    let output = run_csv2rdf(&[
        &input,
        "-o",
        &out.to_string_lossy(),
        "--vocabulary",
        "http://example.org/people#",
        "--instances-only",
    ]);
    assert_success(&output);

    let rdf = fs::read_to_string(out).unwrap();
    assert!(rdf.contains("xmlns:sample=\"http://example.org/people#\""));
    assert!(!rdf.contains("<rdf:Property"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv");

    let output = run_csv2rdf(&[&missing.to_string_lossy()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open file"));
}

#[test]
fn inspect_csv_prints_config_records() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());

    let output = run_csv2rdf(&[&input, "--inspect", "--format", "csv"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], ",class(Agent),");
    assert_eq!(lines[1], "Name,class(Person),Agent");
    assert!(lines.contains(&"Age,property(age),Person"));
}
