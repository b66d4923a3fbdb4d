//! Deriving a schema by asking questions about the header line.

use crate::config::sanitize_name;
use crate::error::{Error, Result};
use crate::schema::{SchemaRegistry, TOP_CLASS};
use std::collections::VecDeque;
use tracing::info;

/// Superclass offered as an alternative to the top class.
pub const ALL_CLASS: &str = "all";

/// Source of answers for interactive schema derivation.
pub trait Prompter {
    /// Ask a question and return the raw answer line.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Show a line of information.
    fn say(&mut self, message: &str);
}

/// A prompter answering from a fixed list, recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that gives `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Questions and messages shown so far.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.transcript.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no answer for '{}'", question)))
    }

    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}

/// Build a schema from a header line by asking which column names the
/// instances, what their class is called, and which superclass to use.
///
/// The chosen column becomes the class; every other column becomes a
/// property of it.
pub fn derive_schema<S: AsRef<str>>(
    header: &[S],
    prompter: &mut dyn Prompter,
) -> Result<SchemaRegistry> {
    if header.is_empty() {
        return Err(Error::EmptyInput("header has no columns".to_string()));
    }

    let id_column = ask_id_column(header, prompter)?;
    let id_name = header[id_column].as_ref().trim();
    prompter.say(&format!("(Chose \"{}\")", id_name));

    let answer = prompter.ask("Please enter a string to use for the name of the class:")?;
    let mut class_name = sanitize_name(&answer);
    if class_name.is_empty() {
        class_name = sanitize_name(id_name);
    }
    prompter.say(&format!("(Chose \"{}\")", class_name));

    let answer = prompter.ask("Do you want an \"all\" class (y or n)?")?;
    let superclass = match answer.trim().chars().next() {
        Some('y' | 'Y') => ALL_CLASS,
        _ => TOP_CLASS,
    };
    prompter.say(&format!("(Using superclass \"{}\")", superclass));

    let mut registry = SchemaRegistry::new();
    registry.define_class("", superclass, "");
    registry.define_class(id_name, &class_name, superclass);
    for (i, column) in header.iter().enumerate() {
        if i != id_column {
            let column = column.as_ref().trim();
            registry.define_property(column, &sanitize_name(column), &class_name);
        }
    }

    info!(
        class = %class_name,
        superclass,
        properties = registry.property_count(),
        "schema derived from header"
    );
    Ok(registry)
}

fn ask_id_column<S: AsRef<str>>(header: &[S], prompter: &mut dyn Prompter) -> Result<usize> {
    for (i, column) in header.iter().enumerate() {
        prompter.say(&format!("{}: {}", i, column.as_ref()));
    }

    loop {
        let answer = prompter.ask("Which column will be used as the class?")?;
        match answer.trim().parse::<usize>() {
            Ok(n) if n < header.len() => return Ok(n),
            _ => prompter.say(&format!(
                "Not a valid entry, please enter a number between 0 and {}",
                header.len() - 1
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 4] = ["ID", "Full Name", "Age", "Country"];

    #[test]
    fn test_derive_schema() {
        let mut prompter = ScriptedPrompter::new(["1", "\"Staff Member\"", "n"]);
        let registry = derive_schema(&HEADER, &mut prompter).unwrap();

        assert_eq!(registry.ordered_class_names(), ["Thing", "Staff_Member"]);
        let class = registry.get_class("staff_member").unwrap();
        assert_eq!(class.source_name(), "Full Name");
        assert_eq!(registry.superclass_of("Staff_Member"), Some("Thing"));
        assert_eq!(
            registry.direct_properties("Staff_Member"),
            Some(vec!["ID", "Age", "Country"])
        );
    }

    #[test]
    fn test_blank_class_name_uses_column() {
        let mut prompter = ScriptedPrompter::new(["1", "  ", "yes"]);
        let registry = derive_schema(&HEADER, &mut prompter).unwrap();

        assert!(registry.class_exists("Full_Name"));
        assert_eq!(registry.superclass_of("Full_Name"), Some(ALL_CLASS));
    }

    #[test]
    fn test_reasks_until_valid_column() {
        let mut prompter = ScriptedPrompter::new(["7", "x", "0", "", "n"]);
        let registry = derive_schema(&HEADER, &mut prompter).unwrap();

        assert!(registry.class_exists("ID"));
        let retries = prompter
            .transcript()
            .iter()
            .filter(|line| line.starts_with("Not a valid entry"))
            .count();
        assert_eq!(retries, 2);
        assert!(prompter
            .transcript()
            .iter()
            .any(|line| line.ends_with("between 0 and 3")));
    }

    #[test]
    fn test_runs_out_of_answers() {
        let mut prompter = ScriptedPrompter::new(["0"]);
        let err = derive_schema(&HEADER, &mut prompter).unwrap_err();
        assert!(matches!(err, Error::Prompt(_)));
    }

    #[test]
    fn test_empty_header() {
        let mut prompter = ScriptedPrompter::default();
        let header: [&str; 0] = [];
        assert!(matches!(
            derive_schema(&header, &mut prompter),
            Err(Error::EmptyInput(_))
        ));
    }
}
