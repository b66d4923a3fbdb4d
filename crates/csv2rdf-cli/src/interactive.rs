//! Console questions for deriving a schema without a config file.

use csv2rdf_core::{Error, Prompter};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// Asks questions on the terminal with line editing.
pub struct ConsolePrompter {
    editor: DefaultEditor,
}

impl ConsolePrompter {
    /// Set up the terminal editor.
    pub fn new() -> Result<Self, ReadlineError> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(false)
            .build();
        Ok(Self {
            editor: DefaultEditor::with_config(config)?,
        })
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, question: &str) -> csv2rdf_core::Result<String> {
        match self.editor.readline(&format!("{} ", question)) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(Error::Prompt("interrupted".to_string())),
            Err(ReadlineError::Eof) => Err(Error::Prompt("end of input".to_string())),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}
