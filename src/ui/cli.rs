use crate::ui::io::IO;
use crate::{MenuError, Note, NoteError, Result};

use colored::Colorize;
use log::{error, info, trace};
use std::io::{self, Write};
use tabled::{Table, settings::Style};

/// Terminal implementation of `IO` over stdin and stdout
pub struct Cli;

impl IO for Cli {
    /// Reads a single line of text, trims it, and returns the resulting string.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or reading from stdin fails,
    /// and `MenuError::EndOfInput` once stdin is closed.
    fn get_input(&self) -> Result<String> {
        let mut input = String::new();
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| NoteError::Menu(MenuError::StdoutWriteError(e)))?;
        trace!("Flushed stdout");

        let read = io::stdin()
            .read_line(&mut input)
            .map_err(|e| NoteError::Menu(MenuError::StdinReadError(e)))?;
        if read == 0 {
            println!();
            return Err(NoteError::Menu(MenuError::EndOfInput));
        }

        input = input.trim().to_string();
        trace!("Got input: {input}");
        Ok(input)
    }

    fn show_menu(&self, options: &[impl std::fmt::Display]) {
        self.show_title("Choose an option");
        for o in options {
            println!("{o}");
        }
        println!();
    }

    /// Renders the notes in `psql` style
    fn show_notes(&self, notes: Vec<Note>) {
        let mut table = Table::new(notes);
        table.with(Style::psql());
        println!("{table}");
    }

    fn show_title(&self, title: &str) {
        println!("\n{}\n", title.bold());
    }

    fn show_text(&self, msg: &str) {
        println!("{msg}");
    }

    fn show_info(&self, msg: &str) {
        info!("{msg}");
    }

    fn show_error(&self, msg: &str) {
        error!("{msg}");
    }
}
