use crate::app::NoteService;
use crate::{MenuError, Note, NoteError, Result};

use log::{debug, trace};
use std::fmt;

/// Abstraction for input/output
pub trait IO {
    /// Read a trimmed line of input ending at newline
    ///
    /// # Errors
    ///
    /// Returns `MenuError::EndOfInput` once input is exhausted
    fn get_input(&self) -> Result<String>;
    /// Print a prompt and read the answer
    ///
    /// # Errors
    ///
    /// Any error from `get_input`
    fn prompt(&self, label: &str) -> Result<String> {
        self.show_text(label);
        self.get_input()
    }
    /// Display a list of selectable options
    fn show_menu(&self, options: &[impl fmt::Display]);
    /// Display a bolded title
    fn show_title(&self, title: &str);
    /// Render a table of notes
    fn show_notes(&self, notes: Vec<Note>);
    /// Print a plain text message
    fn show_text(&self, msg: &str);
    /// Report a successful outcome
    fn show_info(&self, msg: &str);
    /// Report a failed outcome
    fn show_error(&self, msg: &str);
}

/// CRUD actions available in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add = 1,
    View = 2,
    Update = 3,
    Delete = 4,
    Exit = 5,
}

/// All menu options in display order
pub const ALL_MENU_OPTIONS: [MenuOption; 5] = [
    MenuOption::Add,
    MenuOption::View,
    MenuOption::Update,
    MenuOption::Delete,
    MenuOption::Exit,
];

/// Convert a numeric choice into a `MenuOption`
impl TryFrom<u8> for MenuOption {
    type Error = MenuError;

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Add),
            2 => Ok(Self::View),
            3 => Ok(Self::Update),
            4 => Ok(Self::Delete),
            5 => Ok(Self::Exit),
            _ => Err(MenuError::InvalidOption(n)),
        }
    }
}

/// Show the option number and label, e.g. `(1) Add a new note`
impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Add => "Add a new note",
            Self::View => "View all notes",
            Self::Update => "Update a note",
            Self::Delete => "Delete a note",
            Self::Exit => "Exit",
        };
        write!(f, "({}) {}", *self as u8, label)
    }
}

/// Show the menu and handle choices until the user exits or input runs out
pub fn run(io: &impl IO, service: &NoteService) {
    debug!("Starting menu on {} backend", service.backend_name());

    loop {
        io.show_menu(&ALL_MENU_OPTIONS);
        let outcome = get_menu_input(io).and_then(|option| match option {
            MenuOption::Exit => Ok(false),
            other => handle_menu_option(io, service, other).map(|()| true),
        });

        match outcome {
            Ok(true) => {}
            Ok(false) => {
                io.show_text("Thanks for taking notes!");
                return;
            }
            Err(NoteError::Menu(MenuError::EndOfInput)) => {
                debug!("Input closed, leaving menu");
                return;
            }
            Err(e) => io.show_error(&e.to_string()),
        }
    }
}

/// Try parsing input as `MenuOption` or return an error
///
/// # Errors
///
/// Returns `MenuError::ParseError` if input is not an integer
/// and `MenuError::InvalidOption` if the integer is out of range
fn get_menu_input(io: &impl IO) -> Result<MenuOption> {
    let input = io.get_input()?;
    let n = input
        .parse::<u8>()
        .map_err(|_| MenuError::ParseError(input))?;
    Ok(MenuOption::try_from(n)?)
}

// Dispatch chosen `MenuOption` to its handler. Only input errors are returned
fn handle_menu_option(io: &impl IO, service: &NoteService, option: MenuOption) -> Result<()> {
    match option {
        MenuOption::Add => handle_add(io, service),
        MenuOption::View => {
            handle_view(io, service);
            Ok(())
        }
        MenuOption::Update => handle_update(io, service),
        MenuOption::Delete => handle_delete(io, service),
        MenuOption::Exit => Ok(()),
    }
}

fn parse_id(input: String) -> Result<u64> {
    input
        .parse::<u64>()
        .map_err(|_| NoteError::Menu(MenuError::InvalidId(input)))
}

fn handle_add(io: &impl IO, service: &NoteService) -> Result<()> {
    io.show_title("Add note");

    let title = io.prompt("Title:")?;
    let content = io.prompt("Content:")?;
    trace!("Got title: {title}, content: {content}");

    match service.create_note(title, content) {
        Ok(note) => io.show_info(&format!("Note added with ID: {}", note.id)),
        Err(e) => io.show_error(&e.to_string()),
    }
    Ok(())
}

fn handle_view(io: &impl IO, service: &NoteService) {
    match service.list_notes() {
        Ok(notes) if notes.is_empty() => io.show_text("No notes found!"),
        Ok(notes) => io.show_notes(notes),
        Err(e) => io.show_error(&e.to_string()),
    }
}

// Asks for the ID first and only prompts for new fields if the note exists
fn handle_update(io: &impl IO, service: &NoteService) -> Result<()> {
    io.show_title("Update note");

    let id = parse_id(io.prompt("ID:")?)?;
    if let Err(e) = service.read_note(id) {
        io.show_error(&e.to_string());
        return Ok(());
    }

    let title = io.prompt("New title:")?;
    let content = io.prompt("New content:")?;

    match service.update_note(id, title, content) {
        Ok(_) => io.show_info(&format!("Updated note with ID: {id}")),
        Err(e) => io.show_error(&e.to_string()),
    }
    Ok(())
}

fn handle_delete(io: &impl IO, service: &NoteService) -> Result<()> {
    io.show_title("Delete note");

    let id = parse_id(io.prompt("ID:")?)?;
    match service.delete_note(id) {
        Ok(()) => io.show_info(&format!("Deleted note with ID: {id}")),
        Err(e) => io.show_error(&e.to_string()),
    }
    Ok(())
}
