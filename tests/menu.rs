use notekeep::app::NoteService;
use notekeep::backends::{IdStrategy, JsonFileBackend, MemoryBackend};
use notekeep::ui::{self, IO};
use notekeep::{MenuError, Note, NoteBackend, NoteError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Arc;

/// Feeds canned lines to the menu and records everything it prints
#[derive(Default)]
struct ScriptedIo {
    input: RefCell<VecDeque<String>>,
    output: RefCell<Vec<String>>,
}

impl ScriptedIo {
    fn new(lines: &[&str]) -> Self {
        Self {
            input: RefCell::new(lines.iter().map(ToString::to_string).collect()),
            output: RefCell::default(),
        }
    }

    fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.output
            .borrow()
            .iter()
            .filter(|l| l.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl IO for ScriptedIo {
    fn get_input(&self) -> Result<String> {
        self.input
            .borrow_mut()
            .pop_front()
            .ok_or(NoteError::Menu(MenuError::EndOfInput))
    }

    fn show_menu(&self, _options: &[impl Display]) {
        self.output.borrow_mut().push("menu".to_string());
    }

    fn show_title(&self, title: &str) {
        self.output.borrow_mut().push(format!("title: {title}"));
    }

    fn show_notes(&self, notes: Vec<Note>) {
        for n in notes {
            self.output
                .borrow_mut()
                .push(format!("note: {} {} {}", n.id, n.title, n.content));
        }
    }

    fn show_text(&self, msg: &str) {
        self.output.borrow_mut().push(msg.to_string());
    }

    fn show_info(&self, msg: &str) {
        self.output.borrow_mut().push(format!("info: {msg}"));
    }

    fn show_error(&self, msg: &str) {
        self.output.borrow_mut().push(format!("error: {msg}"));
    }
}

fn memory_service() -> (Arc<MemoryBackend>, NoteService) {
    let backend = Arc::new(MemoryBackend::new());
    let service = NoteService::new(backend.clone());
    (backend, service)
}

#[test]
fn add_view_update_delete_then_exit() {
    let (backend, service) = memory_service();
    let io = ScriptedIo::new(&[
        "1", "A", "x", // add
        "1", "B", "y", // add
        "3", "1", "A2", "x2", // update
        "4", "2", // delete
        "2", // view
        "5",
    ]);

    ui::run(&io, &service);

    assert_eq!(
        io.lines_starting_with("info: "),
        vec![
            "info: Note added with ID: 1",
            "info: Note added with ID: 2",
            "info: Updated note with ID: 1",
            "info: Deleted note with ID: 2",
        ]
    );
    assert_eq!(io.lines_starting_with("note: "), vec!["note: 1 A2 x2"]);
    assert_eq!(
        io.output.borrow().last().map(String::as_str),
        Some("Thanks for taking notes!")
    );
    assert_eq!(backend.list().unwrap().len(), 1);
}

#[test]
fn view_of_empty_store_says_so() {
    let (_backend, service) = memory_service();
    let io = ScriptedIo::new(&["2", "5"]);

    ui::run(&io, &service);

    assert!(io.output.borrow().iter().any(|l| l == "No notes found!"));
}

#[test]
fn bad_menu_choices_are_reported_and_menu_is_shown_again() {
    let (_backend, service) = memory_service();
    let io = ScriptedIo::new(&["hello", "9", "5"]);

    ui::run(&io, &service);

    assert_eq!(io.lines_starting_with("error: ").len(), 2);
    assert_eq!(io.lines_starting_with("menu").len(), 3);
}

#[test]
fn update_of_unknown_id_does_not_prompt_for_fields() {
    let (backend, service) = memory_service();
    // After the not-found report the next line is read as a menu choice
    let io = ScriptedIo::new(&["3", "7", "5"]);

    ui::run(&io, &service);

    let errors = io.lines_starting_with("error: ");
    assert_eq!(errors, vec!["error: Note not found with ID: 7"]);
    assert!(!io.output.borrow().iter().any(|l| l == "New title:"));
    assert!(backend.list().unwrap().is_empty());
}

#[test]
fn invalid_ids_return_to_menu() {
    let (_backend, service) = memory_service();
    let io = ScriptedIo::new(&["4", "one", "3", "-2", "5"]);

    ui::run(&io, &service);

    assert_eq!(
        io.lines_starting_with("error: "),
        vec!["error: Invalid ID: 'one'", "error: Invalid ID: '-2'"]
    );
}

#[test]
fn delete_of_unknown_id_reports_not_found() {
    let (_backend, service) = memory_service();
    let io = ScriptedIo::new(&["4", "3", "5"]);

    ui::run(&io, &service);

    assert_eq!(
        io.lines_starting_with("error: "),
        vec!["error: Note not found with ID: 3"]
    );
}

#[test]
fn end_of_input_leaves_menu_quietly() {
    let (backend, service) = memory_service();
    // Input ends in the middle of adding a note
    let io = ScriptedIo::new(&["1", "A"]);

    ui::run(&io, &service);

    assert!(io.lines_starting_with("error: ").is_empty());
    assert!(backend.list().unwrap().is_empty());
}

#[test]
fn menu_on_file_backend_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let service = || {
        NoteService::new(Arc::new(JsonFileBackend::new(
            &path,
            IdStrategy::default(),
        )))
    };

    ui::run(&ScriptedIo::new(&["1", "A", "x", "5"]), &service());

    let io = ScriptedIo::new(&["2", "5"]);
    ui::run(&io, &service());
    assert_eq!(io.lines_starting_with("note: "), vec!["note: 1 A x"]);
}
