#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(clippy::pedantic)]
// axum 0.7 and reqwest 0.11 pull in both major versions of `http` and `hyper`
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::io;
use tabled::Tabled;
use thiserror::Error;

pub mod app;
pub mod backends;
pub mod http;
pub mod setup;
pub mod ui;

// More convenient Result type
pub type Result<T> = std::result::Result<T, NoteError>;

/// A stored note. The `id` is always assigned by the backend
#[derive(Tabled, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
}

/// Client supplied fields for creating or updating a note.
/// Unknown fields such as `id` are ignored when deserializing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Turns the draft into a note with the given ID
    #[must_use]
    pub fn into_note(self, id: u64) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Trait to be implemented by all backends that manage storing and retrieving notes
pub trait NoteBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Stores a new note, assigning it an ID
    ///
    /// # Errors
    ///
    /// Returns an error if the note could not be stored
    fn create(&self, draft: NoteDraft) -> Result<Note>;

    /// Returns every stored note
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be read
    fn list(&self) -> Result<Vec<Note>>;

    /// Fetches a single note by ID
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID
    fn read(&self, id: u64) -> Result<Note>;

    /// Replaces title and content of an existing note. The ID never changes
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID, leaving the collection untouched
    fn update(&self, id: u64, draft: NoteDraft) -> Result<Note>;

    /// Removes a note by ID
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID, leaving the collection untouched
    fn delete(&self, id: u64) -> Result<()>;
}

// Enum for all possible errors
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

impl NoteError {
    /// True when the error means the requested note does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Backend(BackendError::NoteNotFound(_)))
    }
}

// Enum for all possible menu input errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read from stdin: {0}")]
    StdinReadError(io::Error),

    #[error("Failed writing to stdout: {0}")]
    StdoutWriteError(io::Error),

    #[error("Couldn't convert '{0}' to a number. Please enter a number 1-5")]
    ParseError(String),

    #[error("Invalid option: {0}. Please enter a number 1-5")]
    InvalidOption(u8),

    #[error("Invalid ID: '{0}'")]
    InvalidId(String),

    #[error("Reached end of input")]
    EndOfInput,
}

// Enum for all possible storage errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed opening notes file: {0}")]
    FileOpenError(io::Error),

    #[error("Failed reading notes file: {0}")]
    FileReadError(io::Error),

    #[error("Failed creating notes file: {0}")]
    FileCreationError(io::Error),

    #[error("Failed writing notes file: {0}")]
    FileWriteError(io::Error),

    #[error("Notes file is not a valid JSON array of notes: {0}")]
    DecodeError(serde_json::Error),

    #[error("Failed encoding notes as JSON: {0}")]
    EncodeError(serde_json::Error),

    #[error("Note not found with ID: {0}")]
    NoteNotFound(u64),

    #[error("Note store lock was poisoned by a panicking thread")]
    LockPoisoned,

    #[error("No note IDs left to assign")]
    IdSpaceExhausted,
}
