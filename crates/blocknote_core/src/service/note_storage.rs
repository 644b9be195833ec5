//! Note storage adapter over one persistence slot.
//!
//! # Responsibility
//! - Read the whole note collection from the slot and migrate legacy records.
//! - Persist single-note saves/deletes as whole-collection rewrites.
//! - Create new notes with lifecycle defaults.
//!
//! # Invariants
//! - `list()` never fails: an absent, unreadable or unparseable slot is an
//!   empty collection. Malformed records inside a parseable payload are
//!   repaired individually and kept.
//! - `save()` replaces the record with the same id in place, or appends.
//! - `delete()` of an unknown id rewrites the unchanged collection.
//! - Every write is a read-modify-write of the entire collection; callers
//!   must serialize writes (single writer).

use crate::model::note::{Note, NoteValidationError, DEFAULT_NOTE_TITLE};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use crate::service::record_migration::decode_collection;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notion-notes";

pub type StorageResult<T> = Result<T, StorageError>;

/// Write-path error for the storage adapter.
#[derive(Debug)]
pub enum StorageError {
    /// Note violates persistence invariants.
    Validation(NoteValidationError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Slot backend failure.
    Repo(RepoError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid note: {err}"),
            Self::Encode(err) => write!(f, "failed to encode note collection: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StorageError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StorageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Storage adapter facade over a slot repository.
pub struct NoteStorage<R: SlotRepository> {
    repo: R,
    key: String,
}

impl<R: SlotRepository> NoteStorage<R> {
    /// Creates an adapter bound to [`DEFAULT_STORAGE_KEY`].
    pub fn new(repo: R) -> Self {
        Self::with_key(repo, DEFAULT_STORAGE_KEY)
    }

    /// Creates an adapter bound to a custom slot key.
    pub fn with_key(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrows the slot repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Loads and migrates every persisted note, in persisted order.
    pub fn list(&self) -> Vec<Note> {
        let payload = match self.repo.read_slot(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=notes_list module=storage status=error error_code=slot_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match decode_collection(&payload) {
            Ok(notes) => {
                debug!(
                    "event=notes_list module=storage status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_list module=storage status=degraded error_code=slot_corrupt error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Upserts one note by id.
    ///
    /// # Errors
    /// - `Validation` when the note breaks model invariants.
    /// - `Encode` / `Repo` when the collection cannot be written.
    pub fn save(&self, note: &Note) -> StorageResult<()> {
        note.validate()?;

        let mut notes = self.list();
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
        self.write_all(&notes)?;

        debug!(
            "event=note_save module=storage status=ok note_id={} count={}",
            note.id,
            notes.len()
        );
        Ok(())
    }

    /// Removes one note by id. Unknown ids are a no-op.
    pub fn delete(&self, note_id: &str) -> StorageResult<()> {
        let mut notes = self.list();
        let before = notes.len();
        notes.retain(|note| note.id != note_id);
        self.write_all(&notes)?;

        info!(
            "event=note_delete module=storage status=ok note_id={note_id} removed={}",
            before - notes.len()
        );
        Ok(())
    }

    /// Creates, persists and returns a new note.
    pub fn create(&self, title: impl Into<String>) -> StorageResult<Note> {
        let note = Note::new(title);
        self.save(&note)?;
        info!(
            "event=note_create module=storage status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Creates a note titled [`DEFAULT_NOTE_TITLE`].
    pub fn create_default(&self) -> StorageResult<Note> {
        self.create(DEFAULT_NOTE_TITLE)
    }

    fn write_all(&self, notes: &[Note]) -> StorageResult<()> {
        let payload = serde_json::to_string(notes)?;
        self.repo.write_slot(&self.key, &payload)?;
        Ok(())
    }
}
