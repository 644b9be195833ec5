//! Root controller owning the in-memory note collection and selection.
//!
//! # Responsibility
//! - Load the collection once at startup and select the first note.
//! - Route create/select/update/delete through the storage adapter.
//! - Publish state changes and success notifications to subscribers.
//!
//! # Invariants
//! - `notes` is the single authoritative in-memory copy, newest-created
//!   first; the storage slot mirrors it after every write.
//! - The selection always refers to a note in `notes`, or is none.
//! - Every mutation finishes its storage write before in-memory state
//!   changes; a failed write leaves state untouched.

use crate::app::events::{ControllerEvent, EventBus, Notification};
use crate::model::note::{Note, NoteId};
use crate::repo::slot_repo::SlotRepository;
use crate::service::note_storage::{NoteStorage, StorageError};
use crate::view::note_list::ListIntent;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Receiver;

pub const NOTE_CREATED_MESSAGE: &str = "New note created!";
pub const NOTE_DELETED_MESSAGE: &str = "Note deleted!";

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller operation error.
#[derive(Debug)]
pub enum ControllerError {
    /// Target note is not part of the in-memory collection.
    UnknownNote(NoteId),
    Storage(StorageError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNote(note_id) => write!(f, "note not found: {note_id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownNote(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for ControllerError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Root controller generic over the persistence slot backend.
pub struct NotesController<R: SlotRepository> {
    storage: NoteStorage<R>,
    notes: Vec<Note>,
    selected: Option<NoteId>,
    events: EventBus,
}

impl<R: SlotRepository> NotesController<R> {
    /// Loads all notes once and selects the first, if any.
    pub fn start(storage: NoteStorage<R>) -> Self {
        let mut notes = storage.list();
        // Stable: notes sharing a creation time keep persisted order.
        notes.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        let selected = notes.first().map(|note| note.id.clone());

        info!(
            "event=controller_start module=app status=ok count={} selected={}",
            notes.len(),
            selected.is_some()
        );

        Self {
            storage,
            notes,
            selected,
            events: EventBus::default(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Note> {
        let selected = self.selected.as_deref()?;
        self.notes.iter().find(|note| note.id == selected)
    }

    pub fn storage(&self) -> &NoteStorage<R> {
        &self.storage
    }

    /// Registers a new event subscriber.
    pub fn subscribe(&mut self) -> Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Creates a default note, prepends and selects it.
    pub fn create_note(&mut self) -> ControllerResult<&Note> {
        let note = self.storage.create_default()?;
        let note_id = note.id.clone();
        self.notes.insert(0, note);
        self.selected = Some(note_id.clone());

        self.events.emit(ControllerEvent::NotesChanged);
        self.events.emit(ControllerEvent::SelectionChanged(Some(note_id.clone())));
        self.events.emit(ControllerEvent::Notification(Notification::success(
            NOTE_CREATED_MESSAGE,
        )));
        info!("event=note_create module=app status=ok note_id={note_id}");

        Ok(&self.notes[0])
    }

    /// Selects a note without touching persistence.
    pub fn select_note(&mut self, note_id: &str) -> ControllerResult<()> {
        if !self.contains(note_id) {
            return Err(ControllerError::UnknownNote(note_id.to_string()));
        }
        self.set_selection(Some(note_id.to_string()));
        Ok(())
    }

    /// Persists a fully formed note, replaces it in memory and selects it.
    pub fn update_note(&mut self, note: Note) -> ControllerResult<()> {
        let Some(index) = self.notes.iter().position(|existing| existing.id == note.id) else {
            return Err(ControllerError::UnknownNote(note.id));
        };

        self.storage.save(&note)?;
        let note_id = note.id.clone();
        self.notes[index] = note;

        self.events.emit(ControllerEvent::NotesChanged);
        self.set_selection(Some(note_id.clone()));
        debug!("event=note_update module=app status=ok note_id={note_id}");
        Ok(())
    }

    /// Persists the removal of a note and drops it from memory.
    ///
    /// When the deleted note was selected, the first remaining note (or none)
    /// becomes selected.
    pub fn delete_note(&mut self, note_id: &str) -> ControllerResult<()> {
        self.storage.delete(note_id)?;

        let remaining: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != note_id)
            .cloned()
            .collect();
        let was_selected = self.selected.as_deref() == Some(note_id);
        self.notes = remaining;

        self.events.emit(ControllerEvent::NotesChanged);
        if was_selected {
            let next = self.notes.first().map(|note| note.id.clone());
            self.set_selection(next);
        }
        self.events.emit(ControllerEvent::Notification(Notification::success(
            NOTE_DELETED_MESSAGE,
        )));
        info!("event=note_delete module=app status=ok note_id={note_id} was_selected={was_selected}");
        Ok(())
    }

    /// Routes a list view intent.
    pub fn handle(&mut self, intent: ListIntent) -> ControllerResult<()> {
        match intent {
            ListIntent::Create => self.create_note().map(|_| ()),
            ListIntent::Select(note_id) => self.select_note(&note_id),
            ListIntent::Delete(note_id) => self.delete_note(&note_id),
        }
    }

    /// Routes editor output; `None` means the edit produced no change.
    pub fn apply_edit(&mut self, edit: Option<Note>) -> ControllerResult<()> {
        match edit {
            Some(note) => self.update_note(note),
            None => Ok(()),
        }
    }

    fn contains(&self, note_id: &str) -> bool {
        self.notes.iter().any(|note| note.id == note_id)
    }

    fn set_selection(&mut self, selected: Option<NoteId>) {
        self.selected = selected.clone();
        self.events.emit(ControllerEvent::SelectionChanged(selected));
    }
}
