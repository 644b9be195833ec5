//! Core domain logic for BlockNote, a local block-based note keeper.
//! This crate is the single source of truth for note invariants, storage
//! migration and the headless editor/list view models.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use app::controller::{
    ControllerError, ControllerResult, NotesController, NOTE_CREATED_MESSAGE,
    NOTE_DELETED_MESSAGE,
};
pub use app::events::{ControllerEvent, Notification, NotificationLevel};
pub use app::launch;
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    new_id, BlockControl, BlockId, BlockType, Note, NoteBlock, NoteId, NoteValidationError,
    Timestamp, DEFAULT_NOTE_EMOJI, DEFAULT_NOTE_TITLE,
};
pub use repo::slot_repo::{
    InMemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use search::filter::{filter_notes, note_matches, NoteFilter};
pub use service::note_storage::{NoteStorage, StorageError, StorageResult, DEFAULT_STORAGE_KEY};
pub use view::editor::{BlockView, EditorView, NoteEditor, NoteView, EMOJI_PALETTE};
pub use view::note_list::{ListIntent, NoteListView, NoteListing, NoteRow};
pub use view::EmptyState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
