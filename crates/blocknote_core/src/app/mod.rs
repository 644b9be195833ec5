//! Application wiring: root controller, events and startup.
//!
//! # Responsibility
//! - Mediate between the storage adapter and the view models.
//! - Build a ready controller from resolved configuration.

pub mod controller;
pub mod events;

use crate::config::CoreConfig;
use crate::db::open_db;
use crate::repo::slot_repo::{RepoResult, SqliteSlotRepository};
use crate::service::note_storage::NoteStorage;
use controller::NotesController;
use log::info;

/// Opens the configured database and starts a controller over it.
///
/// # Errors
/// - `RepoError::Db` when the file cannot be opened or migrated.
/// - `RepoError::MissingRequiredTable` when the schema is incomplete.
pub fn launch(config: &CoreConfig) -> RepoResult<NotesController<SqliteSlotRepository>> {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteSlotRepository::try_new(conn)?;
    let storage = NoteStorage::with_key(repo, config.storage_key.as_str());
    info!(
        "event=app_launch module=app status=ok storage_key={}",
        config.storage_key
    );
    Ok(NotesController::start(storage))
}
