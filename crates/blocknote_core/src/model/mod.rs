//! Domain model for notes and their content blocks.
//!
//! # Responsibility
//! - Define canonical data structures shared by storage, controller and views.
//!
//! # Invariants
//! - Every note is identified by a stable, opaque string `NoteId`.
//! - Deletion is a hard removal from the collection; no tombstones are kept.

pub mod note;
