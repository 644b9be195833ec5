//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slot repository calls into note-level storage APIs.
//! - Keep controller/view layers decoupled from payload encoding.

pub mod note_storage;
pub mod record_migration;
