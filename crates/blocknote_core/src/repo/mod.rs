//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence slot port used by the storage adapter.
//! - Isolate SQLite query details from service/controller orchestration.
//!
//! # Invariants
//! - Slot repositories store opaque payloads; they never parse note records.

pub mod slot_repo;
