//! Note search entry points.
//!
//! # Responsibility
//! - Decide which notes match a free-text list query.
//! - Keep matching rules inside core so every view filters identically.

pub mod filter;
