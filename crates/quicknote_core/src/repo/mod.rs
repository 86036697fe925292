//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the `notes` table.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs report absence as `None`/row counts; semantic errors
//!   such as not-found are raised by the service layer.

pub mod note_repo;
