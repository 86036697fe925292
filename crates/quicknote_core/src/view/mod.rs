//! Presentation-side state shared by UI shells.
//!
//! # Responsibility
//! - Keep a render cache consistent with the persistence component.
//! - Hold no business rules beyond position bookkeeping.

pub mod note_list;
