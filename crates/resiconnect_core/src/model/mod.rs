//! Directory domain model.
//!
//! # Responsibility
//! - Define validated field values, person roles and events.
//! - Own the aggregate that enforces identity uniqueness.
//!
//! # Invariants
//! - Every entity is built only from validated field values.
//! - Person identity is name (case-insensitive) plus phone.

pub mod directory;
pub mod event;
pub mod fields;
pub mod manager;
pub mod person;
pub mod unique_list;
