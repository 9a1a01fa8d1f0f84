//! Domain model for tracked employees.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep range and non-empty rules close to the types that carry them.
//!
//! # Invariants
//! - A record's position in the record set is its only address; ids are
//!   user-supplied and may repeat.

pub mod employee;
