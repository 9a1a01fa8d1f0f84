//! Repository layer over the persisted record set.
//!
//! # Responsibility
//! - Own record set mutation semantics (append, replace in place, remove).
//! - Isolate storage details behind `crate::store::RecordStore`.
//!
//! # Invariants
//! - Write paths validate candidates before touching the set.
//! - Repository APIs return semantic errors (`IndexOutOfRange`) in addition
//!   to storage errors.

pub mod record_repo;
