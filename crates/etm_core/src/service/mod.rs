//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and view calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage and rendering details.

pub mod tracker;
