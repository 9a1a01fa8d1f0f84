//! Front-end bridge for the employee task tracker.

pub mod api;
