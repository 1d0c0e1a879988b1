//! Shared models and rules for the SheetDrop front-end.
//!
//! Everything here is plain data: serde types for the backend wire formats,
//! the canonical internal shapes the rest of the application consumes, and
//! the client-side validation rules applied before a file ever reaches the
//! network. Nothing in this crate touches the DOM, so it compiles and tests
//! natively.

pub mod models;
pub mod validation;
