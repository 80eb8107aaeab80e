//! Shared primitives for the Folio content workspace.
//!
//! Holds the id and timestamp aliases every crate agrees on, the domain
//! error type, and small helpers used when building content rows.

pub mod error;
pub mod slug;
pub mod types;
pub mod validation;
