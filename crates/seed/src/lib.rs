//! Dependency-ordered seeding for the Folio content tables.
//!
//! - [`operation`]: the [`Operation`](operation::Operation) contract.
//! - [`registry`]: explicit registration, ordering, and dependency checks.
//! - [`orchestrator`]: clear-then-load runs with fail-fast execution.
//! - [`report`]: run summaries and console rendering.
//! - [`operations`]: the content operations and their composition root.
//! - [`cli`]: the `folio-seed` command and its exit codes.

pub mod cli;
pub mod config;
pub mod operation;
pub mod operations;
pub mod orchestrator;
pub mod registry;
pub mod report;
