//! outdatedcheck - Go module freshness checker library
//!
//! Reads the requirements declared by a go.mod (or `go list -m -json`
//! output), asks a version source for each module's published tags and
//! classifies every requirement as up to date, outdated or unresolvable.
//! The resulting report is rendered as a table, JSON or lint-style
//! diagnostics.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod source;
