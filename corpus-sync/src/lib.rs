//! # Corpus Sync
//!
//! Operator CLI for batch synchronization between JSON corpora on disk and a
//! search index.
//!
//! ## Architecture
//!
//! The binary wires a concrete OpenSearch store into the sync engine and
//! exposes one subcommand per operation:
//!
//! 1. **import**: bulk-load a JSON array file into an index
//! 2. **export**: stream an index's full contents as NDJSON on stdout
//! 3. **count / exists / delete-index**: index-level inspection and cleanup
//!
//! ## Modules
//!
//! - [`cli`]: clap command-line definition
//! - [`commands`]: command implementations on top of the sync service
//! - [`config`]: configuration and dependency initialization
//! - [`errors`]: error types for the CLI

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

pub use cli::{Cli, Command};
pub use config::Dependencies;
pub use errors::CliError;
