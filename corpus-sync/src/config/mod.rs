//! Configuration and dependency initialization for the corpus sync CLI.

mod dependencies;

pub use dependencies::Dependencies;
