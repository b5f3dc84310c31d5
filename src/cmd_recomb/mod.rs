//! Subcommand modules for the `recomb` binary.

pub mod scan;
pub mod window;
