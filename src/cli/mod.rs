//! # CLI Module
//!
//! Command-line interface for crudgen. `generate` runs the whole pipeline;
//! `inspect` and `classify` expose the introspection and classification
//! stages on their own.

mod commands;

pub use commands::{run_cli, Cli, Commands, PackageArg, TargetArg};
