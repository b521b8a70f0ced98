//! # crudgen
//!
//! **crudgen** is a PostgreSQL table-driven CRUD scaffolding generator: it
//! introspects one table, classifies it into a domain/subdomain, renders a
//! consistent set of backend and frontend source files from askama
//! templates, and writes them into a target project tree.
//!
//! ## Architecture
//!
//! The pipeline is four stages, each its own module:
//!
//! - **[`introspect`]** - reads a table's columns, types, and constraints
//!   from `information_schema` (or from a saved descriptor file)
//! - **[`classify`]** - ordered heuristic rules assigning the table to
//!   master-data or operations, with a confidence level
//! - **[`generator`]** - deterministic plan building, SQL→schema type
//!   mapping, template rendering, and the file writer with its
//!   dry-run/skip/force conflict policy
//! - **[`cli`]** - the `generate` / `inspect` / `classify` command surface
//!
//! [`naming`] holds the pure case-transform helpers every template shares,
//! and [`config`] the environment-variable defaults.
//!
//! ```text
//! crudgen generate <table> ──► introspect ──► classify ──► plan
//!                                                           │
//!                                          summary ◄── write ◄── render
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Generate a full feature module straight from the database
//! crudgen generate departments --database-url postgres://localhost/hospital \
//!     --domain inventory
//!
//! # Preview without touching the tree
//! crudgen generate departments --dry-run
//!
//! # Save a descriptor, generate offline later
//! crudgen inspect departments --out departments.json
//! crudgen generate departments --from-json departments.json
//! ```
//!
//! ## Invocation model
//!
//! One invocation handles one table, synchronously, then exits. Descriptors
//! are read fresh every run and plans are never persisted; the generated
//! files are the only artifact, owned by the application developer
//! afterwards. Concurrent invocations against the same project tree are not
//! coordinated - avoid running two generators over one checkout. An
//! interrupted run leaves a partial module that a rerun with `--force`
//! repairs.

pub mod classify;
pub mod cli;
pub mod config;
pub mod generator;
pub mod introspect;
pub mod naming;

pub use classify::{classify, DomainClassification, DomainKind};
pub use config::GeneratorConfig;
pub use generator::{
    build_plan, run_generation, GenerateOptions, GenerateRequest, GenerationPlan, WriteMode,
};
pub use introspect::{JsonSchemaSource, PgSchemaSource, SchemaSource, TableDescriptor};
