//! # Generator Module
//!
//! Turns an introspected, classified table into files on disk.
//!
//! ```text
//! TableDescriptor → Classification → GenerationPlan → Rendered files → Writer
//! ```
//!
//! - [`plan`] builds the deterministic [`GenerationPlan`]: which templates,
//!   which destinations. Identical inputs always produce an identical plan.
//! - [`type_map`] is the pure SQL→schema type mapping.
//! - [`templates`] renders one askama template per artifact type. Template
//!   variables are enumerated struct fields per artifact, checked at compile
//!   time, so a template cannot reference an undefined variable.
//! - [`writer`] owns the conflict policy (dry-run / skip / force) and the
//!   partial-failure reporting.
//! - [`run`] wires the stages together for the CLI.
//!
//! Generated artifacts follow the conventions of the surrounding
//! application (Fastify routes with TypeBox schemas, Knex repositories,
//! Angular standalone components); the templates live under `templates/`
//! and are the single place those conventions are written down.

pub mod plan;
pub mod run;
pub mod templates;
#[cfg(test)]
mod tests;
pub mod type_map;
pub mod writer;

pub use plan::{build_plan, FilePlan, GenerateOptions, GenerationPlan, PackageTier, Target, TemplateId};
pub use run::{run_generation, GenerateError, GenerateRequest, GenerationOutcome};
pub use templates::{render_plan, RenderError, RenderResult};
pub use type_map::{map_column, FieldType, UnsupportedType};
pub use writer::{write_rendered, FileOutcome, WriteMode, WriteReport};
