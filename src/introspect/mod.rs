//! # Schema Introspection Module
//!
//! Reads a PostgreSQL table's structure (columns, types, constraints)
//! without reading its data. The result is a [`TableDescriptor`], the
//! immutable input to classification and template rendering.
//!
//! Two sources implement [`SchemaSource`]:
//!
//! - [`PgSchemaSource`] - a live database connection querying
//!   `information_schema`. Read-only; relies on the driver's own fail-fast
//!   network behavior.
//! - [`JsonSchemaSource`] - a descriptor file previously saved with
//!   `crudgen inspect`, for offline generation and deterministic tests.
//!
//! Descriptors are read fresh on every invocation. Nothing is cached across
//! runs.

mod json;
mod pg;
mod types;

pub use json::JsonSchemaSource;
pub use pg::PgSchemaSource;
pub use types::{ColumnDescriptor, ForeignKeyDescriptor, TableDescriptor, UniqueConstraint};

use thiserror::Error;

/// Errors produced while reading a table's structure.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// The requested table does not exist in the requested schema.
    #[error(
        "table {schema}.{table} does not exist; check the schema name or run pending migrations"
    )]
    TableNotFound {
        /// Schema that was searched
        schema: String,
        /// Table that was requested
        table: String,
    },
    /// Connection or query failure from the database driver.
    #[error("database error: {0}")]
    Db(#[from] postgres::Error),
    /// Descriptor file could not be read.
    #[error("failed to read table descriptor: {0}")]
    Io(#[from] std::io::Error),
    /// Descriptor file is not valid descriptor JSON.
    #[error("invalid table descriptor: {0}")]
    Parse(#[from] serde_json::Error),
    /// Descriptor file describes a different table than the one requested.
    #[error("descriptor file describes {found}, not {requested}")]
    DescriptorMismatch {
        /// Table the caller asked for (`schema.table`)
        requested: String,
        /// Table the descriptor actually holds (`schema.table`)
        found: String,
    },
}

/// A provider of table descriptors.
///
/// `&mut self` because the live implementation issues queries over a
/// stateful connection.
pub trait SchemaSource {
    /// Read the descriptor for `schema.table`.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectError::TableNotFound`] when the table does not
    /// exist, or a source-specific error for connection/parse failures.
    fn table(&mut self, schema: &str, table: &str) -> Result<TableDescriptor, IntrospectError>;
}
