use std::fs;
use std::path::Path;

use super::types::TableDescriptor;
use super::{IntrospectError, SchemaSource};

/// Descriptor-file schema source.
///
/// Reads a [`TableDescriptor`] saved by `crudgen inspect`, allowing
/// generation without a live database connection. The file holds exactly
/// one table; requesting any other table is a mismatch.
pub struct JsonSchemaSource {
    descriptor: TableDescriptor,
}

impl JsonSchemaSource {
    /// Load a descriptor file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectError::Io`] if the file cannot be read or
    /// [`IntrospectError::Parse`] if it is not valid descriptor JSON.
    pub fn open(path: &Path) -> Result<Self, IntrospectError> {
        let contents = fs::read_to_string(path)?;
        let descriptor: TableDescriptor = serde_json::from_str(&contents)?;
        Ok(JsonSchemaSource { descriptor })
    }

    /// Wrap an in-memory descriptor (used by tests).
    pub fn from_descriptor(descriptor: TableDescriptor) -> Self {
        JsonSchemaSource { descriptor }
    }
}

impl SchemaSource for JsonSchemaSource {
    fn table(&mut self, schema: &str, table: &str) -> Result<TableDescriptor, IntrospectError> {
        if self.descriptor.schema_name != schema || self.descriptor.table_name != table {
            return Err(IntrospectError::DescriptorMismatch {
                requested: format!("{schema}.{table}"),
                found: self.descriptor.qualified_name(),
            });
        }
        Ok(self.descriptor.clone())
    }
}
