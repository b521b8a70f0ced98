use serde::{Deserialize, Serialize};

/// Column metadata as read from `information_schema.columns`.
///
/// Maps 1:1 to a generated validation-schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as declared in the database
    pub name: String,
    /// Internal type name (`udt_name`): `int4`, `varchar`, `numeric`, ...
    pub sql_type: String,
    /// Verbose SQL-standard type name: `integer`, `character varying`, ...
    pub data_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the column has a database-side default
    pub has_default: bool,
    /// The default expression, when one exists (e.g. `now()`, `true`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expr: Option<String>,
    /// Declared maximum length for character types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Declared precision for numeric types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_precision: Option<u32>,
    /// Declared scale for numeric types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<u32>,
    /// 1-based position within the table
    pub ordinal: u32,
}

/// A single-column foreign key reference.
///
/// Composite foreign keys appear as one descriptor per participating
/// column, sharing a `constraint_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Constraint name in the database
    pub constraint_name: String,
    /// Referencing column on this table
    pub column: String,
    /// Schema of the referenced table
    pub referenced_schema: String,
    /// Referenced table
    pub referenced_table: String,
    /// Referenced column
    pub referenced_column: String,
}

/// A unique constraint and the columns it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    /// Constraint name in the database
    pub constraint_name: String,
    /// Columns covered, in ordinal order
    pub columns: Vec<String>,
}

/// The complete structural description of one table.
///
/// Produced by introspection and immutable afterwards; every generation run
/// reads a fresh descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Database schema the table lives in
    pub schema_name: String,
    /// Table name
    pub table_name: String,
    /// Columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key column names, in key order
    pub primary_key: Vec<String>,
    /// Outgoing foreign keys
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    /// Unique constraints
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl TableDescriptor {
    /// `schema.table` as a display string.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.table_name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether `name` participates in the primary key.
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.iter().any(|c| c == name)
    }

    /// The foreign key a column participates in, if any.
    pub fn foreign_key_for(&self, name: &str) -> Option<&ForeignKeyDescriptor> {
        self.foreign_keys.iter().find(|fk| fk.column == name)
    }

    /// Whether the table references any table other than itself.
    ///
    /// Self-references (`parent_id`-style hierarchies) do not count; the
    /// classifier treats them as part of a reference table's own shape.
    pub fn has_external_foreign_keys(&self) -> bool {
        self.foreign_keys.iter().any(|fk| {
            fk.referenced_table != self.table_name || fk.referenced_schema != self.schema_name
        })
    }
}
