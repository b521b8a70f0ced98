use postgres::{Client, NoTls, Row};
use tracing::debug;

use super::types::{
    ColumnDescriptor, ForeignKeyDescriptor, TableDescriptor, UniqueConstraint,
};
use super::{IntrospectError, SchemaSource};

// information_schema domain types (sql_identifier, cardinal_number) are cast
// to text/int4 so the driver maps them to plain String/i32.
const COLUMNS_SQL: &str = "\
SELECT c.column_name::text            AS column_name,
       c.udt_name::text               AS udt_name,
       c.data_type::text              AS data_type,
       c.is_nullable::text            AS is_nullable,
       c.column_default::text         AS column_default,
       c.character_maximum_length::int4 AS character_maximum_length,
       c.numeric_precision::int4      AS numeric_precision,
       c.numeric_scale::int4          AS numeric_scale,
       c.ordinal_position::int4       AS ordinal_position
FROM information_schema.columns c
WHERE c.table_schema = $1 AND c.table_name = $2
ORDER BY c.ordinal_position";

const PRIMARY_KEY_SQL: &str = "\
SELECT kcu.column_name::text AS column_name
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON kcu.constraint_name = tc.constraint_name
 AND kcu.table_schema = tc.table_schema
WHERE tc.constraint_type = 'PRIMARY KEY'
  AND tc.table_schema = $1 AND tc.table_name = $2
ORDER BY kcu.ordinal_position";

const FOREIGN_KEYS_SQL: &str = "\
SELECT tc.constraint_name::text AS constraint_name,
       kcu.column_name::text    AS column_name,
       ccu.table_schema::text   AS referenced_schema,
       ccu.table_name::text     AS referenced_table,
       ccu.column_name::text    AS referenced_column
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON kcu.constraint_name = tc.constraint_name
 AND kcu.table_schema = tc.table_schema
JOIN information_schema.constraint_column_usage ccu
  ON ccu.constraint_name = tc.constraint_name
 AND ccu.constraint_schema = tc.constraint_schema
WHERE tc.constraint_type = 'FOREIGN KEY'
  AND tc.table_schema = $1 AND tc.table_name = $2
ORDER BY tc.constraint_name, kcu.ordinal_position";

const UNIQUE_CONSTRAINTS_SQL: &str = "\
SELECT tc.constraint_name::text AS constraint_name,
       kcu.column_name::text    AS column_name
FROM information_schema.table_constraints tc
JOIN information_schema.key_column_usage kcu
  ON kcu.constraint_name = tc.constraint_name
 AND kcu.table_schema = tc.table_schema
WHERE tc.constraint_type = 'UNIQUE'
  AND tc.table_schema = $1 AND tc.table_name = $2
ORDER BY tc.constraint_name, kcu.ordinal_position";

/// Live PostgreSQL schema source.
///
/// Issues read-only catalog queries; never touches table data. One
/// connection per invocation, dropped when the command exits.
pub struct PgSchemaSource {
    client: Client,
}

impl PgSchemaSource {
    /// Connect to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectError::Db`] when the connection cannot be
    /// established.
    pub fn connect(url: &str) -> Result<Self, IntrospectError> {
        let client = Client::connect(url, NoTls)?;
        Ok(PgSchemaSource { client })
    }
}

impl SchemaSource for PgSchemaSource {
    fn table(&mut self, schema: &str, table: &str) -> Result<TableDescriptor, IntrospectError> {
        let rows = self.client.query(COLUMNS_SQL, &[&schema, &table])?;
        if rows.is_empty() {
            return Err(IntrospectError::TableNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            });
        }
        let columns: Vec<ColumnDescriptor> = rows.iter().map(row_to_column).collect();
        debug!(schema, table, columns = columns.len(), "introspected columns");

        let primary_key = self
            .client
            .query(PRIMARY_KEY_SQL, &[&schema, &table])?
            .iter()
            .map(|r| r.get::<_, String>("column_name"))
            .collect();

        let foreign_keys = self
            .client
            .query(FOREIGN_KEYS_SQL, &[&schema, &table])?
            .iter()
            .map(|r| ForeignKeyDescriptor {
                constraint_name: r.get("constraint_name"),
                column: r.get("column_name"),
                referenced_schema: r.get("referenced_schema"),
                referenced_table: r.get("referenced_table"),
                referenced_column: r.get("referenced_column"),
            })
            .collect();

        // Rows arrive ordered by constraint name; fold consecutive rows of
        // the same constraint into one multi-column entry.
        let mut unique_constraints: Vec<UniqueConstraint> = Vec::new();
        for row in self.client.query(UNIQUE_CONSTRAINTS_SQL, &[&schema, &table])? {
            let name: String = row.get("constraint_name");
            let column: String = row.get("column_name");
            match unique_constraints.last_mut() {
                Some(last) if last.constraint_name == name => last.columns.push(column),
                _ => unique_constraints.push(UniqueConstraint {
                    constraint_name: name,
                    columns: vec![column],
                }),
            }
        }

        Ok(TableDescriptor {
            schema_name: schema.to_string(),
            table_name: table.to_string(),
            columns,
            primary_key,
            foreign_keys,
            unique_constraints,
        })
    }
}

fn row_to_column(row: &Row) -> ColumnDescriptor {
    let is_nullable: String = row.get("is_nullable");
    let default_expr: Option<String> = row.get("column_default");
    ColumnDescriptor {
        name: row.get("column_name"),
        sql_type: row.get("udt_name"),
        data_type: row.get("data_type"),
        nullable: is_nullable == "YES",
        has_default: default_expr.is_some(),
        default_expr,
        max_length: row
            .get::<_, Option<i32>>("character_maximum_length")
            .map(|v| v as u32),
        numeric_precision: row
            .get::<_, Option<i32>>("numeric_precision")
            .map(|v| v as u32),
        numeric_scale: row.get::<_, Option<i32>>("numeric_scale").map(|v| v as u32),
        ordinal: row.get::<_, i32>("ordinal_position") as u32,
    }
}
