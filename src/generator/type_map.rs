use crate::introspect::ColumnDescriptor;
use thiserror::Error;

/// Validation-schema field type derived from a SQL column type.
///
/// The mapping is pure and type-preserving: nothing here consults the
/// database, and numeric columns keep their declared precision/scale as a
/// constraint instead of collapsing into a float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `int2`/`int4` and their serial forms
    Integer,
    /// `int8`/`bigserial`
    BigInt,
    /// `float4`/`float8`
    Float,
    /// `numeric`/`decimal`, with declared precision/scale when constrained.
    ///
    /// Rendered as a decimal string with a digit-count pattern. Currency
    /// columns must survive generation exactly; widening them to a
    /// floating-point schema type is the bug this variant exists to prevent.
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    /// `bool`
    Boolean,
    /// `varchar`/`bpchar` (bounded) and `text`/`citext` (unbounded)
    Text { max_length: Option<u32> },
    /// `uuid`
    Uuid,
    /// `timestamp`/`timestamptz`
    Timestamp,
    /// `date`
    Date,
    /// `time`/`timetz`
    Time,
    /// `json`/`jsonb`
    Json,
    /// `bytea`, carried as base64 text
    Binary,
}

/// A column whose SQL type has no schema mapping.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("column {column} has unsupported SQL type {sql_type}")]
pub struct UnsupportedType {
    /// Offending column
    pub column: String,
    /// Its `udt_name`
    pub sql_type: String,
}

/// Map one introspected column to a schema field type.
///
/// # Errors
///
/// Returns [`UnsupportedType`] for SQL types outside the supported set
/// (arrays, geometric types, user-defined enums, ...). The caller reports
/// the failure per planned file; unrelated files still render.
pub fn map_column(column: &ColumnDescriptor) -> Result<FieldType, UnsupportedType> {
    let ty = match column.sql_type.as_str() {
        "int2" | "smallint" | "int4" | "integer" | "serial" | "smallserial" => FieldType::Integer,
        "int8" | "bigint" | "bigserial" => FieldType::BigInt,
        "float4" | "float8" | "real" => FieldType::Float,
        "numeric" | "decimal" => FieldType::Numeric {
            precision: column.numeric_precision,
            scale: column.numeric_scale,
        },
        "bool" | "boolean" => FieldType::Boolean,
        "varchar" | "bpchar" => FieldType::Text {
            max_length: column.max_length,
        },
        "text" | "citext" => FieldType::Text { max_length: None },
        "uuid" => FieldType::Uuid,
        "timestamp" | "timestamptz" => FieldType::Timestamp,
        "date" => FieldType::Date,
        "time" | "timetz" => FieldType::Time,
        "json" | "jsonb" => FieldType::Json,
        "bytea" => FieldType::Binary,
        _ => {
            return Err(UnsupportedType {
                column: column.name.clone(),
                sql_type: column.sql_type.clone(),
            })
        }
    };
    Ok(ty)
}

impl FieldType {
    /// The TypeBox expression for this field in a generated schema file.
    pub fn typebox_expr(&self) -> String {
        match self {
            FieldType::Integer | FieldType::BigInt => "Type.Integer()".to_string(),
            FieldType::Float => "Type.Number()".to_string(),
            FieldType::Numeric { precision, scale } => {
                let pattern = decimal_pattern(*precision, *scale);
                format!("Type.String({{ format: 'decimal', pattern: '{pattern}' }})")
            }
            FieldType::Boolean => "Type.Boolean()".to_string(),
            FieldType::Text {
                max_length: Some(n),
            } => format!("Type.String({{ maxLength: {n} }})"),
            FieldType::Text { max_length: None } => "Type.String()".to_string(),
            FieldType::Uuid => "Type.String({ format: 'uuid' })".to_string(),
            FieldType::Timestamp => "Type.String({ format: 'date-time' })".to_string(),
            FieldType::Date => "Type.String({ format: 'date' })".to_string(),
            FieldType::Time => "Type.String({ format: 'time' })".to_string(),
            FieldType::Json => "Type.Object({}, { additionalProperties: true })".to_string(),
            FieldType::Binary => "Type.String({ contentEncoding: 'base64' })".to_string(),
        }
    }

    /// The TypeScript type used in generated component code.
    pub fn ts_type(&self) -> &'static str {
        match self {
            FieldType::Integer | FieldType::BigInt | FieldType::Float => "number",
            FieldType::Boolean => "boolean",
            FieldType::Json => "Record<string, unknown>",
            // Decimals stay strings end to end.
            _ => "string",
        }
    }

    /// The HTML input type for the generated reactive form.
    pub fn form_control(&self) -> &'static str {
        match self {
            FieldType::Integer | FieldType::BigInt | FieldType::Float => "number",
            FieldType::Boolean => "checkbox",
            FieldType::Timestamp => "datetime-local",
            FieldType::Date => "date",
            FieldType::Time => "time",
            _ => "text",
        }
    }
}

/// Build the digit-count regex for a decimal column.
///
/// `numeric(12,2)` allows up to 10 integer digits and up to 2 fractional
/// digits; an unconstrained `numeric` gets the open pattern.
fn decimal_pattern(precision: Option<u32>, scale: Option<u32>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) if s > 0 => {
            let int_digits = p.saturating_sub(s).max(1);
            format!("^-?\\\\d{{1,{int_digits}}}(\\\\.\\\\d{{1,{s}}})?$")
        }
        (Some(p), _) => {
            let p = p.max(1);
            format!("^-?\\\\d{{1,{p}}}$")
        }
        (None, _) => "^-?\\\\d+(\\\\.\\\\d+)?$".to_string(),
    }
}
