use askama::Template;
use thiserror::Error;

use super::plan::{FilePlan, GenerationPlan, TemplateId};
use super::type_map::{map_column, FieldType, UnsupportedType};
use crate::introspect::TableDescriptor;
use crate::naming;

/// Columns owned by the persistence layer, excluded from create/update
/// payloads and from generated forms.
const AUDIT_COLUMNS: &[&str] = &["created_at", "updated_at", "created_by", "updated_by"];

/// A rendering failure for one planned file.
///
/// Other files in the same plan are still attempted; the run report carries
/// each failure individually.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A column's SQL type has no schema mapping.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedType),
    /// The template engine itself failed.
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Outcome of rendering one planned file.
#[derive(Debug)]
pub struct RenderResult {
    pub plan: FilePlan,
    pub outcome: Result<String, RenderError>,
}

/// One field of the generated validation schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// camelCase property name
    pub prop: String,
    /// Raw column name
    pub column: String,
    /// Full TypeBox expression
    pub typebox: String,
    /// Nullable column → optional in the entity schema
    pub optional_in_entity: bool,
    /// Present in the create schema (not a key or audit column)
    pub in_create: bool,
    /// NOT NULL without default → required on create
    pub required_in_create: bool,
    /// Present in the update schema
    pub in_update: bool,
}

/// One column shown by the generated list component.
#[derive(Debug, Clone)]
pub struct ListColumn {
    pub prop: String,
    pub label: String,
}

/// One control of the generated reactive form.
#[derive(Debug, Clone)]
pub struct FormControlSpec {
    pub prop: String,
    pub label: String,
    /// HTML input type
    pub control: &'static str,
    /// Initial value expression (`null`, `false`)
    pub initial: &'static str,
    /// Comma-joined Angular validators, empty when none apply
    pub validators: String,
    pub has_validators: bool,
}

/// One mapped column of the generated CSV import service.
#[derive(Debug, Clone)]
pub struct ImportField {
    pub prop: String,
    pub column: String,
}

#[derive(Template)]
#[template(path = "schema.ts.txt", escape = "none")]
struct SchemaTemplate {
    entity: String,
    table: String,
    fields: Vec<SchemaField>,
}

#[derive(Template)]
#[template(path = "routes.ts.txt", escape = "none")]
struct RoutesTemplate {
    entity: String,
    entity_var: String,
    slug: String,
}

#[derive(Template)]
#[template(path = "controller.ts.txt", escape = "none")]
struct ControllerTemplate {
    entity: String,
    slug: String,
}

#[derive(Template)]
#[template(path = "service.ts.txt", escape = "none")]
struct ServiceTemplate {
    entity: String,
    slug: String,
    with_events: bool,
}

#[derive(Template)]
#[template(path = "repository.ts.txt", escape = "none")]
struct RepositoryTemplate {
    entity: String,
    slug: String,
    qualified_table: String,
    pk: String,
    search_columns: Vec<String>,
}

#[derive(Template)]
#[template(path = "import.service.ts.txt", escape = "none")]
struct ImportServiceTemplate {
    entity: String,
    slug: String,
    fields: Vec<ImportField>,
}

#[derive(Template)]
#[template(path = "events.ts.txt", escape = "none")]
struct EventsTemplate {
    entity: String,
    slug: String,
    table: String,
}

#[derive(Template)]
#[template(path = "list.component.ts.txt", escape = "none")]
struct ListComponentTemplate {
    entity: String,
    slug: String,
    selector: String,
    title: String,
    columns: Vec<ListColumn>,
}

#[derive(Template)]
#[template(path = "form.component.ts.txt", escape = "none")]
struct FormComponentTemplate {
    entity: String,
    slug: String,
    selector: String,
    title: String,
    controls: Vec<FormControlSpec>,
}

/// Render every file in the plan.
///
/// Each file renders independently; a type-mapping failure in the schema
/// does not stop the routes file from rendering. Results come back in plan
/// order.
pub fn render_plan(plan: &GenerationPlan) -> Vec<RenderResult> {
    plan.files
        .iter()
        .map(|fp| RenderResult {
            plan: fp.clone(),
            outcome: render_file(plan, fp.template),
        })
        .collect()
}

fn render_file(plan: &GenerationPlan, id: TemplateId) -> Result<String, RenderError> {
    let table = &plan.table;
    let names = Names::of(table);
    let contents = match id {
        TemplateId::Schema => SchemaTemplate {
            entity: names.entity,
            table: table.table_name.clone(),
            fields: schema_fields(table)?,
        }
        .render()?,
        TemplateId::Routes => RoutesTemplate {
            entity: names.entity,
            entity_var: names.entity_var,
            slug: names.slug,
        }
        .render()?,
        TemplateId::Controller => ControllerTemplate {
            entity: names.entity,
            slug: names.slug,
        }
        .render()?,
        TemplateId::Service => ServiceTemplate {
            entity: names.entity,
            slug: names.slug,
            with_events: plan.options.events_enabled(),
        }
        .render()?,
        TemplateId::Repository => RepositoryTemplate {
            entity: names.entity,
            slug: names.slug,
            qualified_table: table.qualified_name(),
            pk: primary_key_column(table),
            search_columns: search_columns(table),
        }
        .render()?,
        TemplateId::ImportService => ImportServiceTemplate {
            entity: names.entity,
            slug: names.slug,
            fields: import_fields(table)?,
        }
        .render()?,
        TemplateId::Events => EventsTemplate {
            entity: names.entity,
            slug: names.slug,
            table: table.table_name.clone(),
        }
        .render()?,
        TemplateId::ListComponent => ListComponentTemplate {
            entity: names.entity,
            selector: format!("app-{}-list", names.slug),
            title: naming::to_title_case(&table.table_name),
            columns: list_columns(table)?,
            slug: names.slug,
        }
        .render()?,
        TemplateId::FormComponent => FormComponentTemplate {
            entity: names.entity,
            selector: format!("app-{}-form", names.slug),
            title: format!(
                "{} Form",
                naming::to_title_case(&naming::singularize(&table.table_name))
            ),
            controls: form_controls(table)?,
            slug: names.slug,
        }
        .render()?,
    };
    Ok(contents)
}

struct Names {
    entity: String,
    entity_var: String,
    slug: String,
}

impl Names {
    fn of(table: &TableDescriptor) -> Self {
        let singular = naming::singularize(&table.table_name);
        Names {
            entity: naming::to_pascal_case(&singular),
            entity_var: naming::ts_safe_ident(&naming::to_camel_case(&singular)),
            slug: naming::to_kebab_case(&table.table_name),
        }
    }
}

fn is_audit_column(name: &str) -> bool {
    AUDIT_COLUMNS.contains(&name)
}

/// Build the full field mapping for the schema template.
///
/// One entry per column, so the generated entity schema is complete by
/// construction; create/update membership follows key position,
/// nullability, and defaults.
fn schema_fields(table: &TableDescriptor) -> Result<Vec<SchemaField>, RenderError> {
    table
        .columns
        .iter()
        .map(|c| {
            let ty = map_column(c)?;
            let in_create = !table.is_primary_key(&c.name) && !is_audit_column(&c.name);
            Ok(SchemaField {
                prop: naming::to_camel_case(&c.name),
                column: c.name.clone(),
                typebox: ty.typebox_expr(),
                optional_in_entity: c.nullable,
                in_create,
                required_in_create: in_create && !c.nullable && !c.has_default,
                in_update: in_create,
            })
        })
        .collect()
}

fn list_columns(table: &TableDescriptor) -> Result<Vec<ListColumn>, RenderError> {
    let mut columns = Vec::new();
    for c in &table.columns {
        let ty = map_column(c)?;
        if table.is_primary_key(&c.name) || matches!(ty, FieldType::Binary | FieldType::Json) {
            continue;
        }
        columns.push(ListColumn {
            prop: naming::to_camel_case(&c.name),
            label: naming::to_title_case(&c.name),
        });
    }
    Ok(columns)
}

fn form_controls(table: &TableDescriptor) -> Result<Vec<FormControlSpec>, RenderError> {
    let mut controls = Vec::new();
    for c in &table.columns {
        let ty = map_column(c)?;
        if table.is_primary_key(&c.name) || is_audit_column(&c.name) {
            continue;
        }
        if matches!(ty, FieldType::Binary | FieldType::Json) {
            continue;
        }
        let mut validators = Vec::new();
        if !c.nullable && !c.has_default {
            validators.push("Validators.required".to_string());
        }
        if let FieldType::Text {
            max_length: Some(n),
        } = ty
        {
            validators.push(format!("Validators.maxLength({n})"));
        }
        let initial = if matches!(ty, FieldType::Boolean) {
            "false"
        } else {
            "null"
        };
        controls.push(FormControlSpec {
            prop: naming::to_camel_case(&c.name),
            label: naming::to_title_case(&c.name),
            control: ty.form_control(),
            initial,
            has_validators: !validators.is_empty(),
            validators: validators.join(", "),
        });
    }
    Ok(controls)
}

fn import_fields(table: &TableDescriptor) -> Result<Vec<ImportField>, RenderError> {
    let mut fields = Vec::new();
    for c in &table.columns {
        // The import surface accepts the same columns a create payload does.
        map_column(c)?;
        if table.is_primary_key(&c.name) || is_audit_column(&c.name) {
            continue;
        }
        fields.push(ImportField {
            prop: naming::to_camel_case(&c.name),
            column: c.name.clone(),
        });
    }
    Ok(fields)
}

fn primary_key_column(table: &TableDescriptor) -> String {
    table
        .primary_key
        .first()
        .cloned()
        .unwrap_or_else(|| "id".to_string())
}

/// Text columns the generated repository searches with ILIKE.
///
/// Columns whose types have no mapping simply aren't searchable; they do
/// not fail this template.
fn search_columns(table: &TableDescriptor) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|c| matches!(map_column(c), Ok(FieldType::Text { .. })))
        .map(|c| c.name.clone())
        .collect()
}
