#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::classify::{DomainClassification, DomainKind};
use crate::introspect::{ColumnDescriptor, TableDescriptor};
use std::path::PathBuf;

fn column(name: &str, sql_type: &str, nullable: bool, has_default: bool) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        sql_type: sql_type.to_string(),
        data_type: sql_type.to_string(),
        nullable,
        has_default,
        default_expr: has_default.then(|| "default".to_string()),
        max_length: None,
        numeric_precision: None,
        numeric_scale: None,
        ordinal: 0,
    }
}

fn departments() -> TableDescriptor {
    let mut dept_code = column("dept_code", "varchar", false, false);
    dept_code.max_length = Some(10);
    let mut dept_name = column("dept_name", "varchar", false, false);
    dept_name.max_length = Some(100);
    TableDescriptor {
        schema_name: "public".to_string(),
        table_name: "departments".to_string(),
        columns: vec![
            column("id", "uuid", false, true),
            dept_code,
            dept_name,
            column("is_active", "bool", false, true),
            column("created_at", "timestamp", false, true),
        ],
        primary_key: vec!["id".to_string()],
        foreign_keys: vec![],
        unique_constraints: vec![],
    }
}

fn master_data(domain: &str) -> DomainClassification {
    DomainClassification::explicit(domain, DomainKind::MasterData)
}

fn plan_with(options: GenerateOptions) -> GenerationPlan {
    build_plan(departments(), master_data("inventory"), options)
}

fn template_ids(plan: &GenerationPlan) -> Vec<TemplateId> {
    plan.files.iter().map(|f| f.template).collect()
}

#[test]
fn test_standard_plan_layout() {
    let plan = plan_with(GenerateOptions::default());
    assert_eq!(
        template_ids(&plan),
        vec![
            TemplateId::Schema,
            TemplateId::Routes,
            TemplateId::Controller,
            TemplateId::Service,
            TemplateId::Repository,
            TemplateId::ListComponent,
            TemplateId::FormComponent,
        ]
    );
    let schema_path = &plan.files[0].destination;
    assert_eq!(
        schema_path,
        &PathBuf::from("./apps/api/src/modules/inventory/master-data/departments/departments.schema.ts")
    );
    let list_path = &plan.files[5].destination;
    assert_eq!(
        list_path,
        &PathBuf::from("./apps/web/src/app/features/inventory/departments/departments-list.component.ts")
    );
}

#[test]
fn test_tiers_add_extras_in_order() {
    let enterprise = plan_with(GenerateOptions {
        package: PackageTier::Enterprise,
        ..GenerateOptions::default()
    });
    assert!(template_ids(&enterprise).contains(&TemplateId::ImportService));
    assert!(!template_ids(&enterprise).contains(&TemplateId::Events));

    let full = plan_with(GenerateOptions {
        package: PackageTier::Full,
        ..GenerateOptions::default()
    });
    assert!(template_ids(&full).contains(&TemplateId::ImportService));
    assert!(template_ids(&full).contains(&TemplateId::Events));
}

#[test]
fn test_flags_force_extras() {
    let plan = plan_with(GenerateOptions {
        with_events: true,
        ..GenerateOptions::default()
    });
    assert!(template_ids(&plan).contains(&TemplateId::Events));
    assert!(!template_ids(&plan).contains(&TemplateId::ImportService));
}

#[test]
fn test_target_filters_sides() {
    let backend = plan_with(GenerateOptions {
        target: Target::Backend,
        ..GenerateOptions::default()
    });
    assert!(template_ids(&backend).iter().all(|t| t.is_backend()));

    let frontend = plan_with(GenerateOptions {
        target: Target::Frontend,
        ..GenerateOptions::default()
    });
    assert_eq!(
        template_ids(&frontend),
        vec![TemplateId::ListComponent, TemplateId::FormComponent]
    );
}

#[test]
fn test_plan_is_deterministic() {
    let a = plan_with(GenerateOptions::default());
    let b = plan_with(GenerateOptions::default());
    assert_eq!(a.files, b.files);
}

fn rendered_contents(plan: &GenerationPlan, id: TemplateId) -> String {
    render_plan(plan)
        .into_iter()
        .find(|r| r.plan.template == id)
        .expect("template in plan")
        .outcome
        .expect("rendered")
}

#[test]
fn test_schema_has_field_per_column() {
    let plan = plan_with(GenerateOptions::default());
    let schema = rendered_contents(&plan, TemplateId::Schema);
    let entity_section = schema.split("CreateSchema").next().unwrap();
    for prop in ["id:", "deptCode:", "deptName:", "isActive:", "createdAt:"] {
        assert!(entity_section.contains(prop), "missing {prop} in:\n{entity_section}");
    }
}

#[test]
fn test_create_schema_requirements() {
    let plan = plan_with(GenerateOptions::default());
    let schema = rendered_contents(&plan, TemplateId::Schema);
    let create_section = schema
        .split("DepartmentCreateSchema")
        .nth(1)
        .unwrap()
        .split("DepartmentUpdateSchema")
        .next()
        .unwrap();

    // NOT NULL without default → required
    assert!(create_section.contains("deptCode: Type.String({ maxLength: 10 })"));
    assert!(create_section.contains("deptName: Type.String({ maxLength: 100 })"));
    assert!(!create_section.contains("deptCode: Type.Optional"));
    // Defaulted column → optional
    assert!(create_section.contains("isActive: Type.Optional(Type.Boolean())"));
    // Key and audit columns excluded entirely
    assert!(!create_section.contains("id:"));
    assert!(!create_section.contains("createdAt:"));
}

#[test]
fn test_update_schema_is_all_optional() {
    let plan = plan_with(GenerateOptions::default());
    let schema = rendered_contents(&plan, TemplateId::Schema);
    let update_section = schema
        .split("DepartmentUpdateSchema")
        .nth(1)
        .unwrap()
        .split("DepartmentQuerySchema")
        .next()
        .unwrap();
    assert!(update_section.contains("deptCode: Type.Optional"));
    assert!(update_section.contains("deptName: Type.Optional"));
    assert!(!update_section.contains("id:"));
}

#[test]
fn test_rendering_is_idempotent() {
    let plan = plan_with(GenerateOptions::default());
    let first: Vec<String> = render_plan(&plan)
        .into_iter()
        .map(|r| r.outcome.unwrap())
        .collect();
    let second: Vec<String> = render_plan(&plan)
        .into_iter()
        .map(|r| r.outcome.unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_entity_names_are_singular() {
    let plan = plan_with(GenerateOptions::default());
    let routes = rendered_contents(&plan, TemplateId::Routes);
    assert!(routes.contains("DepartmentController"));
    assert!(routes.contains("departmentRoutes"));
    assert!(routes.contains("'/departments'"));
}

#[test]
fn test_repository_searches_text_columns() {
    let plan = plan_with(GenerateOptions::default());
    let repository = rendered_contents(&plan, TemplateId::Repository);
    assert!(repository.contains("'public.departments'"));
    assert!(repository.contains("orWhereILike('dept_code'"));
    assert!(repository.contains("orWhereILike('dept_name'"));
    assert!(!repository.contains("orWhereILike('is_active'"));
    assert!(repository.contains(".orderBy('id')"));
}

#[test]
fn test_form_excludes_keys_and_audit_columns() {
    let plan = plan_with(GenerateOptions::default());
    let form = rendered_contents(&plan, TemplateId::FormComponent);
    assert!(form.contains("deptCode: [null, [Validators.required, Validators.maxLength(10)]]"));
    assert!(form.contains("isActive: [false]"));
    assert!(!form.contains("createdAt:"));
    assert!(!form.contains("id:"));
    assert!(form.contains("selector: 'app-departments-form'"));
}

#[test]
fn test_service_wires_events_only_when_enabled() {
    let plain = plan_with(GenerateOptions::default());
    let service = rendered_contents(&plain, TemplateId::Service);
    assert!(!service.contains("Events"));

    let with_events = plan_with(GenerateOptions {
        with_events: true,
        ..GenerateOptions::default()
    });
    let service = rendered_contents(&with_events, TemplateId::Service);
    assert!(service.contains("DepartmentEvents"));
    assert!(service.contains("publishCreated"));
}

#[test]
fn test_unsupported_column_fails_schema_but_not_routes() {
    let mut table = departments();
    table.columns.push(column("location", "point", true, false));
    let plan = build_plan(table, master_data("inventory"), GenerateOptions::default());
    let results = render_plan(&plan);

    let schema = results
        .iter()
        .find(|r| r.plan.template == TemplateId::Schema)
        .unwrap();
    assert!(schema.outcome.is_err());

    let routes = results
        .iter()
        .find(|r| r.plan.template == TemplateId::Routes)
        .unwrap();
    assert!(routes.outcome.is_ok());

    // The unsupported column is simply not searchable.
    let repository = results
        .iter()
        .find(|r| r.plan.template == TemplateId::Repository)
        .unwrap();
    assert!(repository.outcome.is_ok());
}

#[test]
fn test_numeric_column_keeps_decimal_constraint() {
    let mut table = departments();
    let mut price = column("monthly_budget", "numeric", true, false);
    price.numeric_precision = Some(12);
    price.numeric_scale = Some(2);
    table.columns.push(price);
    let plan = build_plan(table, master_data("budget"), GenerateOptions::default());
    let schema = rendered_contents(&plan, TemplateId::Schema);
    assert!(schema.contains("monthlyBudget: Type.Optional(Type.String({ format: 'decimal'"));
    assert!(!schema.contains("monthlyBudget: Type.Optional(Type.Number"));
}
