#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use crudgen::classify::ClassifyError;
use crudgen::config::GeneratorConfig;
use crudgen::generator::{
    run_generation, FileOutcome, GenerateError, GenerateOptions, GenerateRequest, PackageTier,
    Target, WriteMode,
};
use crudgen::introspect::{
    ColumnDescriptor, IntrospectError, JsonSchemaSource, SchemaSource, TableDescriptor,
};

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

fn request(table: &str, root: &Path, mode: WriteMode) -> GenerateRequest {
    GenerateRequest {
        schema: "public".to_string(),
        table: table.to_string(),
        domain: Some("inventory".to_string()),
        kind_override: None,
        strict: false,
        options: GenerateOptions {
            package: PackageTier::Standard,
            target: Target::All,
            with_import: false,
            with_events: false,
            output_root: root.to_path_buf(),
        },
        mode,
    }
}

fn file_count(root: &Path) -> usize {
    if !root.exists() {
        return 0;
    }
    let mut count = 0;
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_generates_standard_module_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = JsonSchemaSource::from_descriptor(departments());
    let config = GeneratorConfig::default();

    let outcome = run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Skip),
    )
    .unwrap();

    assert_eq!(outcome.classification.subdomain(), "master-data");
    assert_eq!(outcome.report.written(), 7);

    let module = dir
        .path()
        .join("apps/api/src/modules/inventory/master-data/departments");
    for name in [
        "departments.schema.ts",
        "departments.routes.ts",
        "departments.controller.ts",
        "departments.service.ts",
        "departments.repository.ts",
    ] {
        assert!(module.join(name).exists(), "missing {name}");
    }
    let feature = dir.path().join("apps/web/src/app/features/inventory/departments");
    assert!(feature.join("departments-list.component.ts").exists());
    assert!(feature.join("departments-form.component.ts").exists());

    let schema = fs::read_to_string(module.join("departments.schema.ts")).unwrap();
    assert!(schema.contains("export const DepartmentSchema"));
    assert!(schema.contains("export const DepartmentCreateSchema"));
}

#[test]
fn test_dry_run_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = JsonSchemaSource::from_descriptor(departments());
    let config = GeneratorConfig::default();

    let outcome = run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::DryRun),
    )
    .unwrap();

    assert_eq!(outcome.report.planned(), 7);
    assert_eq!(file_count(dir.path()), 0);
}

#[test]
fn test_rerun_without_force_skips_everything_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();

    let mut source = JsonSchemaSource::from_descriptor(departments());
    run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Skip),
    )
    .unwrap();

    // Developer customizes one file, then reruns without --force.
    let module = dir
        .path()
        .join("apps/api/src/modules/inventory/master-data/departments");
    fs::write(module.join("departments.service.ts"), "// customized\n").unwrap();

    let mut source = JsonSchemaSource::from_descriptor(departments());
    let err = run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Skip),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::NothingWritten { skipped: 7 }));

    // The customization survives the skip.
    let service = fs::read_to_string(module.join("departments.service.ts")).unwrap();
    assert_eq!(service, "// customized\n");
}

#[test]
fn test_force_reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();

    let mut source = JsonSchemaSource::from_descriptor(departments());
    run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Overwrite),
    )
    .unwrap();

    let snapshot: Vec<(std::path::PathBuf, String)> = {
        let module = dir
            .path()
            .join("apps/api/src/modules/inventory/master-data/departments");
        fs::read_dir(&module)
            .unwrap()
            .map(|e| {
                let path = e.unwrap().path();
                let contents = fs::read_to_string(&path).unwrap();
                (path, contents)
            })
            .collect()
    };

    let mut source = JsonSchemaSource::from_descriptor(departments());
    run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Overwrite),
    )
    .unwrap();

    for (path, before) in snapshot {
        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(before, after, "changed on rerun: {}", path.display());
    }
}

/// A source standing in for a database that has no such table.
struct EmptyDatabase;

impl SchemaSource for EmptyDatabase {
    fn table(&mut self, schema: &str, table: &str) -> Result<TableDescriptor, IntrospectError> {
        Err(IntrospectError::TableNotFound {
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }
}

#[test]
fn test_missing_table_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();
    let mut source = EmptyDatabase;

    let err = run_generation(
        &mut source,
        &config,
        &request("ghost_table", dir.path(), WriteMode::Skip),
    )
    .unwrap_err();

    match err {
        GenerateError::Introspect(IntrospectError::TableNotFound { table, .. }) => {
            assert_eq!(table, "ghost_table");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(file_count(dir.path()), 0);
}

fn budgets() -> TableDescriptor {
    TableDescriptor {
        schema_name: "public".to_string(),
        table_name: "budgets".to_string(),
        columns: vec![
            column("id", "uuid", false, true),
            column("fiscal_year", "int4", false, false),
            column("allocated_amount", "numeric", false, false),
            column("is_active", "bool", false, true),
        ],
        primary_key: vec!["id".to_string()],
        foreign_keys: vec![],
        unique_constraints: vec![],
    }
}

#[test]
fn test_unclassifiable_table_without_fallback_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();
    let mut source = JsonSchemaSource::from_descriptor(budgets());

    let err = run_generation(
        &mut source,
        &config,
        &request("budgets", dir.path(), WriteMode::Skip),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Classify(ClassifyError::Unresolved { .. })
    ));
    assert_eq!(file_count(dir.path()), 0);
}

#[test]
fn test_render_failure_is_partial_not_total() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();

    let mut table = departments();
    table
        .columns
        .push(column("location", "point", true, false));
    let mut source = JsonSchemaSource::from_descriptor(table);

    let err = run_generation(
        &mut source,
        &config,
        &request("departments", dir.path(), WriteMode::Skip),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::RenderFailed { .. }));

    // Independent files were still attempted and written.
    let module = dir
        .path()
        .join("apps/api/src/modules/inventory/master-data/departments");
    assert!(module.join("departments.routes.ts").exists());
    assert!(module.join("departments.repository.ts").exists());
    assert!(!module.join("departments.schema.ts").exists());
}

#[test]
fn test_full_package_emits_import_and_events() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default();
    let mut source = JsonSchemaSource::from_descriptor(departments());

    let mut req = request("departments", dir.path(), WriteMode::Skip);
    req.options.package = PackageTier::Full;
    let outcome = run_generation(&mut source, &config, &req).unwrap();
    assert_eq!(outcome.report.written(), 9);
    assert!(outcome
        .report
        .entries
        .iter()
        .all(|(_, o)| *o == FileOutcome::Written));

    let module = dir
        .path()
        .join("apps/api/src/modules/inventory/master-data/departments");
    assert!(module.join("departments.import.ts").exists());
    assert!(module.join("departments.events.ts").exists());

    let service = fs::read_to_string(module.join("departments.service.ts")).unwrap();
    assert!(service.contains("DepartmentEvents"));
}
