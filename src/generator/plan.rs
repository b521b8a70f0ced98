use std::path::{Path, PathBuf};

use crate::classify::DomainClassification;
use crate::introspect::TableDescriptor;
use crate::naming;

/// The artifact types the generator knows how to emit.
///
/// One template per id; the ordering here is the ordering of the plan and
/// of every report, so runs are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Schema,
    Routes,
    Controller,
    Service,
    Repository,
    ImportService,
    Events,
    ListComponent,
    FormComponent,
}

impl TemplateId {
    /// Short label used in progress output.
    pub fn describe(self) -> &'static str {
        match self {
            TemplateId::Schema => "validation schema",
            TemplateId::Routes => "routes",
            TemplateId::Controller => "controller",
            TemplateId::Service => "service",
            TemplateId::Repository => "repository",
            TemplateId::ImportService => "import service",
            TemplateId::Events => "events publisher",
            TemplateId::ListComponent => "list component",
            TemplateId::FormComponent => "form component",
        }
    }

    /// Whether this artifact belongs to the backend tree.
    pub fn is_backend(self) -> bool {
        !matches!(self, TemplateId::ListComponent | TemplateId::FormComponent)
    }
}

/// Which tier of artifacts to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PackageTier {
    /// Schema, routes, controller, service, repository (+ components)
    Standard,
    /// Standard plus the CSV import service
    Enterprise,
    /// Enterprise plus the events publisher
    Full,
}

/// Which side of the project tree to generate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Backend,
    Frontend,
    All,
}

impl Target {
    fn includes_backend(self) -> bool {
        matches!(self, Target::Backend | Target::All)
    }

    fn includes_frontend(self) -> bool {
        matches!(self, Target::Frontend | Target::All)
    }
}

/// Caller-facing knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub package: PackageTier,
    pub target: Target,
    /// Emit the import service regardless of tier
    pub with_import: bool,
    /// Emit the events publisher regardless of tier
    pub with_events: bool,
    /// Root of the target project tree
    pub output_root: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            package: PackageTier::Standard,
            target: Target::All,
            with_import: false,
            with_events: false,
            output_root: PathBuf::from("."),
        }
    }
}

impl GenerateOptions {
    /// Whether the import service is part of this run.
    pub fn import_enabled(&self) -> bool {
        self.with_import || self.package >= PackageTier::Enterprise
    }

    /// Whether the events publisher is part of this run.
    pub fn events_enabled(&self) -> bool {
        self.with_events || self.package == PackageTier::Full
    }
}

/// A single planned output file: which template, where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub template: TemplateId,
    pub destination: PathBuf,
}

/// Everything one invocation will generate.
///
/// The plan is the unit of idempotency: identical inputs always build an
/// identical plan, and the writer consumes it in order.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub table: TableDescriptor,
    pub classification: DomainClassification,
    pub options: GenerateOptions,
    pub files: Vec<FilePlan>,
}

/// Build the generation plan for one table.
pub fn build_plan(
    table: TableDescriptor,
    classification: DomainClassification,
    options: GenerateOptions,
) -> GenerationPlan {
    let slug = naming::to_kebab_case(&table.table_name);
    let backend_dir = options
        .output_root
        .join("apps/api/src/modules")
        .join(&classification.domain)
        .join(classification.subdomain())
        .join(&slug);
    let frontend_dir = options
        .output_root
        .join("apps/web/src/app/features")
        .join(&classification.domain)
        .join(&slug);

    let mut files = Vec::new();
    if options.target.includes_backend() {
        files.push(backend_file(&backend_dir, &slug, "schema", TemplateId::Schema));
        files.push(backend_file(&backend_dir, &slug, "routes", TemplateId::Routes));
        files.push(backend_file(
            &backend_dir,
            &slug,
            "controller",
            TemplateId::Controller,
        ));
        files.push(backend_file(&backend_dir, &slug, "service", TemplateId::Service));
        files.push(backend_file(
            &backend_dir,
            &slug,
            "repository",
            TemplateId::Repository,
        ));
        if options.import_enabled() {
            files.push(backend_file(
                &backend_dir,
                &slug,
                "import",
                TemplateId::ImportService,
            ));
        }
        if options.events_enabled() {
            files.push(backend_file(&backend_dir, &slug, "events", TemplateId::Events));
        }
    }
    if options.target.includes_frontend() {
        files.push(FilePlan {
            template: TemplateId::ListComponent,
            destination: frontend_dir.join(format!("{slug}-list.component.ts")),
        });
        files.push(FilePlan {
            template: TemplateId::FormComponent,
            destination: frontend_dir.join(format!("{slug}-form.component.ts")),
        });
    }

    GenerationPlan {
        table,
        classification,
        options,
        files,
    }
}

fn backend_file(dir: &Path, slug: &str, kind: &str, template: TemplateId) -> FilePlan {
    FilePlan {
        template,
        destination: dir.join(format!("{slug}.{kind}.ts")),
    }
}
