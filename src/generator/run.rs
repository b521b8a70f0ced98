use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use super::plan::{build_plan, GenerateOptions, GenerationPlan};
use super::templates::render_plan;
use super::writer::{write_rendered, WriteMode, WriteReport};
use crate::classify::{classify, ClassifyError, Confidence, DomainClassification, DomainKind};
use crate::config::GeneratorConfig;
use crate::introspect::{IntrospectError, SchemaSource};

/// One `generate` invocation: the table, how to classify it, and how to
/// write the output.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub schema: String,
    pub table: String,
    /// Domain path segment from `--domain` (the part before the slash)
    pub domain: Option<String>,
    /// Subdomain forced by `--domain <domain>/<subdomain>`
    pub kind_override: Option<DomainKind>,
    pub strict: bool,
    pub options: GenerateOptions,
    pub mode: WriteMode,
}

/// Why a generation run failed. The summary has already been printed by the
/// time one of these is returned; the CLI turns them into a non-zero exit.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Introspect(#[from] IntrospectError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("aborted after write failure on {path}: {message}")]
    WriteAborted { path: PathBuf, message: String },
    #[error("{failed} of {planned} files failed to render")]
    RenderFailed { failed: usize, planned: usize },
    #[error("nothing written: all {skipped} planned files already exist (use --force to overwrite)")]
    NothingWritten { skipped: usize },
}

/// The record of a completed (or partially completed) run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub classification: DomainClassification,
    pub report: WriteReport,
}

/// Run the full pipeline for one table: introspect, classify, plan, render,
/// write, summarize.
///
/// Always ends with a printed summary. Render failures are reported per
/// file and the remaining files are still attempted; a write failure aborts
/// the remainder and reports the partial state.
///
/// # Errors
///
/// See [`GenerateError`]; each maps to a non-zero exit in the CLI.
pub fn run_generation(
    source: &mut dyn SchemaSource,
    config: &GeneratorConfig,
    request: &GenerateRequest,
) -> Result<GenerationOutcome, GenerateError> {
    let table = source.table(&request.schema, &request.table)?;
    info!(
        table = %table.qualified_name(),
        columns = table.columns.len(),
        "introspected table"
    );

    let domain = request
        .domain
        .clone()
        .or_else(|| config.default_domain.clone())
        .unwrap_or_else(|| "core".to_string());

    let classification = match request.kind_override {
        Some(kind) => DomainClassification::explicit(&domain, kind),
        None => classify(&table, &domain, config.fallback_kind, request.strict)?,
    };
    println!(
        "📋 Classified {} as {}/{} (rule {}, confidence {})",
        table.qualified_name(),
        classification.domain,
        classification.subdomain(),
        classification.rule,
        classification.confidence,
    );
    if classification.confidence == Confidence::Low {
        println!("⚠️  Low-confidence classification: {}", classification.reasoning);
        warn!(
            table = %table.qualified_name(),
            reasoning = %classification.reasoning,
            "low-confidence classification"
        );
    }

    let plan = build_plan(table, classification.clone(), request.options.clone());
    info!(files = plan.files.len(), "generation plan built");

    let report = execute_plan(&plan, request.mode);
    report.print_summary(request.mode);

    if let Some((path, message)) = report.write_failure() {
        return Err(GenerateError::WriteAborted {
            path: path.to_path_buf(),
            message: message.to_string(),
        });
    }
    if report.failed() > 0 {
        return Err(GenerateError::RenderFailed {
            failed: report.failed(),
            planned: report.planned(),
        });
    }
    if request.mode != WriteMode::DryRun && report.nothing_written() {
        return Err(GenerateError::NothingWritten {
            skipped: report.skipped(),
        });
    }
    Ok(GenerationOutcome {
        classification,
        report,
    })
}

/// Render and write an already-built plan.
///
/// Split out so tests (and future callers with their own planning) can
/// drive the render/write half directly.
pub fn execute_plan(plan: &GenerationPlan, mode: WriteMode) -> WriteReport {
    write_rendered(render_plan(plan), mode)
}
