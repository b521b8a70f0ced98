use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use crate::classify::{classification_rules, DomainKind};
use crate::config::GeneratorConfig;
use crate::generator::{
    run_generation, GenerateOptions, GenerateRequest, PackageTier, Target, WriteMode,
};
use crate::introspect::{JsonSchemaSource, PgSchemaSource, SchemaSource};

/// Command-line interface for crudgen
///
/// Generates CRUD feature modules (backend and frontend) from PostgreSQL
/// tables.
#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Generate CRUD feature modules from PostgreSQL tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a feature module for a table
    Generate {
        /// Table to generate from
        table: String,

        /// Database schema containing the table
        #[arg(long, default_value = "public")]
        schema: String,

        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Read the table descriptor from a file saved by `inspect` instead
        /// of a live database
        #[arg(long, value_name = "FILE")]
        from_json: Option<PathBuf>,

        /// Domain (and optionally subdomain) for output paths, e.g.
        /// `inventory` or `inventory/master-data`. A subdomain here skips
        /// classification.
        #[arg(long)]
        domain: Option<String>,

        /// Artifact tier to emit
        #[arg(long, value_enum, default_value_t = PackageArg::Standard)]
        package: PackageArg,

        /// Which side of the project tree to generate
        #[arg(long, value_enum, default_value_t = TargetArg::All)]
        target: TargetArg,

        /// Emit the CSV import service regardless of tier
        #[arg(long, default_value_t = false)]
        with_import: bool,

        /// Emit the events publisher regardless of tier
        #[arg(long, default_value_t = false)]
        with_events: bool,

        /// Root of the target project tree
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Report planned changes without writing anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Fail instead of warning on a low-confidence classification
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Introspect a table and dump its descriptor as JSON
    Inspect {
        /// Table to introspect
        table: String,

        /// Database schema containing the table
        #[arg(long, default_value = "public")]
        schema: String,

        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Write the descriptor to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Explain how a table would be classified
    Classify {
        /// Table to classify
        table: String,

        /// Database schema containing the table
        #[arg(long, default_value = "public")]
        schema: String,

        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Read the table descriptor from a file saved by `inspect`
        #[arg(long, value_name = "FILE")]
        from_json: Option<PathBuf>,

        /// Domain (and optionally subdomain), as for `generate`
        #[arg(long)]
        domain: Option<String>,

        /// Fail instead of warning on a low-confidence classification
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

/// `--package` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PackageArg {
    Standard,
    Enterprise,
    Full,
}

impl From<PackageArg> for PackageTier {
    fn from(arg: PackageArg) -> Self {
        match arg {
            PackageArg::Standard => PackageTier::Standard,
            PackageArg::Enterprise => PackageTier::Enterprise,
            PackageArg::Full => PackageTier::Full,
        }
    }
}

/// `--target` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Backend,
    Frontend,
    All,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Backend => Target::Backend,
            TargetArg::Frontend => Target::Frontend,
            TargetArg::All => Target::All,
        }
    }
}

/// Execute the CLI command provided by the user.
///
/// # Errors
///
/// Returns an error (and a non-zero exit) when introspection fails, the
/// classification is unresolvable, any file fails to render or write, or a
/// default-mode run skips every planned file.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            table,
            schema,
            database_url,
            from_json,
            domain,
            package,
            target,
            with_import,
            with_events,
            output,
            force,
            dry_run,
            strict,
        } => {
            let mut source = open_source(from_json.as_deref(), database_url.as_deref())?;
            let (domain_name, kind_override) = parse_domain(domain.as_deref())?;
            let config = GeneratorConfig::from_env();
            let request = GenerateRequest {
                schema,
                table,
                domain: domain_name,
                kind_override,
                strict,
                options: GenerateOptions {
                    package: package.into(),
                    target: target.into(),
                    with_import,
                    with_events,
                    output_root: output,
                },
                mode: WriteMode::from_flags(force, dry_run),
            };
            run_generation(source.as_mut(), &config, &request)?;
            Ok(())
        }
        Commands::Inspect {
            table,
            schema,
            database_url,
            out,
        } => {
            let mut source = open_source(None, database_url.as_deref())?;
            let descriptor = source.table(&schema, &table)?;
            let json = serde_json::to_string_pretty(&descriptor)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("✅ Wrote descriptor for {} → {}", descriptor.qualified_name(), path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Classify {
            table,
            schema,
            database_url,
            from_json,
            domain,
            strict,
        } => {
            let mut source = open_source(from_json.as_deref(), database_url.as_deref())?;
            let descriptor = source.table(&schema, &table)?;
            let (domain_name, kind_override) = parse_domain(domain.as_deref())?;
            let config = GeneratorConfig::from_env();

            for rule in classification_rules() {
                match (rule.apply)(&descriptor) {
                    Some(m) => println!("  {} → {} ({}): {}", rule.tag, m.kind, m.confidence, m.reasoning),
                    None => println!("  {} → no match", rule.tag),
                }
            }

            let classification = match kind_override {
                Some(kind) => crate::classify::DomainClassification::explicit(
                    domain_name.as_deref().unwrap_or("core"),
                    kind,
                ),
                None => crate::classify::classify(
                    &descriptor,
                    domain_name
                        .as_deref()
                        .or(config.default_domain.as_deref())
                        .unwrap_or("core"),
                    config.fallback_kind,
                    strict,
                )?,
            };
            println!(
                "📋 {} → {}/{} (rule {}, confidence {})",
                descriptor.qualified_name(),
                classification.domain,
                classification.subdomain(),
                classification.rule,
                classification.confidence,
            );
            Ok(())
        }
    }
}

/// Pick the schema source: a descriptor file when `--from-json` is given,
/// otherwise a live connection.
fn open_source(
    from_json: Option<&Path>,
    database_url: Option<&str>,
) -> anyhow::Result<Box<dyn SchemaSource>> {
    if let Some(path) = from_json {
        let source = JsonSchemaSource::open(path)
            .with_context(|| format!("failed to load descriptor {}", path.display()))?;
        return Ok(Box::new(source));
    }
    let url = database_url
        .ok_or_else(|| anyhow::anyhow!("provide --database-url (or DATABASE_URL) or --from-json"))?;
    let source = PgSchemaSource::connect(url).context("failed to connect to the database")?;
    Ok(Box::new(source))
}

/// Split `--domain inventory/master-data` into its parts.
///
/// Accepts a bare domain (`inventory`), a bare subdomain (`master-data`),
/// or both. An explicit subdomain bypasses the classifier.
pub(crate) fn parse_domain(
    raw: Option<&str>,
) -> anyhow::Result<(Option<String>, Option<DomainKind>)> {
    let Some(raw) = raw else {
        return Ok((None, None));
    };
    let raw = raw.trim().trim_matches('/');
    if raw.is_empty() {
        anyhow::bail!("--domain must not be empty");
    }
    if let Some((domain, subdomain)) = raw.split_once('/') {
        let kind = DomainKind::parse(subdomain).ok_or_else(|| {
            anyhow::anyhow!("unknown subdomain {subdomain:?}; expected master-data or operations")
        })?;
        if domain.is_empty() {
            return Ok((None, Some(kind)));
        }
        return Ok((Some(domain.to_string()), Some(kind)));
    }
    if let Some(kind) = DomainKind::parse(raw) {
        return Ok((None, Some(kind)));
    }
    Ok((Some(raw.to_string()), None))
}
