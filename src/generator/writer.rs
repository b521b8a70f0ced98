use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::templates::RenderResult;

/// How the writer treats the target file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Report planned changes, write nothing
    DryRun,
    /// Default: existing files are reported skips
    Skip,
    /// `--force`: overwrite unconditionally
    Overwrite,
}

impl WriteMode {
    /// Map the CLI flags onto a mode. `--dry-run` wins over `--force`.
    pub fn from_flags(force: bool, dry_run: bool) -> Self {
        if dry_run {
            WriteMode::DryRun
        } else if force {
            WriteMode::Overwrite
        } else {
            WriteMode::Skip
        }
    }
}

/// What happened to one planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Written to disk
    Written,
    /// Destination existed and mode was not `--force`
    Skipped,
    /// Dry run: would have been written
    Planned,
    /// Template rendering failed; nothing written for this file
    RenderFailed(String),
    /// I/O failure while writing; aborts the rest of the plan
    WriteFailed(String),
    /// Not attempted because an earlier write failed
    Pending,
}

/// Per-file outcomes for one run, in plan order.
///
/// The report is the user-visible record of the run; a run never ends
/// silently.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub entries: Vec<(PathBuf, FileOutcome)>,
}

impl WriteReport {
    pub fn planned(&self) -> usize {
        self.entries.len()
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written | FileOutcome::Planned))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(o, FileOutcome::RenderFailed(_) | FileOutcome::WriteFailed(_))
        })
    }

    pub fn pending(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Pending))
    }

    /// True when every planned file was a conflict skip.
    pub fn nothing_written(&self) -> bool {
        !self.entries.is_empty() && self.skipped() == self.entries.len()
    }

    /// The write failure that aborted the run, if one occurred.
    pub fn write_failure(&self) -> Option<(&Path, &str)> {
        self.entries.iter().find_map(|(path, outcome)| match outcome {
            FileOutcome::WriteFailed(msg) => Some((path.as_path(), msg.as_str())),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }

    /// Print the end-of-run summary line.
    pub fn print_summary(&self, mode: WriteMode) {
        match mode {
            WriteMode::DryRun => println!(
                "📊 Dry run summary: {} would be written, {} skipped, {} failed ({} planned)",
                self.written(),
                self.skipped(),
                self.failed(),
                self.planned()
            ),
            _ => {
                let pending = self.pending();
                if pending > 0 {
                    println!(
                        "📊 Generation summary: {} written, {} skipped, {} failed, {} pending ({} planned)",
                        self.written(),
                        self.skipped(),
                        self.failed(),
                        pending,
                        self.planned()
                    );
                } else {
                    println!(
                        "📊 Generation summary: {} written, {} skipped, {} failed ({} planned)",
                        self.written(),
                        self.skipped(),
                        self.failed(),
                        self.planned()
                    );
                }
            }
        }
    }
}

/// Write rendered files according to `mode`, in plan order.
///
/// Render failures are recorded and do not stop the run. An I/O failure
/// does: the failing file is recorded, every remaining file becomes
/// `Pending`, and no rollback of already-written files is attempted;
/// rerunning with `--force` recovers the partial state.
pub fn write_rendered(results: Vec<RenderResult>, mode: WriteMode) -> WriteReport {
    let mut report = WriteReport::default();
    let mut aborted = false;

    for result in results {
        let label = result.plan.template.describe();
        let path = result.plan.destination;
        if aborted {
            report.entries.push((path, FileOutcome::Pending));
            continue;
        }
        let contents = match result.outcome {
            Ok(contents) => contents,
            Err(err) => {
                println!("❌ Cannot render {}: {err}", path.display());
                report.entries.push((path, FileOutcome::RenderFailed(err.to_string())));
                continue;
            }
        };
        let outcome = match mode {
            WriteMode::DryRun => {
                if path.exists() {
                    println!("🔍 Would overwrite {label}: {} (exists)", path.display());
                } else {
                    println!("🔍 Would write {label}: {}", path.display());
                }
                FileOutcome::Planned
            }
            WriteMode::Skip if path.exists() => {
                println!(
                    "⚠️  Skipping existing file: {} (use --force to overwrite)",
                    path.display()
                );
                FileOutcome::Skipped
            }
            WriteMode::Skip | WriteMode::Overwrite => match write_file(&path, &contents) {
                Ok(()) => {
                    println!("✅ Generated {label}: {}", path.display());
                    FileOutcome::Written
                }
                Err(err) => {
                    println!("❌ Failed to write {}: {err}", path.display());
                    aborted = true;
                    FileOutcome::WriteFailed(err.to_string())
                }
            },
        };
        report.entries.push((path, outcome));
    }
    report
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), bytes = contents.len(), "writing file");
    fs::write(path, contents)
}
