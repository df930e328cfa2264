//! @acp:module "Add Command"
//! @acp:summary "Fetch icons from the registry and merge them into the generated module"
//! @acp:domain cli
//! @acp:layer handler

use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use similar::TextDiff;

use super::Project;
use crate::config::OutputShape;
use crate::error::IconError;
use crate::icon::IconIdentifier;
use crate::merge::{
    BarrelTarget, BatchReport, BatchRequest, FolderTarget, IconStatus, MergeTarget, Orchestrator,
    PendingWrite,
};
use crate::prompt::{AssumeYes, Confirm, TerminalConfirm};
use crate::registry::IconSource;
use crate::storage::Storage;
use crate::svg::SvgDocument;

/// Options for the add command
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Registry identifiers (`lucide:check`)
    pub icons: Vec<String>,
    /// Explicit component name, single icon only
    pub name: Option<String>,
    /// Overwrite existing icons without asking
    pub yes: bool,
    /// Show what would change without writing
    pub dry_run: bool,
}

/// Spinner shown while the batch is fetching
struct ProgressSource<'a> {
    inner: &'a dyn IconSource,
    bar: ProgressBar,
    started: Once,
}

impl<'a> ProgressSource<'a> {
    fn new(inner: &'a dyn IconSource) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        Self {
            inner,
            bar,
            started: Once::new(),
        }
    }
}

impl IconSource for ProgressSource<'_> {
    fn fetch(&self, identifier: &IconIdentifier) -> crate::error::Result<SvgDocument> {
        self.started
            .call_once(|| self.bar.enable_steady_tick(Duration::from_millis(80)));
        self.bar.set_message(format!("Fetching {identifier}..."));
        self.inner.fetch(identifier)
    }
}

/// Execute the add command, fetching icons from `source`
///
/// Returns `false` when at least one icon failed or the batch was cancelled.
pub fn execute_add(options: AddOptions, project: &Project, source: &dyn IconSource) -> Result<bool> {
    if options.yes {
        execute_add_with(options, project, source, &AssumeYes)
    } else {
        execute_add_with(options, project, source, &TerminalConfirm)
    }
}

/// Execute the add command with an explicit overwrite confirmation
pub fn execute_add_with(
    options: AddOptions,
    project: &Project,
    source: &dyn IconSource,
    confirm: &dyn Confirm,
) -> Result<bool> {
    let config = &project.config;
    let source = ProgressSource::new(source);

    let mut target: Box<dyn MergeTarget> = match project.output_shape() {
        OutputShape::Barrel(path) => {
            let text = project.read_barrel(&path)?;
            Box::new(BarrelTarget::new(path, &text, config.dialect())?)
        }
        OutputShape::Folder(dir) => {
            let files = project.storage.list(&dir)?;
            Box::new(FolderTarget::new(dir, &files, config.dialect()))
        }
    };

    let request = BatchRequest {
        icons: options.icons,
        name: options.name,
    };
    let orchestrator = Orchestrator::new(config, &source, confirm);
    let result = orchestrator.run(&request, target.as_mut());
    source.bar.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(IconError::Cancelled) => {
            eprintln!("{} Cancelled, nothing was written", style("!").yellow());
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    print_outcomes(&report);

    if options.dry_run {
        print_dry_run(project, &report.writes)?;
    } else {
        for write in &report.writes {
            project.storage.write(&write.path, &write.contents)?;
            println!("{} Wrote {}", style("✓").green(), write.path.display());
        }
    }

    println!("\n{}", style(report.summary.to_string()).bold());
    Ok(report.summary.failed == 0)
}

fn print_outcomes(report: &BatchReport) {
    for outcome in &report.outcomes {
        let name = outcome
            .name
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "-".to_string());

        match &outcome.status {
            IconStatus::Added => println!(
                "{} {} {}",
                style("✓").green(),
                style(&name).cyan(),
                style(format!("({})", outcome.input)).dim()
            ),
            IconStatus::Replaced => println!(
                "{} {} replaced {}",
                style("→").cyan(),
                style(&name).cyan(),
                style(format!("({})", outcome.input)).dim()
            ),
            IconStatus::Skipped => println!(
                "{} {} skipped, already exists",
                style("!").yellow(),
                style(&name).cyan()
            ),
            IconStatus::Failed { reason } => println!(
                "{} {} {}",
                style("✗").red(),
                outcome.input,
                style(reason).red()
            ),
        }
    }
}

fn print_dry_run(project: &Project, writes: &[PendingWrite]) -> Result<()> {
    if writes.is_empty() {
        println!("\n{} Nothing to write", style("→").cyan());
        return Ok(());
    }

    for write in writes {
        let path = write.path.display().to_string();
        if project.storage.exists(&write.path) {
            let current = project.storage.read(&write.path)?;
            if current == write.contents {
                continue;
            }
            let diff = TextDiff::from_lines(&current, &write.contents);
            println!(
                "\n{}",
                diff.unified_diff().header(&path, &path)
            );
        } else {
            println!("\n{} would create {}", style("+").green(), path);
        }
    }
    Ok(())
}
