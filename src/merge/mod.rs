//! @acp:module "Merge Orchestrator"
//! @acp:summary "Runs a batch of icons through fetch, transform and synthesis into one target"
//! @acp:domain merge
//! @acp:layer service
//!
//! A batch runs in three phases:
//!
//! 1. **Plan** (sequential): parse identifiers, resolve names and ask before
//!    overwriting. A name planned earlier in the batch counts as existing.
//! 2. **Fetch** (parallel): download every planned icon with rayon.
//! 3. **Fold** (sequential, in the user's order): transform, synthesize and
//!    merge each fetched icon into the target.
//!
//! Per-icon failures become [`IconStatus::Failed`] outcomes and the batch
//! continues. Cancelling a prompt aborts the batch before anything is fetched.

mod target;

pub use target::{BarrelTarget, FolderTarget, MergeKind, MergeTarget};

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::component::synthesize;
use crate::config::Config;
use crate::error::{IconError, Result};
use crate::icon::{ComponentName, IconIdentifier};
use crate::prompt::{Confirm, Confirmation};
use crate::registry::IconSource;
use crate::svg::{self, SvgDocument, TransformOptions};

/// @acp:summary "Icons to add and an optional explicit component name"
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub icons: Vec<String>,
    /// Only allowed with a single icon
    pub name: Option<String>,
}

/// Terminal state of one icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStatus {
    Added,
    Replaced,
    Skipped,
    Failed { reason: String },
}

impl fmt::Display for IconStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconStatus::Added => f.write_str("added"),
            IconStatus::Replaced => f.write_str("replaced"),
            IconStatus::Skipped => f.write_str("skipped"),
            IconStatus::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// @acp:summary "What happened to one requested icon"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOutcome {
    /// Identifier as the user typed it
    pub input: String,
    /// Resolved component name, when resolution got that far
    pub name: Option<ComponentName>,
    pub status: IconStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, status: &IconStatus) {
        match status {
            IconStatus::Added => self.added += 1,
            IconStatus::Replaced => self.replaced += 1,
            IconStatus::Skipped => self.skipped += 1,
            IconStatus::Failed { .. } => self.failed += 1,
        }
    }

    pub fn changed(&self) -> bool {
        self.added + self.replaced > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} replaced, {} skipped, {} failed",
            self.added, self.replaced, self.skipped, self.failed
        )
    }
}

/// A file the caller should write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub contents: String,
}

/// @acp:summary "Result of a batch: outcomes in request order plus the files to persist"
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<IconOutcome>,
    pub summary: BatchSummary,
    /// Empty unless at least one icon was added or replaced
    pub writes: Vec<PendingWrite>,
}

struct Plan {
    input: String,
    identifier: IconIdentifier,
    name: ComponentName,
}

enum Slot {
    Done(IconOutcome),
    Planned(Plan),
}

/// @acp:summary "Drives a batch against one merge target"
pub struct Orchestrator<'a> {
    config: &'a Config,
    source: &'a dyn IconSource,
    confirm: &'a dyn Confirm,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Config, source: &'a dyn IconSource, confirm: &'a dyn Confirm) -> Self {
        Self {
            config,
            source,
            confirm,
        }
    }

    /// Run `request` against `target`
    ///
    /// Fails as a whole only for precondition errors (`NameCollisionRejected`),
    /// cancellation, or errors that are not tied to a single icon.
    pub fn run(&self, request: &BatchRequest, target: &mut dyn MergeTarget) -> Result<BatchReport> {
        if request.name.is_some() && request.icons.len() > 1 {
            return Err(IconError::NameCollisionRejected {
                count: request.icons.len(),
            });
        }

        let slots = self.plan(request, target)?;

        let plans: Vec<&Plan> = slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Planned(plan) => Some(plan),
                Slot::Done(_) => None,
            })
            .collect();
        info!(planned = plans.len(), requested = request.icons.len(), "fetching icons");

        let source = self.source;
        let fetched: Vec<Result<SvgDocument>> = plans
            .par_iter()
            .map(|plan| source.fetch(&plan.identifier))
            .collect();
        let mut fetched = fetched.into_iter();

        let mut report = BatchReport::default();
        for slot in slots {
            let outcome = match slot {
                Slot::Done(outcome) => outcome,
                Slot::Planned(plan) => {
                    let result = match fetched.next() {
                        Some(Ok(svg)) => self.apply(&plan, &svg, target),
                        Some(Err(err)) => Err(err),
                        None => Err(IconError::FetchFailed {
                            identifier: plan.identifier.to_string(),
                            reason: "no fetch result".to_string(),
                        }),
                    };
                    let status = match result {
                        Ok(MergeKind::Added) => IconStatus::Added,
                        Ok(MergeKind::Replaced) => IconStatus::Replaced,
                        Err(err) if err.is_per_icon() => {
                            warn!(icon = %plan.input, error = %err, "icon failed");
                            IconStatus::Failed {
                                reason: err.to_string(),
                            }
                        }
                        Err(err) => return Err(err),
                    };
                    IconOutcome {
                        input: plan.input,
                        name: Some(plan.name),
                        status,
                    }
                }
            };
            report.summary.record(&outcome.status);
            report.outcomes.push(outcome);
        }

        if report.summary.changed() {
            report.writes = target.finish()?;
        }
        info!(summary = %report.summary, writes = report.writes.len(), "batch complete");

        Ok(report)
    }

    fn plan(&self, request: &BatchRequest, target: &dyn MergeTarget) -> Result<Vec<Slot>> {
        let mut planned: HashSet<ComponentName> = HashSet::new();
        let mut slots = Vec::with_capacity(request.icons.len());

        for input in &request.icons {
            let resolved = self.resolve(input, request.name.as_deref(), target);
            let (identifier, name) = match resolved {
                Ok(resolved) => resolved,
                Err(err) if err.is_per_icon() => {
                    warn!(icon = %input, error = %err, "icon rejected");
                    slots.push(Slot::Done(IconOutcome {
                        input: input.clone(),
                        name: None,
                        status: IconStatus::Failed {
                            reason: err.to_string(),
                        },
                    }));
                    continue;
                }
                Err(err) => return Err(err),
            };

            if target.contains(&name)? || planned.contains(&name) {
                let prompt = format!("{name} already exists. Overwrite it with {identifier}?");
                match self.confirm.confirm(&prompt)? {
                    Confirmation::Yes => debug!(%name, "overwrite confirmed"),
                    Confirmation::No => {
                        slots.push(Slot::Done(IconOutcome {
                            input: input.clone(),
                            name: Some(name),
                            status: IconStatus::Skipped,
                        }));
                        continue;
                    }
                    Confirmation::Cancelled => return Err(IconError::Cancelled),
                }
            }

            planned.insert(name.clone());
            slots.push(Slot::Planned(Plan {
                input: input.clone(),
                identifier,
                name,
            }));
        }

        Ok(slots)
    }

    fn resolve(
        &self,
        input: &str,
        custom: Option<&str>,
        target: &dyn MergeTarget,
    ) -> Result<(IconIdentifier, ComponentName)> {
        let identifier: IconIdentifier = input.parse()?;
        let name = match custom {
            Some(custom) => ComponentName::parse(custom)?,
            None => ComponentName::derive(&identifier)?,
        };
        target.validate(&name)?;
        Ok((identifier, name))
    }

    fn apply(&self, plan: &Plan, svg: &SvgDocument, target: &mut dyn MergeTarget) -> Result<MergeKind> {
        let options = TransformOptions {
            a11y: self.config.a11y,
            source: self
                .config
                .track_source
                .then(|| plan.identifier.to_string()),
            title: self.config.titles.then(|| plan.name.label()),
            ..Default::default()
        };

        let transformed = svg::transform(svg, &plan.name, &options)?;
        let definition = synthesize(&transformed, &plan.name, self.config.dialect())?;
        let kind = target.upsert(&definition)?;
        debug!(name = %plan.name, ?kind, "merged icon");
        Ok(kind)
    }
}
