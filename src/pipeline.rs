// src/pipeline.rs
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

use crate::{
    aggregate::{self, Summary},
    config::Config,
    output::{self, WriteReport},
    process,
};

/// Result of a run that got past the initial read.
#[derive(Debug)]
pub struct RunOutcome {
    pub records: usize,
    pub summary: Summary,
    pub report: WriteReport,
}

/// Load the archive named in `cfg`, aggregate it, and write the three
/// summary files.
///
/// Only a failed read is an error. Write failures are reported per file and
/// end up in `RunOutcome::report`.
pub fn run(cfg: &Config) -> Result<RunOutcome> {
    let start = Instant::now();

    let records = process::load_policy_zip(&cfg.archive_path, &cfg.entry_name)
        .with_context(|| format!("Can't read {}", cfg.archive_path.display()))?;

    let summary = aggregate::summarize(&records);
    let report = output::write_summary(&cfg.output_dir, &summary);

    if report.is_complete() {
        info!(elapsed = ?start.elapsed(), "all outputs written");
    } else {
        warn!(
            failed = report.failed.len(),
            elapsed = ?start.elapsed(),
            "finished with write failures"
        );
    }

    Ok(RunOutcome {
        records: records.len(),
        summary,
        report,
    })
}
