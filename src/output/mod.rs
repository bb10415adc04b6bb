// src/output/mod.rs
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

use crate::{
    aggregate::{CountyIncrease, Summary},
    config::{COUNT_FILE, MOST_VALUABLE_FILE, TIV_2012_FILE},
};

/// Header of `most_valuable.txt`. "country" is what downstream consumers expect.
pub const MOST_VALUABLE_HEADER: &str = "country,value";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub fn format_count(count: usize) -> String {
    count.to_string()
}

/// Two decimals, `.` as separator. Rounds the exact binary value, ties to even.
///
/// Java's `String.format("%.2f")` rounds half-up on the shortest decimal form
/// instead, so values like `2.675` print `2.68` there and `2.67` here.
pub fn format_total(total: f64) -> String {
    format!("{:.2}", total)
}

/// Header line, then one `<county>,<value>` line per entry. No trailing newline.
pub fn format_most_valuable(ranking: &[CountyIncrease]) -> String {
    let mut out = String::from(MOST_VALUABLE_HEADER);
    for entry in ranking {
        out.push_str(LINE_ENDING);
        out.push_str(&format!("{},{:.2}", entry.county, entry.increase));
    }
    out
}

/// Which output files made it to disk.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Write the three summary files into `dir`.
///
/// Each file is attempted regardless of whether the others succeeded; a
/// failure is printed to stderr and kept in the report.
#[tracing::instrument(level = "info", skip(dir, summary), fields(dir = %dir.as_ref().display()))]
pub fn write_summary<P: AsRef<Path>>(dir: P, summary: &Summary) -> WriteReport {
    let dir = dir.as_ref();
    let outputs = [
        (COUNT_FILE, format_count(summary.county_count)),
        (TIV_2012_FILE, format_total(summary.tiv_2012_total)),
        (MOST_VALUABLE_FILE, format_most_valuable(&summary.most_valuable)),
    ];

    let mut report = WriteReport::default();
    for (name, contents) in outputs {
        let path = dir.join(name);
        match write_file(&path, &contents) {
            Ok(()) => {
                info!(file = name, bytes = contents.len(), "wrote output");
                report.written.push(path);
            }
            Err(e) => {
                eprintln!("Can't write to {}", name);
                error!(file = name, "write failed: {:#}", e);
                report.failed.push((path, e));
            }
        }
    }
    report
}
