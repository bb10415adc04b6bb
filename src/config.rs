// src/config.rs
use std::path::PathBuf;

pub const ARCHIVE_PATH: &str = "FL_insurance.csv.zip";
pub const ENTRY_NAME: &str = "FL_insurance.csv";

pub const COUNT_FILE: &str = "count.txt";
pub const TIV_2012_FILE: &str = "tiv2012.txt";
pub const MOST_VALUABLE_FILE: &str = "most_valuable.txt";

/// Where the pipeline reads from and writes to.
///
/// The binary only ever uses `Config::default()`; the fields exist so the
/// pipeline can be pointed at scratch directories.
#[derive(Debug, Clone)]
pub struct Config {
    pub archive_path: PathBuf,
    pub entry_name: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(ARCHIVE_PATH),
            entry_name: ENTRY_NAME.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Build a config that reads `archive_path` and writes into `output_dir`,
    /// keeping the default entry name.
    pub fn new(archive_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}
