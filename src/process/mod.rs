// src/process/mod.rs
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info};
use zip::{result::ZipError, ZipArchive};

pub mod error;
pub mod record;

pub use error::{ErrorKind, LoadError};
pub use record::{PolicyRecord, EXPECTED_FIELDS};

/// Open `zip_path`, find `entry_name`, and parse every line after the header
/// into a `PolicyRecord`.
///
/// Any failure aborts the whole read; no partial result is returned. The
/// archive and the entry's decompression stream are released before this
/// returns, on every path.
#[tracing::instrument(level = "info", skip(zip_path), fields(path = %zip_path.as_ref().display()))]
pub fn load_policy_zip<P: AsRef<Path>>(
    zip_path: P,
    entry_name: &str,
) -> Result<Vec<PolicyRecord>, LoadError> {
    let path = zip_path.as_ref();

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| {
        LoadError::Archive {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(LoadError::EntryNotFound {
                path: path.to_path_buf(),
                entry: entry_name.to_string(),
            })
        }
        Err(source) => {
            return Err(LoadError::Archive {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    debug!(size = entry.size(), "opened entry");

    let records = read_policy_records(entry)?;
    info!(records = records.len(), "loaded policy records");
    Ok(records)
}

/// Parse CSV text with a header line from `reader`.
///
/// Fields are split on bare commas; quotes carry no meaning. Blank lines are
/// skipped.
pub fn read_policy_records<R: Read>(reader: R) -> Result<Vec<PolicyRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.byte_records() {
        let row = result.map_err(|source| LoadError::Read { source })?;
        let line = row.position().map_or(0, |p| p.line());
        records.push(PolicyRecord::from_row(&row, line)?);
    }
    Ok(records)
}
