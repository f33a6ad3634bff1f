//! CSV frequency-table writer
//!
//! Each page gets its own `<url-encoded address>.csv` file with a
//! `Word,Frequency` header.

use crate::analysis::WordCount;
use crate::output::traits::{FrequencyStore, OutputError, OutputResult};
use crate::url::Address;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Header row of every table
const HEADER: [&str; 2] = ["Word", "Frequency"];

/// Longest file stem kept verbatim; most filesystems cap names at 255 bytes
const MAX_FILE_STEM: usize = 200;

/// Writes frequency tables into a single directory
#[derive(Debug, Clone)]
pub struct CsvWriter {
    directory: PathBuf,
}

impl CsvWriter {
    /// Creates a writer, creating `directory` if it does not exist
    pub fn new(directory: impl Into<PathBuf>) -> OutputResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the table for `source` is written to
    pub fn path_for(&self, source: &Address) -> PathBuf {
        self.directory.join(table_file_name(source))
    }
}

impl FrequencyStore for CsvWriter {
    fn store(&self, source: &Address, counts: &[WordCount]) -> OutputResult<PathBuf> {
        let path = self.path_for(source);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(HEADER)?;
        for entry in counts {
            writer.write_record([entry.word.as_str(), entry.count.to_string().as_str()])?;
        }
        writer
            .flush()
            .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

        Ok(path)
    }
}

/// File name of the table for `source`
///
/// The address is percent-encoded so it is a single path component. Overlong
/// names are cut and suffixed with a SHA-256 digest of the full address.
pub fn table_file_name(source: &Address) -> String {
    let encoded = urlencoding::encode(source.as_str());
    if encoded.len() <= MAX_FILE_STEM {
        return format!("{}.csv", encoded);
    }

    // Percent-encoding is pure ASCII, any byte index is a char boundary
    let digest = hex::encode(Sha256::digest(source.as_str().as_bytes()));
    format!("{}-{}.csv", &encoded[..MAX_FILE_STEM - 17], &digest[..16])
}
