use std::path::{Path, PathBuf};

use quiz_core::model::TermCorpus;
use tracing::warn;

use crate::repository::{StorageError, TermSource};

mod mapping;

pub use mapping::TermRecord;

/// Parse a JSON glossary (an array of term records) into a corpus.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON,
/// `StorageError::InvalidRecord` for the first record that fails validation and
/// `StorageError::Corpus` for duplicate ids.
pub fn parse_glossary(json: &str) -> Result<TermCorpus, StorageError> {
    parse_records(json, false)
}

fn parse_records(json: &str, skip_invalid: bool) -> Result<TermCorpus, StorageError> {
    let records: Vec<TermRecord> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut terms = Vec::with_capacity(records.len());
    for record in records {
        match record.into_term() {
            Ok(term) => terms.push(term),
            Err(StorageError::InvalidRecord { id, reason }) if skip_invalid => {
                warn!(%id, %reason, "skipping invalid glossary record");
            }
            Err(err) => {
                warn!(error = %err, "rejecting glossary");
                return Err(err);
            }
        }
    }

    Ok(TermCorpus::new(terms)?)
}

/// Glossary stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    skip_invalid: bool,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skip_invalid: false,
        }
    }

    /// Skip records that fail validation instead of rejecting the whole file.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TermSource for JsonFileSource {
    fn load(&self) -> Result<TermCorpus, StorageError> {
        let raw = std::fs::read_to_string(&self.path)?;
        parse_records(&raw, self.skip_invalid)
    }
}
