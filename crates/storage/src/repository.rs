use quiz_core::model::{CorpusError, Term, TermCorpus};
use thiserror::Error;

/// Errors surfaced by glossary sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid term record {id:?}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Source of the immutable glossary the quiz engine draws from.
pub trait TermSource: Send + Sync {
    /// Load every term into a corpus.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the glossary cannot be read or contains invalid
    /// or duplicate records.
    fn load(&self) -> Result<TermCorpus, StorageError>;
}

/// Glossary held in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    terms: Vec<Term>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl TermSource for InMemorySource {
    fn load(&self) -> Result<TermCorpus, StorageError> {
        Ok(TermCorpus::new(self.terms.clone())?)
    }
}
