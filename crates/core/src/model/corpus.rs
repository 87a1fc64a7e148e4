use std::collections::HashMap;
use thiserror::Error;

use crate::model::{GradeFilter, Language, Term, TermId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorpusError {
    #[error("duplicate term id: {0}")]
    DuplicateId(TermId),
}

/// Immutable, ordered glossary. Term ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCorpus {
    terms: Vec<Term>,
    index: HashMap<TermId, usize>,
}

impl TermCorpus {
    /// Build a corpus, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::DuplicateId` if two terms share an id.
    pub fn new(terms: Vec<Term>) -> Result<Self, CorpusError> {
        let mut index = HashMap::with_capacity(terms.len());
        for (pos, term) in terms.iter().enumerate() {
            if index.insert(term.id(), pos).is_some() {
                return Err(CorpusError::DuplicateId(term.id()));
            }
        }
        Ok(Self { terms, index })
    }

    #[must_use]
    pub fn all(&self) -> &[Term] {
        &self.terms
    }

    /// Terms matching the filter, in corpus order. `GradeFilter::All` returns everything.
    #[must_use]
    pub fn by_grade(&self, filter: GradeFilter) -> Vec<&Term> {
        self.terms
            .iter()
            .filter(|term| filter.matches(term.grade()))
            .collect()
    }

    #[must_use]
    pub fn count_by_grade(&self, filter: GradeFilter) -> usize {
        self.terms
            .iter()
            .filter(|term| filter.matches(term.grade()))
            .count()
    }

    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.index.get(&id).map(|&pos| &self.terms[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Browse lookup: grade-filtered terms matching `query`, sorted by grade and
    /// then by primary term text (case-insensitive).
    #[must_use]
    pub fn search(&self, query: &str, filter: GradeFilter) -> Vec<&Term> {
        let mut found: Vec<&Term> = self
            .terms
            .iter()
            .filter(|term| filter.matches(term.grade()) && term.matches_query(query))
            .collect();
        found.sort_by(|a, b| {
            a.grade().cmp(&b.grade()).then_with(|| {
                a.term_text(Language::En)
                    .to_lowercase()
                    .cmp(&b.term_text(Language::En).to_lowercase())
            })
        });
        found
    }
}
