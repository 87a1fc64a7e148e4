use serde::Serialize;
use thiserror::Error;

use crate::model::{Grade, Language, TermId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TermError {
    #[error("term text cannot be empty")]
    EmptyTerm,

    #[error("definition cannot be empty")]
    EmptyDefinition,

    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("grade must be between 1 and 5, got {0}")]
    InvalidGrade(u8),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated term fields, as read from a glossary source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermDraft {
    pub term: String,
    pub term_secondary: String,
    pub definition: String,
    pub definition_secondary: String,
    pub example: Option<String>,
    pub example_secondary: Option<String>,
    pub abbreviation: Option<String>,
    pub origin_language: Option<String>,
    pub category: String,
    pub grade: u8,
}

impl TermDraft {
    /// Validate the draft and attach its identifier.
    ///
    /// Text is trimmed; blank optional fields collapse to `None`. The secondary
    /// language fields may be empty, the primary ones may not.
    ///
    /// # Errors
    ///
    /// Returns `TermError` if the term, primary definition or category is blank,
    /// or if the grade is outside `1..=5`.
    pub fn validate(self, id: TermId) -> Result<Term, TermError> {
        let term = self.term.trim().to_string();
        if term.is_empty() {
            return Err(TermError::EmptyTerm);
        }
        let definition = self.definition.trim().to_string();
        if definition.is_empty() {
            return Err(TermError::EmptyDefinition);
        }
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(TermError::EmptyCategory);
        }
        let grade = Grade::new(self.grade)?;

        Ok(Term {
            id,
            term,
            term_secondary: self.term_secondary.trim().to_string(),
            definition,
            definition_secondary: self.definition_secondary.trim().to_string(),
            example: normalize_optional(self.example),
            example_secondary: normalize_optional(self.example_secondary),
            abbreviation: normalize_optional(self.abbreviation),
            origin_language: normalize_optional(self.origin_language),
            category,
            grade,
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//
// ─── TERM ──────────────────────────────────────────────────────────────────────
//

/// A bilingual glossary entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    id: TermId,
    term: String,
    term_secondary: String,
    definition: String,
    definition_secondary: String,
    example: Option<String>,
    example_secondary: Option<String>,
    abbreviation: Option<String>,
    origin_language: Option<String>,
    category: String,
    grade: Grade,
}

impl Term {
    #[must_use]
    pub fn id(&self) -> TermId {
        self.id
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Language the notation originates from (e.g. "Italian"), if recorded.
    #[must_use]
    pub fn origin_language(&self) -> Option<&str> {
        self.origin_language.as_deref()
    }

    #[must_use]
    pub fn term_text(&self, language: Language) -> &str {
        match language {
            Language::En => &self.term,
            Language::Zh => &self.term_secondary,
        }
    }

    /// Definition in the given language. May be empty for the secondary language.
    #[must_use]
    pub fn definition(&self, language: Language) -> &str {
        match language {
            Language::En => &self.definition,
            Language::Zh => &self.definition_secondary,
        }
    }

    #[must_use]
    pub fn example(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.example.as_deref(),
            Language::Zh => self.example_secondary.as_deref(),
        }
    }

    /// Case-insensitive substring match over term, definition and example text
    /// in both languages.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.term.as_str()),
            Some(self.term_secondary.as_str()),
            Some(self.definition.as_str()),
            Some(self.definition_secondary.as_str()),
            self.example.as_deref(),
            self.example_secondary.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TermDraft {
        TermDraft {
            term: " Allegro ".into(),
            term_secondary: "快板".into(),
            definition: "Fast and lively".into(),
            definition_secondary: "快速而活泼".into(),
            example: Some("  ".into()),
            example_secondary: None,
            abbreviation: None,
            origin_language: Some("Italian".into()),
            category: "Tempo".into(),
            grade: 1,
        }
    }

    #[test]
    fn validate_trims_and_normalizes() {
        let term = draft().validate(TermId::new(1)).unwrap();
        assert_eq!(term.term_text(Language::En), "Allegro");
        assert_eq!(term.term_text(Language::Zh), "快板");
        assert_eq!(term.example(Language::En), None);
        assert_eq!(term.origin_language(), Some("Italian"));
        assert_eq!(term.grade().value(), 1);
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut d = draft();
        d.term = "   ".into();
        assert_eq!(d.validate(TermId::new(1)), Err(TermError::EmptyTerm));

        let mut d = draft();
        d.definition = String::new();
        assert_eq!(d.validate(TermId::new(1)), Err(TermError::EmptyDefinition));

        let mut d = draft();
        d.category = String::new();
        assert_eq!(d.validate(TermId::new(1)), Err(TermError::EmptyCategory));
    }

    #[test]
    fn validate_rejects_sentinel_grade() {
        let mut d = draft();
        d.grade = 0;
        assert_eq!(d.validate(TermId::new(1)), Err(TermError::InvalidGrade(0)));
    }

    #[test]
    fn definition_follows_language() {
        let term = draft().validate(TermId::new(1)).unwrap();
        assert_eq!(term.definition(Language::En), "Fast and lively");
        assert_eq!(term.definition(Language::Zh), "快速而活泼");
    }

    #[test]
    fn query_matches_either_language() {
        let term = draft().validate(TermId::new(1)).unwrap();
        assert!(term.matches_query("LIVELY"));
        assert!(term.matches_query("快板"));
        assert!(term.matches_query("  "));
        assert!(!term.matches_query("adagio"));
    }
}
