use quiz_core::model::{Term, TermDraft, TermId};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of one glossary entry.
///
/// Field names follow the published glossary file; the `*Secondary` spellings are
/// accepted as aliases for the Chinese fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    pub id: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub category: String,
    pub grade: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, alias = "termSecondary")]
    pub term_chinese: String,
    #[serde(default, alias = "definitionSecondary")]
    pub definition_chinese: String,
    #[serde(default, alias = "exampleSecondary", skip_serializing_if = "Option::is_none")]
    pub example_chinese: Option<String>,
}

impl TermRecord {
    /// Convert the record into a validated domain `Term`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the id is not numeric or the
    /// term fails validation.
    pub fn into_term(self) -> Result<Term, StorageError> {
        let id: TermId = self.id.parse().map_err(|e| StorageError::InvalidRecord {
            id: self.id.clone(),
            reason: format!("{e}"),
        })?;

        TermDraft {
            term: self.term,
            term_secondary: self.term_chinese,
            definition: self.definition,
            definition_secondary: self.definition_chinese,
            example: self.example,
            example_secondary: self.example_chinese,
            abbreviation: self.abbreviation,
            origin_language: self.language,
            category: self.category,
            grade: self.grade,
        }
        .validate(id)
        .map_err(|e| StorageError::InvalidRecord {
            id: self.id,
            reason: e.to_string(),
        })
    }
}
