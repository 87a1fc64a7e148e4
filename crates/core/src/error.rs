use thiserror::Error;

use crate::model::{CorpusError, QuestionError, QuizSettingsError, SummaryError, TermError};

/// Any domain validation failure raised by this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Term(#[from] TermError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
