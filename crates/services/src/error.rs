//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{GradeFilter, QuestionError, SummaryError, TermId};

use crate::quiz::QuizPhase;

/// Errors returned by quiz commands. The session state is unchanged whenever one
/// of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no terms available for {grade}")]
    NoTermsForGrade { grade: GradeFilter },
    #[error("no answer selected")]
    NoSelectionOnSubmit,
    #[error("{command} is not allowed while {phase:?}")]
    InvalidCommand {
        command: &'static str,
        phase: QuizPhase,
    },
    #[error("{text:?} is not an option of the current question")]
    UnknownOption { text: String },
    #[error("term {0} is not in the glossary")]
    UnknownTerm(TermId),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
