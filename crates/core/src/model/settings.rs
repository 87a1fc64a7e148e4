use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("question count must be > 0")]
    InvalidQuestionCount,
}

/// Sizing knobs for question generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_count: usize,
    wrong_answer_target: usize,
}

impl QuizSettings {
    pub const DEFAULT_QUESTION_COUNT: usize = 10;
    pub const DEFAULT_WRONG_ANSWER_TARGET: usize = 3;

    /// Creates custom quiz settings.
    ///
    /// A `wrong_answer_target` of zero is allowed and yields one-option questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidQuestionCount` if `question_count` is zero.
    pub fn new(question_count: usize, wrong_answer_target: usize) -> Result<Self, QuizSettingsError> {
        if question_count == 0 {
            return Err(QuizSettingsError::InvalidQuestionCount);
        }
        Ok(Self {
            question_count,
            wrong_answer_target,
        })
    }

    /// Upper bound on questions per session.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Distractors wanted per question; fewer are used when the glossary is sparse.
    #[must_use]
    pub fn wrong_answer_target(&self) -> usize {
        self.wrong_answer_target
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: Self::DEFAULT_QUESTION_COUNT,
            wrong_answer_target: Self::DEFAULT_WRONG_ANSWER_TARGET,
        }
    }
}
