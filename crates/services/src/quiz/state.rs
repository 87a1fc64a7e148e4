use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::model::{GradeFilter, Language, QuizQuestion, QuizSummary, ScoreTracker};

/// Lifecycle phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuizPhase {
    #[default]
    GradeSelection,
    QuestionActive,
    AnswerRevealed,
    Completed,
}

impl QuizPhase {
    /// True while a question list exists.
    #[must_use]
    pub fn has_session(self) -> bool {
        !matches!(self, QuizPhase::GradeSelection)
    }
}

/// Commands accepted by the quiz state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    StartSession(GradeFilter),
    SelectAnswer(String),
    SubmitAnswer,
    NextQuestion,
    ChangeLanguage(Language),
    ChangeGrade(GradeFilter),
    Retry,
    ExitToSelection,
}

impl QuizCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizCommand::StartSession(_) => "start_session",
            QuizCommand::SelectAnswer(_) => "select_answer",
            QuizCommand::SubmitAnswer => "submit_answer",
            QuizCommand::NextQuestion => "next_question",
            QuizCommand::ChangeLanguage(_) => "change_language",
            QuizCommand::ChangeGrade(_) => "change_grade",
            QuizCommand::Retry => "retry",
            QuizCommand::ExitToSelection => "exit_to_selection",
        }
    }
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    SessionStarted { total: usize },
    AnswerSelected { index: usize },
    /// The command was accepted but changed nothing (selection after submit).
    Unchanged,
    AnswerSubmitted { correct: bool, score: u32 },
    Advanced { index: usize },
    Completed(QuizSummary),
    LanguageChanged { language: Language },
    GradeChosen { grade: GradeFilter },
    ReturnedToSelection,
}

/// Complete quiz session state. Replaced wholesale by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    pub(crate) phase: QuizPhase,
    pub(crate) grade: GradeFilter,
    pub(crate) language: Language,
    pub(crate) questions: Vec<QuizQuestion>,
    pub(crate) current: usize,
    pub(crate) selected: Option<String>,
    pub(crate) answered: bool,
    pub(crate) score: ScoreTracker,
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

impl QuizState {
    /// Fresh grade-selection state with the given display language.
    #[must_use]
    pub fn new(grade: GradeFilter, language: Language) -> Self {
        Self {
            grade,
            language,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn grade(&self) -> GradeFilter {
        self.grade
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.phase.has_session() {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Completion summary, available once the session reached `Completed`.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        if self.phase != QuizPhase::Completed {
            return None;
        }
        let completed_at = self.completed_at?;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        QuizSummary::new(
            self.score.score(),
            total,
            self.started_at.unwrap_or(completed_at),
            completed_at,
        )
        .ok()
    }
}
