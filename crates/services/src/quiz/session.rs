use std::sync::Arc;

use tracing::info;

use quiz_core::Clock;
use quiz_core::model::{GradeFilter, Language, QuizSettings, QuizSummary, TermCorpus};

use super::progress::QuizProgress;
use super::reducer::{QuizContext, reduce};
use super::state::{QuizCommand, QuizEvent, QuizPhase, QuizState};
use super::view::QuestionView;
use crate::error::QuizError;
use crate::shuffle::{FisherYates, Permutation};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Owns a quiz state and the collaborators needed to advance it.
///
/// Every command goes through [`QuizSession::dispatch`]; the state is only
/// replaced when the command succeeds.
pub struct QuizSession {
    corpus: Arc<TermCorpus>,
    settings: QuizSettings,
    clock: Clock,
    permutation: Box<dyn Permutation + Send>,
    state: QuizState,
}

impl QuizSession {
    /// New session on the grade-selection screen, shuffling from OS entropy.
    #[must_use]
    pub fn new(corpus: Arc<TermCorpus>) -> Self {
        Self {
            corpus,
            settings: QuizSettings::default(),
            clock: Clock::default(),
            permutation: Box::new(FisherYates::from_entropy()),
            state: QuizState::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_permutation(mut self, permutation: impl Permutation + Send + 'static) -> Self {
        self.permutation = Box::new(permutation);
        self
    }

    /// Initial display language. Only meaningful before a session starts.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.state.language = language;
        self
    }

    /// Initial grade filter shown on the selection screen.
    #[must_use]
    pub fn with_grade(mut self, grade: GradeFilter) -> Self {
        self.state.grade = grade;
        self
    }

    /// Apply a command to the current state.
    ///
    /// # Errors
    ///
    /// Returns the `QuizError` produced by the transition; the state is left as
    /// it was.
    pub fn dispatch(&mut self, command: QuizCommand) -> Result<QuizEvent, QuizError> {
        let mut ctx = QuizContext {
            corpus: &self.corpus,
            settings: self.settings,
            permutation: &mut *self.permutation,
            clock: self.clock,
        };
        let (state, result) = reduce(std::mem::take(&mut self.state), command, &mut ctx);
        self.state = state;

        if let Ok(QuizEvent::Completed(summary)) = &result {
            info!(
                score = summary.score(),
                total = summary.total(),
                bucket = summary.bucket().label(),
                "quiz completed"
            );
        }
        result
    }

    // ─── Commands ──────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn start(&mut self, grade: GradeFilter) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::StartSession(grade))
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn select(&mut self, text: impl Into<String>) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::SelectAnswer(text.into()))
    }

    /// Select the option at `index` of the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownOption` when `index` is out of range, otherwise
    /// see [`QuizSession::dispatch`].
    pub fn select_index(&mut self, index: usize) -> Result<QuizEvent, QuizError> {
        let text = self
            .state
            .current_question()
            .and_then(|q| q.options().get(index))
            .map(|opt| opt.text.clone())
            .ok_or_else(|| QuizError::UnknownOption {
                text: format!("#{}", index + 1),
            })?;
        self.select(text)
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn submit(&mut self) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::SubmitAnswer)
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn next(&mut self) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::NextQuestion)
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn change_language(&mut self, language: Language) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::ChangeLanguage(language))
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn toggle_language(&mut self) -> Result<QuizEvent, QuizError> {
        self.change_language(self.state.language().toggled())
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn change_grade(&mut self, grade: GradeFilter) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::ChangeGrade(grade))
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn retry(&mut self) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::Retry)
    }

    /// # Errors
    ///
    /// See [`QuizSession::dispatch`].
    pub fn exit(&mut self) -> Result<QuizEvent, QuizError> {
        self.dispatch(QuizCommand::ExitToSelection)
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn corpus(&self) -> &TermCorpus {
        &self.corpus
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.state.language()
    }

    #[must_use]
    pub fn grade(&self) -> GradeFilter {
        self.state.grade()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<QuestionView> {
        QuestionView::from_state(&self.state, &self.corpus)
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        QuizProgress::from_state(&self.state)
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.state.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::IdentityPermutation;
    use quiz_core::model::{TermDraft, TermId};
    use quiz_core::time::fixed_now;

    fn corpus() -> Arc<TermCorpus> {
        let terms = [("Allegro", "fast", "快"), ("Adagio", "slow", "慢"), ("Forte", "loud", "响")]
            .into_iter()
            .zip(1..)
            .map(|((term, en, zh), id)| {
                TermDraft {
                    term: term.into(),
                    term_secondary: format!("{term}-zh"),
                    definition: en.into(),
                    definition_secondary: zh.into(),
                    example: Some(format!("{term} example")),
                    category: "Tempo".into(),
                    grade: 1,
                    ..TermDraft::default()
                }
                .validate(TermId::new(id))
                .unwrap()
            })
            .collect();
        Arc::new(TermCorpus::new(terms).unwrap())
    }

    fn session() -> QuizSession {
        QuizSession::new(corpus())
            .with_permutation(IdentityPermutation)
            .with_clock(Clock::fixed(fixed_now()))
    }

    #[test]
    fn view_hides_answer_until_submitted() {
        let mut quiz = session();
        quiz.start(GradeFilter::All).unwrap();

        let view = quiz.current_question().unwrap();
        assert_eq!(view.term, "Allegro");
        assert_eq!(view.term_secondary, "Allegro-zh");
        assert_eq!(view.options, vec!["fast", "slow", "loud"]);
        assert_eq!(view.correct_index, None);
        assert_eq!(view.example, None);
        assert_eq!(view.is_correct(), None);

        quiz.select_index(1).unwrap();
        quiz.submit().unwrap();
        let view = quiz.current_question().unwrap();
        assert_eq!(view.selected_index, Some(1));
        assert_eq!(view.correct_index, Some(0));
        assert_eq!(view.example.as_deref(), Some("Allegro example"));
        assert_eq!(view.is_correct(), Some(false));
    }

    #[test]
    fn progress_tracks_position_and_score() {
        let mut quiz = session();
        assert_eq!(quiz.progress(), None);

        quiz.start(GradeFilter::All).unwrap();
        quiz.select("fast").unwrap();
        quiz.submit().unwrap();
        quiz.next().unwrap();

        let progress = quiz.progress().unwrap();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.score, 1);
        assert!(!progress.answered);
        assert_eq!(progress.remaining(), 1);
        assert!(!progress.is_last());
    }

    #[test]
    fn failed_command_keeps_state() {
        let mut quiz = session();
        quiz.start(GradeFilter::All).unwrap();
        let before = quiz.state().clone();

        assert_eq!(quiz.submit().unwrap_err(), QuizError::NoSelectionOnSubmit);
        assert!(matches!(
            quiz.select_index(7),
            Err(QuizError::UnknownOption { .. })
        ));
        assert_eq!(quiz.state(), &before);
    }

    #[test]
    fn toggle_language_translates_view() {
        let mut quiz = session().with_language(Language::En);
        quiz.start(GradeFilter::All).unwrap();
        quiz.select("slow").unwrap();
        quiz.toggle_language().unwrap();

        let view = quiz.current_question().unwrap();
        assert_eq!(quiz.language(), Language::Zh);
        assert_eq!(view.term, "Allegro-zh");
        assert_eq!(view.options, vec!["快", "慢", "响"]);
        assert_eq!(view.selected_index, Some(1));
    }

    #[test]
    fn full_run_produces_summary() {
        let mut quiz = session();
        quiz.start(GradeFilter::All).unwrap();
        for _ in 0..3 {
            let correct = quiz.state().current_question().unwrap().correct_text().to_string();
            quiz.select(correct).unwrap();
            quiz.submit().unwrap();
            quiz.next().unwrap();
        }
        assert_eq!(quiz.phase(), QuizPhase::Completed);
        let summary = quiz.summary().unwrap();
        assert_eq!(summary.score(), 3);
        assert_eq!(summary.started_at(), fixed_now());
        assert_eq!(quiz.current_question().map(|v| v.options.len()), Some(3));
    }
}
