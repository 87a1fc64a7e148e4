use serde::Serialize;

use quiz_core::model::{Grade, TermCorpus, TermId};

use super::state::QuizState;

/// Presentation-agnostic snapshot of the current question.
///
/// The correct position and the example note are only filled in once the answer
/// has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub prompt_term_id: TermId,
    pub term: String,
    pub term_secondary: String,
    pub abbreviation: Option<String>,
    pub category: String,
    pub grade: Grade,
    pub options: Vec<String>,
    pub selected_index: Option<usize>,
    pub correct_index: Option<usize>,
    pub example: Option<String>,
}

impl QuestionView {
    /// Builds the view for the state's current question.
    ///
    /// Returns `None` outside a session or when the prompt term is not in `corpus`.
    #[must_use]
    pub fn from_state(state: &QuizState, corpus: &TermCorpus) -> Option<Self> {
        let question = state.current_question()?;
        let term = corpus.get(question.prompt_term_id())?;
        let language = state.language();
        let revealed = state.answered();

        Some(Self {
            prompt_term_id: term.id(),
            term: term.term_text(language).to_string(),
            term_secondary: term.term_text(language.toggled()).to_string(),
            abbreviation: term.abbreviation().map(str::to_string),
            category: term.category().to_string(),
            grade: term.grade(),
            options: question.option_texts().into_iter().map(str::to_string).collect(),
            selected_index: state.selected().and_then(|text| question.index_of(text)),
            correct_index: revealed.then(|| question.correct_index()),
            example: if revealed {
                term.example(language).map(str::to_string)
            } else {
                None
            },
        })
    }

    /// Whether the selected option was the correct one; `None` until revealed.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        let correct = self.correct_index?;
        Some(self.selected_index == Some(correct))
    }
}
