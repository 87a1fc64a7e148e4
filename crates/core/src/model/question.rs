use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::TermId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least one option")]
    NoOptions,

    #[error("expected exactly one correct option, found {0}")]
    CorrectSlotCount(usize),

    #[error("duplicate option text: {0:?}")]
    DuplicateText(String),

    #[error("option slot {0:?} is not in the question's slot mapping")]
    SlotOutsideMapping(OptionSlot),
}

//
// ─── OPTION SLOTS ──────────────────────────────────────────────────────────────
//

/// Which term produced the text shown at one option position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OptionSlot {
    /// The prompt term's own definition.
    Correct,
    /// A distractor taken from another term's definition.
    Wrong(TermId),
}

impl OptionSlot {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, OptionSlot::Correct)
    }
}

/// Option text paired with the slot that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub text: String,
    pub slot: OptionSlot,
}

impl AnswerOption {
    #[must_use]
    pub fn new(text: impl Into<String>, slot: OptionSlot) -> Self {
        Self {
            text: text.into(),
            slot,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question about one prompt term.
///
/// The slot mapping is fixed when the question is generated. The displayed
/// options are drawn from it in mapping order; a language change may hide a slot
/// whose text collides with another, but never removes it from the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    prompt_term_id: TermId,
    slots: Vec<OptionSlot>,
    options: Vec<AnswerOption>,
    correct_index: usize,
}

impl QuizQuestion {
    /// Build a freshly generated question; the options also define the slot mapping.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` unless there is at least one option, exactly one
    /// `OptionSlot::Correct`, and option texts are pairwise distinct.
    pub fn new(prompt_term_id: TermId, options: Vec<AnswerOption>) -> Result<Self, QuestionError> {
        let slots = options.iter().map(|opt| opt.slot).collect();
        Self::build(prompt_term_id, slots, options)
    }

    /// The same question showing different option text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::SlotOutsideMapping` if an option's slot is not part
    /// of this question's mapping (or is out of mapping order), plus the checks of
    /// [`QuizQuestion::new`].
    pub fn with_options(&self, options: Vec<AnswerOption>) -> Result<Self, QuestionError> {
        Self::build(self.prompt_term_id, self.slots.clone(), options)
    }

    fn build(
        prompt_term_id: TermId,
        slots: Vec<OptionSlot>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let correct: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, opt)| opt.slot.is_correct())
            .map(|(i, _)| i)
            .collect();
        let [correct_index] = correct.as_slice() else {
            return Err(QuestionError::CorrectSlotCount(correct.len()));
        };

        let mut seen = HashSet::with_capacity(options.len());
        for opt in &options {
            if !seen.insert(opt.text.as_str()) {
                return Err(QuestionError::DuplicateText(opt.text.clone()));
            }
        }

        // Displayed options must be a subsequence of the mapping.
        let mut mapping = slots.iter();
        if let Some(stray) = options
            .iter()
            .find(|opt| !mapping.any(|slot| *slot == opt.slot))
        {
            return Err(QuestionError::SlotOutsideMapping(stray.slot));
        }

        Ok(Self {
            prompt_term_id,
            slots,
            correct_index: *correct_index,
            options,
        })
    }

    #[must_use]
    pub fn prompt_term_id(&self) -> TermId {
        self.prompt_term_id
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option_texts(&self) -> Vec<&str> {
        self.options.iter().map(|opt| opt.text.as_str()).collect()
    }

    /// The full slot mapping from generation, including slots currently hidden.
    pub fn slots(&self) -> impl Iterator<Item = OptionSlot> + '_ {
        self.slots.iter().copied()
    }

    /// Slots of the displayed options, aligned with [`QuizQuestion::options`].
    pub fn displayed_slots(&self) -> impl Iterator<Item = OptionSlot> + '_ {
        self.options.iter().map(|opt| opt.slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index].text
    }

    /// Position of the option whose text equals `text`.
    #[must_use]
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.options.iter().position(|opt| opt.text == text)
    }

    #[must_use]
    pub fn is_correct_answer(&self, text: &str) -> bool {
        self.correct_text() == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrong(id: u64, text: &str) -> AnswerOption {
        AnswerOption::new(text, OptionSlot::Wrong(TermId::new(id)))
    }

    #[test]
    fn new_locates_correct_option() {
        let q = QuizQuestion::new(
            TermId::new(1),
            vec![
                wrong(2, "slow"),
                AnswerOption::new("fast", OptionSlot::Correct),
                wrong(3, "loud"),
            ],
        )
        .unwrap();
        assert_eq!(q.correct_index(), 1);
        assert_eq!(q.correct_text(), "fast");
        assert_eq!(q.option_texts(), vec!["slow", "fast", "loud"]);
        assert_eq!(q.index_of("loud"), Some(2));
        assert!(q.is_correct_answer("fast"));
        assert!(!q.is_correct_answer("slow"));
    }

    #[test]
    fn single_option_question_is_valid() {
        let q = QuizQuestion::new(
            TermId::new(1),
            vec![AnswerOption::new("fast", OptionSlot::Correct)],
        )
        .unwrap();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn new_rejects_missing_or_extra_correct_slots() {
        let none = QuizQuestion::new(TermId::new(1), vec![wrong(2, "slow")]).unwrap_err();
        assert_eq!(none, QuestionError::CorrectSlotCount(0));

        let two = QuizQuestion::new(
            TermId::new(1),
            vec![
                AnswerOption::new("fast", OptionSlot::Correct),
                AnswerOption::new("quick", OptionSlot::Correct),
            ],
        )
        .unwrap_err();
        assert_eq!(two, QuestionError::CorrectSlotCount(2));
    }

    #[test]
    fn new_rejects_duplicate_text() {
        let err = QuizQuestion::new(
            TermId::new(1),
            vec![AnswerOption::new("fast", OptionSlot::Correct), wrong(3, "fast")],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateText("fast".into()));
    }

    #[test]
    fn new_rejects_empty_options() {
        assert_eq!(
            QuizQuestion::new(TermId::new(1), Vec::new()).unwrap_err(),
            QuestionError::NoOptions
        );
    }

    #[test]
    fn hidden_slots_stay_in_the_mapping() {
        let q = QuizQuestion::new(
            TermId::new(1),
            vec![
                AnswerOption::new("fast", OptionSlot::Correct),
                wrong(2, "slow"),
                wrong(4, "gradually slower"),
            ],
        )
        .unwrap();

        let narrowed = q
            .with_options(vec![AnswerOption::new("快", OptionSlot::Correct), wrong(2, "慢")])
            .unwrap();
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.slots().collect::<Vec<_>>(), q.slots().collect::<Vec<_>>());
        assert_eq!(
            narrowed.displayed_slots().collect::<Vec<_>>(),
            vec![OptionSlot::Correct, OptionSlot::Wrong(TermId::new(2))]
        );
    }

    #[test]
    fn with_options_rejects_foreign_or_reordered_slots() {
        let q = QuizQuestion::new(
            TermId::new(1),
            vec![AnswerOption::new("fast", OptionSlot::Correct), wrong(2, "slow")],
        )
        .unwrap();

        let foreign = q
            .with_options(vec![AnswerOption::new("fast", OptionSlot::Correct), wrong(9, "odd")])
            .unwrap_err();
        assert_eq!(foreign, QuestionError::SlotOutsideMapping(OptionSlot::Wrong(TermId::new(9))));

        let reordered = q
            .with_options(vec![wrong(2, "slow"), AnswerOption::new("fast", OptionSlot::Correct)])
            .unwrap_err();
        assert_eq!(reordered, QuestionError::SlotOutsideMapping(OptionSlot::Correct));
    }
}
