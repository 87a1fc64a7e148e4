use quiz_core::model::{
    AnswerOption, Language, OptionSlot, QuizQuestion, Term, TermCorpus, TermId,
};

use super::options::collapse_duplicates;
use crate::error::QuizError;

/// Questions re-rendered in another language, plus the carried-over selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub questions: Vec<QuizQuestion>,
    pub selected: Option<String>,
}

/// Rewrites option text for a new display language without moving options.
pub struct OptionTranslator<'a> {
    corpus: &'a TermCorpus,
}

impl<'a> OptionTranslator<'a> {
    #[must_use]
    pub fn new(corpus: &'a TermCorpus) -> Self {
        Self { corpus }
    }

    /// Translate every question and carry the current selection across.
    ///
    /// The selection is tracked by the slot it pointed at, so it lands on the same
    /// position when no options collapse, and on the surviving option with the same
    /// text when one does.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownTerm` if a question references a term missing
    /// from the glossary.
    pub fn translate(
        &self,
        questions: &[QuizQuestion],
        current: usize,
        selected: Option<&str>,
        language: Language,
    ) -> Result<Translation, QuizError> {
        let translated = questions
            .iter()
            .map(|q| self.translate_question(q, language))
            .collect::<Result<Vec<_>, _>>()?;

        let selected = match (selected, questions.get(current)) {
            (Some(text), Some(old)) => match old.index_of(text) {
                Some(index) => {
                    let prompt = self.term(old.prompt_term_id())?;
                    let slot = old.options()[index].slot;
                    Some(self.slot_text(prompt, slot, language)?.to_string())
                }
                None => None,
            },
            _ => None,
        };

        Ok(Translation {
            questions: translated,
            selected,
        })
    }

    /// Rebuild one question's option text in `language`, keeping slot order.
    ///
    /// Text is always derived from the full slot mapping, so a slot hidden by a
    /// collision in one language reappears in a language where it is distinct.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownTerm` for a dangling slot reference.
    pub fn translate_question(
        &self,
        question: &QuizQuestion,
        language: Language,
    ) -> Result<QuizQuestion, QuizError> {
        let prompt = self.term(question.prompt_term_id())?;
        let options = question
            .slots()
            .map(|slot| -> Result<AnswerOption, QuizError> {
                Ok(AnswerOption::new(self.slot_text(prompt, slot, language)?, slot))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let options = collapse_duplicates(options, prompt.id(), language);
        Ok(question.with_options(options)?)
    }

    fn term(&self, id: TermId) -> Result<&'a Term, QuizError> {
        self.corpus.get(id).ok_or(QuizError::UnknownTerm(id))
    }

    fn slot_text(
        &self,
        prompt: &'a Term,
        slot: OptionSlot,
        language: Language,
    ) -> Result<&'a str, QuizError> {
        match slot {
            OptionSlot::Correct => Ok(prompt.definition(language)),
            OptionSlot::Wrong(id) => Ok(self.term(id)?.definition(language)),
        }
    }
}
