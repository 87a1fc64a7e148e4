use std::collections::HashSet;

use quiz_core::model::{
    AnswerOption, GradeFilter, Language, OptionSlot, QuizQuestion, QuizSettings, Term, TermCorpus,
};

use super::options::collapse_duplicates;
use crate::error::QuizError;
use crate::shuffle::{Permutation, permute};

/// Builds the question list for one session.
pub struct QuestionGenerator<'a> {
    corpus: &'a TermCorpus,
    settings: QuizSettings,
}

impl<'a> QuestionGenerator<'a> {
    #[must_use]
    pub fn new(corpus: &'a TermCorpus) -> Self {
        Self {
            corpus,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Generate up to `question_count` questions for the terms matching `filter`.
    ///
    /// Prompt terms are drawn from a uniform shuffle of the filtered set, each at
    /// most once. Distractors are drawn from the whole glossary.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoTermsForGrade` if no term matches the filter.
    pub fn generate(
        &self,
        filter: GradeFilter,
        language: Language,
        permutation: &mut dyn Permutation,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        let pool = self.corpus.by_grade(filter);
        if pool.is_empty() {
            return Err(QuizError::NoTermsForGrade { grade: filter });
        }

        let take = self.settings.question_count().min(pool.len());
        permute(permutation, pool)
            .into_iter()
            .take(take)
            .map(|prompt| self.question_for(prompt, language, permutation))
            .collect()
    }

    /// Build one question for `prompt`.
    ///
    /// The shuffled candidate pool is walked in order; a candidate is accepted
    /// only if its definition is non-empty and differs from every text accepted so
    /// far (starting with the correct answer). Fewer than the target number of
    /// distractors is fine when the glossary runs out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Question` if the assembled options break a question
    /// invariant.
    pub fn question_for(
        &self,
        prompt: &Term,
        language: Language,
        permutation: &mut dyn Permutation,
    ) -> Result<QuizQuestion, QuizError> {
        let correct = prompt.definition(language);
        let target = self.settings.wrong_answer_target();

        let candidates: Vec<&Term> = self
            .corpus
            .all()
            .iter()
            .filter(|term| term.id() != prompt.id())
            .collect();

        let mut accepted: HashSet<&str> = HashSet::from([correct]);
        let mut options = vec![AnswerOption::new(correct, OptionSlot::Correct)];
        for candidate in permute(permutation, candidates) {
            if options.len() > target {
                break;
            }
            let text = candidate.definition(language);
            if text.is_empty() || !accepted.insert(text) {
                continue;
            }
            options.push(AnswerOption::new(text, OptionSlot::Wrong(candidate.id())));
        }

        let options = collapse_duplicates(options, prompt.id(), language);
        let options = permute(permutation, options);
        Ok(QuizQuestion::new(prompt.id(), options)?)
    }
}
