use std::collections::HashSet;

use quiz_core::model::{AnswerOption, Language, TermId};
use tracing::warn;

/// Drops options whose text repeats an earlier one, keeping slot alignment.
///
/// The correct option always survives: a distractor that reads the same as the
/// correct answer is removed even if it comes first. Removals are reported as a
/// `warn` event; the question simply ends up with fewer options.
pub(crate) fn collapse_duplicates(
    options: Vec<AnswerOption>,
    prompt: TermId,
    language: Language,
) -> Vec<AnswerOption> {
    let correct_text = options
        .iter()
        .find(|opt| opt.slot.is_correct())
        .map(|opt| opt.text.clone());

    let before = options.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    let mut kept = Vec::with_capacity(before);
    for opt in options {
        let shadows_correct =
            !opt.slot.is_correct() && correct_text.as_deref() == Some(opt.text.as_str());
        if shadows_correct || !seen.insert(opt.text.clone()) {
            continue;
        }
        kept.push(opt);
    }

    let removed = before - kept.len();
    if removed > 0 {
        warn!(
            prompt_term = %prompt,
            removed,
            language = %language,
            "collapsed duplicate option text"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::OptionSlot;

    fn wrong(id: u64, text: &str) -> AnswerOption {
        AnswerOption::new(text, OptionSlot::Wrong(TermId::new(id)))
    }

    #[test]
    fn distinct_options_pass_through() {
        let options = vec![
            AnswerOption::new("fast", OptionSlot::Correct),
            wrong(2, "slow"),
            wrong(3, "loud"),
        ];
        let kept = collapse_duplicates(options.clone(), TermId::new(1), Language::En);
        assert_eq!(kept, options);
    }

    #[test]
    fn later_duplicate_distractor_is_dropped() {
        let kept = collapse_duplicates(
            vec![
                AnswerOption::new("fast", OptionSlot::Correct),
                wrong(2, "slow"),
                wrong(3, "slow"),
            ],
            TermId::new(1),
            Language::Zh,
        );
        assert_eq!(
            kept,
            vec![AnswerOption::new("fast", OptionSlot::Correct), wrong(2, "slow")]
        );
    }

    #[test]
    fn correct_option_wins_even_when_listed_later() {
        let kept = collapse_duplicates(
            vec![
                wrong(2, "fast"),
                wrong(3, "loud"),
                AnswerOption::new("fast", OptionSlot::Correct),
            ],
            TermId::new(1),
            Language::En,
        );
        assert_eq!(
            kept,
            vec![wrong(3, "loud"), AnswerOption::new("fast", OptionSlot::Correct)]
        );
    }
}
