use tracing::debug;

use quiz_core::Clock;
use quiz_core::model::{GradeFilter, Language, QuizSettings, QuizSummary, ScoreTracker, TermCorpus};

use super::generator::QuestionGenerator;
use super::state::{QuizCommand, QuizEvent, QuizPhase, QuizState};
use super::translator::OptionTranslator;
use crate::error::QuizError;
use crate::shuffle::Permutation;

/// Collaborators a command may need: the glossary, sizing, randomness and time.
pub struct QuizContext<'a> {
    pub corpus: &'a TermCorpus,
    pub settings: QuizSettings,
    pub permutation: &'a mut dyn Permutation,
    pub clock: Clock,
}

/// Apply one command to a quiz state.
///
/// On success the new state is returned with the event describing the
/// transition. On failure the input state is handed back untouched.
pub fn reduce(
    state: QuizState,
    command: QuizCommand,
    ctx: &mut QuizContext<'_>,
) -> (QuizState, Result<QuizEvent, QuizError>) {
    match apply(&state, command, ctx) {
        Ok((next, event)) => (next, Ok(event)),
        Err(err) => {
            debug!(error = %err, phase = ?state.phase, "quiz command rejected");
            (state, Err(err))
        }
    }
}

fn apply(
    state: &QuizState,
    command: QuizCommand,
    ctx: &mut QuizContext<'_>,
) -> Result<(QuizState, QuizEvent), QuizError> {
    let name = command.name();
    let reject = || QuizError::InvalidCommand {
        command: name,
        phase: state.phase,
    };

    match command {
        QuizCommand::StartSession(grade) => match state.phase {
            QuizPhase::GradeSelection => fresh_session(state, grade, ctx),
            _ => Err(reject()),
        },
        QuizCommand::SelectAnswer(text) => match state.phase {
            QuizPhase::QuestionActive | QuizPhase::AnswerRevealed => select_answer(state, text),
            _ => Err(reject()),
        },
        QuizCommand::SubmitAnswer => match state.phase {
            QuizPhase::QuestionActive => submit_answer(state),
            _ => Err(reject()),
        },
        QuizCommand::NextQuestion => match state.phase {
            QuizPhase::AnswerRevealed => next_question(state, ctx.clock),
            _ => Err(reject()),
        },
        QuizCommand::ChangeLanguage(language) => change_language(state, language, ctx.corpus),
        QuizCommand::ChangeGrade(grade) => match state.phase {
            QuizPhase::GradeSelection | QuizPhase::Completed => Ok((
                QuizState::new(grade, state.language),
                QuizEvent::GradeChosen { grade },
            )),
            QuizPhase::QuestionActive | QuizPhase::AnswerRevealed => {
                fresh_session(state, grade, ctx)
            }
        },
        QuizCommand::Retry => match state.phase {
            QuizPhase::Completed => fresh_session(state, state.grade, ctx),
            _ => Err(reject()),
        },
        QuizCommand::ExitToSelection => match state.phase {
            QuizPhase::GradeSelection => Err(reject()),
            _ => Ok((
                QuizState::new(state.grade, state.language),
                QuizEvent::ReturnedToSelection,
            )),
        },
    }
}

fn fresh_session(
    state: &QuizState,
    grade: GradeFilter,
    ctx: &mut QuizContext<'_>,
) -> Result<(QuizState, QuizEvent), QuizError> {
    let questions = QuestionGenerator::new(ctx.corpus)
        .with_settings(ctx.settings)
        .generate(grade, state.language, &mut *ctx.permutation)?;
    let total = questions.len();
    debug!(%grade, total, language = %state.language, "quiz session generated");

    let next = QuizState {
        phase: QuizPhase::QuestionActive,
        grade,
        language: state.language,
        questions,
        current: 0,
        selected: None,
        answered: false,
        score: ScoreTracker::new(),
        started_at: Some(ctx.clock.now()),
        completed_at: None,
    };
    Ok((next, QuizEvent::SessionStarted { total }))
}

fn select_answer(state: &QuizState, text: String) -> Result<(QuizState, QuizEvent), QuizError> {
    if state.answered {
        return Ok((state.clone(), QuizEvent::Unchanged));
    }
    let index = state
        .current_question()
        .and_then(|q| q.index_of(&text))
        .ok_or_else(|| QuizError::UnknownOption { text: text.clone() })?;

    let mut next = state.clone();
    next.selected = Some(text);
    Ok((next, QuizEvent::AnswerSelected { index }))
}

fn submit_answer(state: &QuizState) -> Result<(QuizState, QuizEvent), QuizError> {
    let Some(selected) = state.selected.as_deref() else {
        return Err(QuizError::NoSelectionOnSubmit);
    };
    let correct = state
        .current_question()
        .is_some_and(|q| q.is_correct_answer(selected));

    let mut next = state.clone();
    next.score.record(correct);
    next.answered = true;
    next.phase = QuizPhase::AnswerRevealed;
    let score = next.score.score();
    Ok((next, QuizEvent::AnswerSubmitted { correct, score }))
}

fn next_question(state: &QuizState, clock: Clock) -> Result<(QuizState, QuizEvent), QuizError> {
    let mut next = state.clone();

    if state.current + 1 < state.questions.len() {
        next.current += 1;
        next.selected = None;
        next.answered = false;
        next.phase = QuizPhase::QuestionActive;
        let index = next.current;
        return Ok((next, QuizEvent::Advanced { index }));
    }

    let completed_at = clock.now();
    let total = u32::try_from(state.questions.len()).unwrap_or(u32::MAX);
    let summary = QuizSummary::new(
        state.score.score(),
        total,
        state.started_at.unwrap_or(completed_at),
        completed_at,
    )?;
    debug!(score = summary.score(), total, "quiz session completed");

    next.phase = QuizPhase::Completed;
    next.completed_at = Some(completed_at);
    Ok((next, QuizEvent::Completed(summary)))
}

fn change_language(
    state: &QuizState,
    language: Language,
    corpus: &TermCorpus,
) -> Result<(QuizState, QuizEvent), QuizError> {
    let mut next = state.clone();
    next.language = language;

    if state.phase.has_session() {
        let translation = OptionTranslator::new(corpus).translate(
            &state.questions,
            state.current,
            state.selected.as_deref(),
            language,
        )?;
        next.questions = translation.questions;
        next.selected = translation.selected;
        debug!(%language, questions = next.questions.len(), "quiz options translated");
    }

    Ok((next, QuizEvent::LanguageChanged { language }))
}
