use std::fmt;
use std::io::{self, BufRead, Write};

use quiz_core::model::GradeFilter;
use services::{QuizError, QuizEvent, QuizPhase, QuizSession};
use tracing::debug;

use crate::render;

pub const HELP: &str = "\
Commands:
  1-9      select an option
  s        submit (or start, on the grade screen)
  n        next question
  l        switch language
  g <0-5>  change grade (0 = all)
  r        retry after finishing
  x        back to grade selection
  q        quit";

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Select(usize),
    Submit,
    Next,
    ToggleLanguage,
    Grade(GradeFilter),
    Retry,
    Exit,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Unknown(String),
    MissingGrade,
    InvalidGrade(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Unknown(raw) => write!(f, "unknown command: {raw} (h for help)"),
            InputError::MissingGrade => write!(f, "g requires a grade between 0 and 5"),
            InputError::InvalidGrade(raw) => write!(f, "invalid grade: {raw}"),
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let input = match head {
        "s" => Input::Submit,
        "n" => Input::Next,
        "l" => Input::ToggleLanguage,
        "r" => Input::Retry,
        "x" => Input::Exit,
        "q" => Input::Quit,
        "h" | "?" => Input::Help,
        "g" => {
            let raw = words.next().ok_or(InputError::MissingGrade)?;
            let grade = raw
                .parse::<u8>()
                .ok()
                .and_then(|value| GradeFilter::from_u8(value).ok())
                .ok_or_else(|| InputError::InvalidGrade(raw.to_string()))?;
            Input::Grade(grade)
        }
        digit => match digit.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Select(n - 1),
            _ => return Err(InputError::Unknown(line.trim().to_string())),
        },
    };
    Ok(input)
}

/// Drive `quiz` from line-oriented `input` until `q` or end of input.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails. Rejected quiz
/// commands are reported on `out` and do not stop the loop.
pub fn play<R: BufRead, W: Write>(quiz: &mut QuizSession, input: R, out: &mut W) -> io::Result<()> {
    write_screen(quiz, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let action = match parse_input(&line) {
            Ok(action) => action,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        match action {
            Input::Quit => break,
            Input::Help => writeln!(out, "{HELP}")?,
            action => match apply(quiz, action) {
                Ok(event) => {
                    debug!(?event, "command applied");
                    write_screen(quiz, out)?;
                }
                Err(err) => writeln!(out, "! {err}")?,
            },
        }
    }
    Ok(())
}

fn apply(quiz: &mut QuizSession, action: Input) -> Result<QuizEvent, QuizError> {
    let on_grade_screen = quiz.phase() == QuizPhase::GradeSelection;
    match action {
        Input::Select(index) => quiz.select_index(index),
        Input::Submit if on_grade_screen => quiz.start(quiz.grade()),
        Input::Submit => quiz.submit(),
        Input::Next => quiz.next(),
        Input::ToggleLanguage => quiz.toggle_language(),
        Input::Grade(grade) if on_grade_screen => {
            quiz.change_grade(grade)?;
            quiz.start(grade)
        }
        Input::Grade(grade) => quiz.change_grade(grade),
        Input::Retry => quiz.retry(),
        Input::Exit => quiz.exit(),
        Input::Quit | Input::Help => Ok(QuizEvent::Unchanged),
    }
}

fn write_screen<W: Write>(quiz: &QuizSession, out: &mut W) -> io::Result<()> {
    match quiz.phase() {
        QuizPhase::GradeSelection => {
            render::grade_menu(out, quiz.corpus(), quiz.grade(), quiz.language())?
        }
        QuizPhase::QuestionActive | QuizPhase::AnswerRevealed => {
            if let (Some(view), Some(progress)) = (quiz.current_question(), quiz.progress()) {
                render::question(out, &view, &progress)?;
            }
        }
        QuizPhase::Completed => {
            if let Some(summary) = quiz.summary() {
                render::summary(out, &summary)?;
            }
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::Clock;
    use quiz_core::model::{Grade, TermCorpus, TermDraft, TermId};
    use quiz_core::time::fixed_now;
    use services::IdentityPermutation;

    fn quiz() -> QuizSession {
        let terms = [("Allegro", "fast", "快"), ("Adagio", "slow", "慢"), ("Forte", "loud", "响")]
            .into_iter()
            .zip(1..)
            .map(|((term, en, zh), id)| {
                TermDraft {
                    term: term.into(),
                    term_secondary: format!("{term}-zh"),
                    definition: en.into(),
                    definition_secondary: zh.into(),
                    category: "Tempo".into(),
                    grade: 1,
                    ..TermDraft::default()
                }
                .validate(TermId::new(id))
                .unwrap()
            })
            .collect();
        QuizSession::new(Arc::new(TermCorpus::new(terms).unwrap()))
            .with_permutation(IdentityPermutation)
            .with_clock(Clock::fixed(fixed_now()))
    }

    fn run(script: &str) -> String {
        let mut quiz = quiz();
        let mut out = Vec::new();
        play(&mut quiz, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("2"), Ok(Input::Select(1)));
        assert_eq!(parse_input(" s "), Ok(Input::Submit));
        assert_eq!(parse_input("g 0"), Ok(Input::Grade(GradeFilter::All)));
        assert_eq!(
            parse_input("g 3"),
            Ok(Input::Grade(GradeFilter::Only(Grade::new(3).unwrap())))
        );
        assert_eq!(parse_input("g"), Err(InputError::MissingGrade));
        assert_eq!(parse_input("g 9"), Err(InputError::InvalidGrade("9".into())));
        assert_eq!(parse_input("0"), Err(InputError::Unknown("0".into())));
        assert_eq!(parse_input("dance"), Err(InputError::Unknown("dance".into())));
    }

    #[test]
    fn perfect_run_reaches_summary() {
        let out = run("s\n1\ns\nn\n1\ns\nn\n1\ns\nn\nq\n");
        assert!(out.contains("Choose a grade"));
        assert!(out.contains("Question 1/3"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Quiz complete: 3/3 (100%)"));
    }

    #[test]
    fn rejected_commands_are_reported() {
        let out = run("s\ns\nn\nq\n");
        assert!(out.contains("! no answer selected"));
        assert!(out.contains("! next_question is not allowed while QuestionActive"));
    }

    #[test]
    fn language_toggle_rerenders_options() {
        let out = run("g 1\n2\nl\nq\n");
        assert!(out.contains(" * 2. 慢"));
        assert!(out.contains("Allegro-zh"));
    }
}
