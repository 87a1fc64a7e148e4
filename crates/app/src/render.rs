use std::io::{self, Write};

use quiz_core::model::{Grade, GradeFilter, Language, QuizSummary, ScoreBucket, Term, TermCorpus};
use services::{QuestionView, QuizProgress};

const OPTION_KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub fn grade_menu<W: Write>(
    out: &mut W,
    corpus: &TermCorpus,
    selected: GradeFilter,
    language: Language,
) -> io::Result<()> {
    writeln!(out, "Choose a grade ({language}):")?;
    let filters = std::iter::once(GradeFilter::All).chain(Grade::all().map(GradeFilter::Only));
    for filter in filters {
        let marker = if filter == selected { '>' } else { ' ' };
        writeln!(
            out,
            "{marker} g {}  {filter} ({} terms)",
            filter.as_u8(),
            corpus.count_by_grade(filter)
        )?;
    }
    writeln!(out, "  s  start  |  l  language  |  q  quit")
}

pub fn question<W: Write>(out: &mut W, view: &QuestionView, progress: &QuizProgress) -> io::Result<()> {
    writeln!(
        out,
        "Question {}/{}   score {}   {} · {}",
        progress.position, progress.total, progress.score, view.grade, view.category
    )?;
    let abbreviation = view
        .abbreviation
        .as_deref()
        .map(|abbr| format!(" ({abbr})"))
        .unwrap_or_default();
    writeln!(out, "  {}{abbreviation}   {}", view.term, view.term_secondary)?;
    writeln!(out)?;

    for (i, text) in view.options.iter().enumerate() {
        let key = OPTION_KEYS.get(i).copied().unwrap_or('?');
        let selected = view.selected_index == Some(i);
        let mark = match view.correct_index {
            Some(correct) if correct == i => "✓",
            Some(_) if selected => "✗",
            _ if selected => "*",
            _ => " ",
        };
        writeln!(out, " {mark} {key}. {text}")?;
    }

    match view.is_correct() {
        Some(true) => writeln!(out, "\nCorrect!")?,
        Some(false) => writeln!(out, "\nNot quite.")?,
        None => {}
    }
    if let Some(example) = &view.example {
        writeln!(out, "Note: {example}")?;
    }
    Ok(())
}

pub fn summary<W: Write>(out: &mut W, summary: &QuizSummary) -> io::Result<()> {
    let message = match summary.bucket() {
        ScoreBucket::Excellent => "Excellent work!",
        ScoreBucket::Good => "Good job, keep it up.",
        ScoreBucket::KeepPracticing => "Keep practicing!",
    };
    let elapsed = summary.completed_at() - summary.started_at();
    writeln!(
        out,
        "Quiz complete: {}/{} ({:.0}%) in {}s",
        summary.score(),
        summary.total(),
        summary.percentage(),
        elapsed.num_seconds()
    )?;
    writeln!(out, "{message}")?;
    writeln!(out, "  r  retry  |  g <0-5>  change grade  |  x  grades  |  q  quit")
}

pub fn term_line(term: &Term, language: Language) -> String {
    let abbreviation = term
        .abbreviation()
        .map(|abbr| format!(" ({abbr})"))
        .unwrap_or_default();
    format!(
        "[{}] {}{abbreviation} / {}: {}",
        term.grade().value(),
        term.term_text(language),
        term.term_text(language.toggled()),
        term.definition(language)
    )
}
