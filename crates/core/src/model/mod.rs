mod corpus;
mod grade;
mod ids;
mod language;
mod question;
mod score;
mod settings;
mod term;

pub use ids::{ParseIdError, TermId};

pub use corpus::{CorpusError, TermCorpus};
pub use grade::{Grade, GradeFilter};
pub use language::{Language, LanguageError};
pub use question::{AnswerOption, OptionSlot, QuestionError, QuizQuestion};
pub use score::{QuizSummary, ScoreBucket, ScoreTracker, SummaryError};
pub use settings::{QuizSettings, QuizSettingsError};
pub use term::{Term, TermDraft, TermError};
