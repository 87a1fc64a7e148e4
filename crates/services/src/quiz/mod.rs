mod generator;
mod options;
mod progress;
mod reducer;
mod session;
mod state;
mod translator;
mod view;

// Public API of the quiz subsystem.
pub use generator::QuestionGenerator;
pub use progress::QuizProgress;
pub use reducer::{QuizContext, reduce};
pub use session::QuizSession;
pub use state::{QuizCommand, QuizEvent, QuizPhase, QuizState};
pub use translator::{OptionTranslator, Translation};
pub use view::QuestionView;
