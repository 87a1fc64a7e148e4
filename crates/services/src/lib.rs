#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod shuffle;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quiz::{
    OptionTranslator, QuestionGenerator, QuestionView, QuizCommand, QuizContext, QuizEvent,
    QuizPhase, QuizProgress, QuizSession, QuizState, Translation, reduce,
};
pub use shuffle::{FisherYates, IdentityPermutation, Permutation, ScriptedPermutation, permute};
