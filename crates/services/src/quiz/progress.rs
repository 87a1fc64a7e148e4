use super::state::QuizState;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub answered: bool,
}

impl QuizProgress {
    /// Progress for a state with a live question list, `None` on the selection screen.
    #[must_use]
    pub fn from_state(state: &QuizState) -> Option<Self> {
        if !state.phase().has_session() {
            return None;
        }
        Some(Self {
            position: state.current_index() + 1,
            total: state.total(),
            score: state.score(),
            answered: state.answered(),
        })
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.position)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position >= self.total
    }
}
