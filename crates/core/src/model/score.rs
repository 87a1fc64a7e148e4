use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("a quiz summary needs at least one question")]
    EmptyQuiz,

    #[error("score ({score}) exceeds question count ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

//
// ─── SCORE TRACKER ─────────────────────────────────────────────────────────────
//

/// Running tally of submitted answers for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    correct: u32,
    submitted: u32,
}

impl ScoreTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one submitted answer.
    pub fn record(&mut self, correct: bool) {
        self.submitted = self.submitted.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn submitted(&self) -> u32 {
        self.submitted
    }
}

//
// ─── BUCKETS ───────────────────────────────────────────────────────────────────
//

/// Feedback tier for a finished quiz. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    /// 80% and above.
    Excellent,
    /// 60% up to (not including) 80%.
    Good,
    KeepPracticing,
}

impl ScoreBucket {
    /// Buckets `score / total` without floating point rounding at the boundaries.
    #[must_use]
    pub fn from_score(score: u32, total: u32) -> Self {
        let scaled = u64::from(score) * 100;
        let total = u64::from(total);
        if scaled >= 80 * total {
            ScoreBucket::Excellent
        } else if scaled >= 60 * total {
            ScoreBucket::Good
        } else {
            ScoreBucket::KeepPracticing
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreBucket::Excellent => "excellent",
            ScoreBucket::Good => "good",
            ScoreBucket::KeepPracticing => "keep practicing",
        }
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Completion summary for a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    score: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// # Errors
    ///
    /// Returns `SummaryError::EmptyQuiz` when `total` is zero,
    /// `SummaryError::ScoreExceedsTotal` when `score > total`, and
    /// `SummaryError::InvalidTimeRange` when `completed_at` precedes `started_at`.
    pub fn new(
        score: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if total == 0 {
            return Err(SummaryError::EmptyQuiz);
        }
        if score > total {
            return Err(SummaryError::ScoreExceedsTotal { score, total });
        }
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        Ok(Self {
            score,
            total,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        f64::from(self.score) * 100.0 / f64::from(self.total)
    }

    #[must_use]
    pub fn bucket(&self) -> ScoreBucket {
        ScoreBucket::from_score(self.score, self.total)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
