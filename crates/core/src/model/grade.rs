use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::term::TermError;

/// Difficulty tier assigned to a term, always in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a validated grade.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidGrade` if `value` is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, TermError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TermError::InvalidGrade(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// All assignable grades, lowest first.
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN..=Self::MAX).map(Grade)
    }
}

impl TryFrom<u8> for Grade {
    type Error = TermError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.0)
    }
}

/// Grade filter used when selecting terms. `0` on the wire means "all grades".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GradeFilter {
    #[default]
    All,
    Only(Grade),
}

impl GradeFilter {
    /// Parses the numeric filter (`0` = all, `1..=5` = a single grade).
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidGrade` for values above 5.
    pub fn from_u8(value: u8) -> Result<Self, TermError> {
        if value == 0 {
            Ok(Self::All)
        } else {
            Grade::new(value).map(Self::Only)
        }
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::All => 0,
            Self::Only(grade) => grade.value(),
        }
    }

    #[must_use]
    pub fn matches(self, grade: Grade) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == grade,
        }
    }
}

impl TryFrom<u8> for GradeFilter {
    type Error = TermError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<GradeFilter> for u8 {
    fn from(filter: GradeFilter) -> Self {
        filter.as_u8()
    }
}

impl From<Grade> for GradeFilter {
    fn from(grade: Grade) -> Self {
        Self::Only(grade)
    }
}

impl fmt::Display for GradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All Grades"),
            Self::Only(grade) => write!(f, "{grade}"),
        }
    }
}
