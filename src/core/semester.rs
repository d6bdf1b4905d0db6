//! Semester model
//!
//! An academic term is identified by its year and a period (first or second
//! half of the year). Terms are compared and subtracted through a linear
//! index, `year * 2 + (period - 1)`, so consecutive terms are always exactly
//! one step apart, including across the year boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Half of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// First half of the year (`.1`)
    First,
    /// Second half of the year (`.2`)
    Second,
}

impl Period {
    /// Numeric form used in `YYYY.P` text (1 or 2)
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl TryFrom<i64> for Period {
    type Error = SemesterParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(SemesterParseError::PeriodOutOfRange(other)),
        }
    }
}

/// Reasons a `YYYY.P` string is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemesterParseError {
    /// Splitting on `.` did not produce exactly two parts
    WrongShape {
        /// Number of parts found
        parts: usize,
    },
    /// The year segment is not a base-10 integer
    InvalidYear(String),
    /// The period segment is not a base-10 integer
    InvalidPeriod(String),
    /// The period is an integer other than 1 or 2
    PeriodOutOfRange(i64),
}

impl fmt::Display for SemesterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongShape { parts } => {
                write!(f, "expected YYYY.P with a single '.', found {parts} part(s)")
            }
            Self::InvalidYear(year) => write!(f, "year '{year}' is not an integer"),
            Self::InvalidPeriod(period) => write!(f, "period '{period}' is not an integer"),
            Self::PeriodOutOfRange(period) => write!(f, "period must be 1 or 2, got {period}"),
        }
    }
}

impl std::error::Error for SemesterParseError {}

/// An academic term: a year and the half of that year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semester {
    year: i64,
    period: Period,
}

impl Semester {
    /// Create a semester from its year and period
    #[must_use]
    pub const fn new(year: i64, period: Period) -> Self {
        Self { year, period }
    }

    /// Calendar year of the term
    #[must_use]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Period within the year
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Parse `YYYY.P` text into a semester
    ///
    /// # Errors
    /// Returns a [`SemesterParseError`] when the text does not have exactly one
    /// `.`, when either segment is not an integer, or when the period is not 1 or 2.
    pub fn parse(text: &str) -> Result<Self, SemesterParseError> {
        let parts: Vec<&str> = text.split('.').collect();
        let [year, period] = parts.as_slice() else {
            return Err(SemesterParseError::WrongShape { parts: parts.len() });
        };

        let year = year
            .parse::<i64>()
            .map_err(|_| SemesterParseError::InvalidYear((*year).to_string()))?;
        let period = period
            .parse::<i64>()
            .map_err(|_| SemesterParseError::InvalidPeriod((*period).to_string()))
            .and_then(Period::try_from)?;

        Ok(Self::new(year, period))
    }

    /// Linear index of the term: `year * 2 + (period - 1)`
    ///
    /// Computed in `i128`, which holds the index of every `i64` year.
    #[must_use]
    pub fn index(&self) -> i128 {
        i128::from(self.year) * 2 + i128::from(self.period.number()) - 1
    }

    /// The term immediately after this one
    ///
    /// `i64::MAX.2` has no successor and is returned unchanged; every other
    /// term advances the index by exactly one.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self.period {
            Period::First => Self::new(self.year, Period::Second),
            Period::Second => match self.year.checked_add(1) {
                Some(year) => Self::new(year, Period::First),
                None => *self,
            },
        }
    }

    /// The term immediately before this one
    ///
    /// `i64::MIN.1` has no predecessor and is returned unchanged.
    #[must_use]
    pub const fn previous(&self) -> Self {
        match self.period {
            Period::First => match self.year.checked_sub(1) {
                Some(year) => Self::new(year, Period::Second),
                None => *self,
            },
            Period::Second => Self::new(self.year, Period::First),
        }
    }

    /// The term a calendar date falls in (January–June is period 1)
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let period = if date.month() > 6 {
            Period::Second
        } else {
            Period::First
        };
        Self::new(i64::from(date.year()), period)
    }

    /// The term of today's local date
    #[must_use]
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }
}

/// Number of terms strictly between `start` and `end`
///
/// Both endpoints are excluded. The result is negative when `end` is not at
/// least one term after `start`; callers decide what a negative gap means.
#[must_use]
pub fn distance_between(start: Semester, end: Semester) -> i128 {
    end.index() - start.index() - 1
}

/// Parse `YYYY.P` text; see [`Semester::parse`]
///
/// # Errors
/// Returns a [`SemesterParseError`] for malformed text.
pub fn parse_semester(text: &str) -> Result<Semester, SemesterParseError> {
    Semester::parse(text)
}

impl Ord for Semester {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.year, self.period.number())
    }
}

impl FromStr for Semester {
    type Err = SemesterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Semester {
    type Error = SemesterParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Semester> for String {
    fn from(semester: Semester) -> Self {
        semester.to_string()
    }
}
