use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::AthError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// A validated end-of-data date.
///
/// The day is only checked against 1..=31, not the length of the month, so
/// `2021-02-31` is accepted. Field order makes the derived `Ord` agree with
/// the lexicographic order of the zero-padded `YYYY-MM-DD` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EodDate {
    year: i32,
    month: u32,
    day: u32,
}

impl EodDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
        {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// True if `date` falls on or before this date.
    pub fn includes(&self, date: NaiveDate) -> bool {
        (date.year(), date.month(), date.day()) <= (self.year, self.month, self.day)
    }
}

impl fmt::Display for EodDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for EodDate {
    type Err = AthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AthError::InvalidArgument(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(invalid());
        };
        let year = year.trim().parse::<i32>().map_err(|_| invalid())?;
        let month = month.trim().parse::<u32>().map_err(|_| invalid())?;
        let day = day.trim().parse::<u32>().map_err(|_| invalid())?;
        EodDate::new(year, month, day).ok_or_else(invalid)
    }
}

/// The last date to consider when scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateBoundary {
    /// Scan the whole series.
    #[default]
    Unbounded,
    /// Stop after this date (inclusive).
    Until(EodDate),
}

impl DateBoundary {
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            DateBoundary::Unbounded => true,
            DateBoundary::Until(eod) => eod.includes(date),
        }
    }
}

/// Validate an `--eod` value. Empty input means no boundary.
pub fn validate_eod(input: &str) -> Result<DateBoundary, AthError> {
    if input.is_empty() {
        return Ok(DateBoundary::Unbounded);
    }
    input.parse::<EodDate>().map(DateBoundary::Until)
}
