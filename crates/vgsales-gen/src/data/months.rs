use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// A calendar month, rendered as `YYYY-MM` in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// First month of the default 36-month window.
pub const DEFAULT_WINDOW_START: YearMonth = YearMonth {
    year: 2023,
    month: 1,
};

/// Last year that still renders as four digits.
const MAX_YEAR: i32 = 9999;

impl YearMonth {
    pub fn new(year: i32, month: u32) -> GenResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(GenError::InvalidArgument(format!(
                "month {month} out of range (expected 1..=12)"
            )));
        }
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(GenError::InvalidArgument(format!(
                "year {year} out of range (expected 1..={MAX_YEAR})"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn parse(value: &str) -> GenResult<Self> {
        let invalid = || {
            GenError::InvalidArgument(format!("invalid year-month '{value}'; expected YYYY-MM"))
        };
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month, 1..=12.
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The month `offset` months later, or `None` past 9999-12.
    pub fn checked_add_months(self, offset: usize) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1);
        let target = index.checked_add(i64::try_from(offset).ok()?)?;
        let year = i32::try_from(target / 12).ok()?;
        if year > MAX_YEAR {
            return None;
        }
        Some(Self {
            year,
            month: (target % 12) as u32 + 1,
        })
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// `len` consecutive months starting at `start`, without gaps.
pub fn month_window(start: YearMonth, len: usize) -> Vec<YearMonth> {
    let mut out = Vec::with_capacity(len);
    let mut current = start;
    for _ in 0..len {
        out.push(current);
        current = current.succ();
    }
    out
}
