use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// Fiscal months in reporting order, April first.
pub const FISCAL_MONTHS: [&str; 12] = [
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "January",
    "February",
    "March",
];

const FIRST_FISCAL_MONTH: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalParseError(pub String);

impl fmt::Display for FiscalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid financial year {:?}, expected YYYY-YY", self.0)
    }
}

impl std::error::Error for FiscalParseError {}

/// April-to-March period written `YYYY-YY`, e.g. `2025-26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= FIRST_FISCAL_MONTH {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    pub fn start_year(self) -> i32 {
        self.start_year
    }

    pub fn end_year(self) -> i32 {
        self.start_year + 1
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::containing(date) == self
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, self.end_year().rem_euclid(100))
    }
}

impl FromStr for FinancialYear {
    type Err = FiscalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FiscalParseError(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }
        let start_year = start.parse::<i32>().map_err(|_| invalid())?;
        let end_suffix = end.parse::<i32>().map_err(|_| invalid())?;
        if (start_year + 1).rem_euclid(100) != end_suffix {
            return Err(invalid());
        }
        Ok(Self::starting(start_year))
    }
}

/// Parses the `DD-MM-YYYY` creation date used by survey records.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d-%m-%Y").ok()
}

pub fn calendar_month_name(date: NaiveDate) -> &'static str {
    let idx = (date.month0() + 12 - (FIRST_FISCAL_MONTH - 1)) % 12;
    FISCAL_MONTHS[idx as usize]
}
