//! Month-granularity date range
//!
//! `startDate` / `endDate` 都是 `YYYY-MM`。窗口从起始月第一毫秒
//! 到结束月最后一毫秒 (23:59:59.999)，结束月整月包含在内。

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use shared::models::SalesQuery;

use super::SalesError;
use crate::utils::time::{month_end_millis, month_start_millis};

/// Calendar month, `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl FromStr for YearMonth {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SalesError::InvalidRange(format!("'{s}' is not a YYYY-MM month"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive `[start, end]` in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_millis: i64,
    pub end_millis: i64,
}

impl TimeWindow {
    /// start > end: nothing can match
    pub fn is_empty(&self) -> bool {
        self.start_millis > self.end_millis
    }

    pub fn contains(&self, millis: i64) -> bool {
        self.start_millis <= millis && millis <= self.end_millis
    }
}

/// Validated month range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl MonthRange {
    /// Validate a query: both absent → `None`, one absent → error
    pub fn from_query(query: &SalesQuery) -> Result<Option<Self>, SalesError> {
        let start = non_blank(query.start_date.as_deref());
        let end = non_blank(query.end_date.as_deref());

        match (start, end) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(SalesError::InvalidRange(
                "endDate is required when startDate is given".to_string(),
            )),
            (None, Some(_)) => Err(SalesError::InvalidRange(
                "startDate is required when endDate is given".to_string(),
            )),
            (Some(start), Some(end)) => Ok(Some(Self {
                start: start.parse()?,
                end: end.parse()?,
            })),
        }
    }

    /// Window in the business timezone
    pub fn window(&self, tz: Tz) -> TimeWindow {
        // YearMonth guarantees month in 1..=12, so the helpers only fail
        // on chrono's year limits
        let start_millis = month_start_millis(self.start.year, self.start.month, tz)
            .unwrap_or(i64::MAX);
        let end_millis =
            month_end_millis(self.end.year, self.end.month, tz).unwrap_or(i64::MIN);
        TimeWindow {
            start_millis,
            end_millis,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
