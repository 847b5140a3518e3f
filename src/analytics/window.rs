//! Aggregation windows
//!
//! | filter        | window                                        |
//! |---------------|-----------------------------------------------|
//! | `today`       | [start of current day, now)                   |
//! | `yesterday`   | [start of previous day, start of current day) |
//! | `last_7_days` | [now - 7 days, now)                           |
//! | `YYYY-MM-DD`  | [that day, next day)                          |
//!
//! Days are UTC days. Explicit dates must be exactly `YYYY-MM-DD`; windows
//! that fall outside the representable range are rejected.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{OrderError, OrderResult};
use crate::utils::time::{day_start, format_date, one_day, start_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Yesterday,
    Last7Days,
    Day(NaiveDate),
}

impl FromStr for DateFilter {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        match s {
            "today" => Ok(DateFilter::Today),
            "yesterday" => Ok(DateFilter::Yesterday),
            "last_7_days" => Ok(DateFilter::Last7Days),
            other => parse_day(other).map(DateFilter::Day).ok_or_else(|| {
                OrderError::Validation(format!(
                    "invalid date format '{}', expected YYYY-MM-DD",
                    other
                ))
            }),
        }
    }
}

/// Strict `YYYY-MM-DD`; chrono alone would also take signed or longer years
fn parse_day(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl DateFilter {
    /// Resolve against the reference instant `now`
    pub fn window(&self, now: DateTime<Utc>) -> OrderResult<DateWindow> {
        let today = start_of_day(now);
        let window = match self {
            DateFilter::Today => Some(DateWindow { start: today, end: now }),
            DateFilter::Yesterday => today
                .checked_sub_signed(one_day())
                .map(|start| DateWindow { start, end: today }),
            DateFilter::Last7Days => now
                .checked_sub_signed(Duration::days(7))
                .map(|start| DateWindow { start, end: now }),
            DateFilter::Day(date) => {
                let start = day_start(*date);
                start
                    .checked_add_signed(one_day())
                    .map(|end| DateWindow { start, end })
            }
        };
        window.ok_or_else(|| OrderError::validation("date window is out of range"))
    }
}

/// Half-open instant range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts < self.end
    }

    /// `YYYY-MM-DD` label attached to every result row
    pub fn label(&self) -> String {
        format_date(&self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 11, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_named_filters() {
        let today = "today".parse::<DateFilter>().unwrap().window(now()).unwrap();
        assert_eq!(today.start, Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap());
        assert_eq!(today.end, now());

        let yesterday = "yesterday".parse::<DateFilter>().unwrap().window(now()).unwrap();
        assert_eq!(yesterday.start, Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
        assert_eq!(yesterday.end, Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap());

        let week = "last_7_days".parse::<DateFilter>().unwrap().window(now()).unwrap();
        assert_eq!(week.start, Utc.with_ymd_and_hms(2025, 1, 4, 15, 30, 0).unwrap());
        assert_eq!(week.label(), "2025-01-04");
    }

    #[test]
    fn test_explicit_day() {
        let window = "2025-01-10".parse::<DateFilter>().unwrap().window(now()).unwrap();
        assert!(window.contains(&Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 0).unwrap()));
        assert!(!window.contains(&Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap()));
        assert_eq!(window.label(), "2025-01-10");
    }

    #[test]
    fn test_invalid_dates_are_validation_errors() {
        let bad_inputs = [
            "not-a-date",
            "",
            "2025-13-01",
            "2025-02-30",
            "Today",
            "+262142-12-31",
            "262142-12-31",
            "99999-01-01",
            "2025-1-01",
            "+025-01-01",
        ];
        for bad in bad_inputs {
            let err = bad.parse::<DateFilter>().unwrap_err();
            assert!(matches!(err, OrderError::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn test_windows_past_the_calendar_edge_are_rejected() {
        let last_day = DateFilter::Day(NaiveDate::MAX).window(now());
        assert!(matches!(last_day, Err(OrderError::Validation(_))));

        let first_day = Utc.from_utc_datetime(&NaiveDate::MIN.and_time(chrono::NaiveTime::MIN));
        for filter in [DateFilter::Yesterday, DateFilter::Last7Days] {
            let window = filter.window(first_day);
            assert!(matches!(window, Err(OrderError::Validation(_))), "{filter:?}");
        }
    }
}
