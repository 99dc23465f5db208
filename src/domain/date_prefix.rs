//! Year-month filter parsing and the rolling exclusion window

use crate::error::{ReportError, Result};
use chrono::{Duration, NaiveDate};

/// Number of trailing days that are never reported on.
pub const EXCLUSION_WINDOW_DAYS: i64 = 30;

/// A year-month filter given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Parse `YYYYMM` or `YYYY-MM`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !trimmed.is_ascii() {
            return Err(ReportError::InvalidDatePrefix(input.to_string()));
        }

        let (year_str, month_str) = match trimmed.len() {
            6 => (&trimmed[..4], &trimmed[4..]),
            7 if trimmed.as_bytes()[4] == b'-' => (&trimmed[..4], &trimmed[5..]),
            _ => return Err(ReportError::InvalidDatePrefix(input.to_string())),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year_str) || !all_digits(month_str) {
            return Err(ReportError::InvalidDatePrefix(input.to_string()));
        }

        let year: i32 = year_str
            .parse()
            .map_err(|_| ReportError::InvalidDatePrefix(input.to_string()))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| ReportError::InvalidDatePrefix(input.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidDatePrefix(input.to_string()));
        }

        Ok(YearMonth { year, month })
    }

    /// SQL `LIKE` pattern matching publish timestamps within this month
    pub fn like_pattern(&self) -> String {
        format!("{:04}-{:02}-%", self.year, self.month)
    }
}

/// First day that is still inside the exclusion window.
///
/// Posts must be published strictly before this date to be reported.
pub fn exclusion_cutoff(today: NaiveDate) -> NaiveDate {
    today - Duration::days(EXCLUSION_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        let ym = YearMonth::parse("202401").unwrap();
        assert_eq!(ym, YearMonth { year: 2024, month: 1 });
        assert_eq!(ym.like_pattern(), "2024-01-%");
    }

    #[test]
    fn test_parse_dashed() {
        let ym = YearMonth::parse("2023-11").unwrap();
        assert_eq!(ym.like_pattern(), "2023-11-%");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "2024", "2024011", "2024/01", "abcdef", "202413", "202400", "2024-1a"] {
            match YearMonth::parse(bad) {
                Err(ReportError::InvalidDatePrefix(s)) => assert_eq!(s, bad),
                other => panic!("Expected InvalidDatePrefix for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_exclusion_cutoff() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            exclusion_cutoff(today),
            NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()
        );
    }
}
