//! Calendar-month arithmetic shared by installment expansion and fixed-expense
//! generation. Days never roll forward into the following month: a date on the
//! 31st lands on the last day of a shorter target month.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};

/// Adds `delta` whole months to `(year, month)` and clamps `day` to the length of
/// the target month. `month` is 1-based. Negative deltas move backwards.
pub fn add_months(year: i32, month: u32, day: u32, delta: i32) -> (i32, u32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let target_year = index.div_euclid(12) as i32;
    let target_month = (index.rem_euclid(12) + 1) as u32;
    let target_day = day.min(days_in_month(target_year, target_month));
    (target_year, target_month, target_day)
}

/// Number of days in `month` (1-12) of `year`. Months outside that range have no days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// First and last day of `month` (1-12) in `year`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let target = YearMonth::new(year, month)?;
    Ok((target.first_day()?, target.last_day()?))
}

/// Shifts a calendar date by `delta` months using [`add_months`].
pub fn shift_months(date: NaiveDate, delta: i32) -> Result<NaiveDate> {
    let (year, month, day) = add_months(date.year(), date.month(), date.day(), delta);
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        FinanceError::Validation(format!(
            "shifting {} by {} months leaves the supported date range",
            date, delta
        ))
    })
}

/// A calendar month of a given year. Months are 1-based throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::Validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FinanceError::Validation(format!(
                "year {} is outside the supported range",
                year
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the date for `day` in this month, clamped to the month's length.
    pub fn clamped_day(&self, day: u32) -> Result<NaiveDate> {
        let day = day.clamp(1, self.days());
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or_else(|| {
            FinanceError::Validation(format!("{}-{:02} has no day {}", self.year, self.month, day))
        })
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        self.clamped_day(1)
    }

    pub fn last_day(&self) -> Result<NaiveDate> {
        self.clamped_day(self.days())
    }

    pub fn offset(&self, delta: i32) -> Self {
        let (year, month, _) = add_months(self.year, self.month, 1, delta);
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self> {
        let (year, month) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| FinanceError::Validation(format!("expected YYYY-MM, got `{}`", value)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| FinanceError::Validation(format!("invalid year `{}`", year)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| FinanceError::Validation(format!("invalid month `{}`", month)))?;
        YearMonth::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_31st_clamps_to_end_of_february() {
        assert_eq!(add_months(2024, 1, 31, 1), (2024, 2, 29));
        assert_eq!(add_months(2023, 1, 31, 1), (2023, 2, 28));
    }

    #[test]
    fn clamping_never_rolls_forward() {
        assert_eq!(add_months(2024, 3, 31, 1), (2024, 4, 30));
        assert_eq!(add_months(2024, 1, 30, 1), (2024, 2, 29));
        assert_eq!(add_months(2024, 1, 31, 2), (2024, 3, 31));
    }

    #[test]
    fn carries_into_next_and_previous_years() {
        assert_eq!(add_months(2024, 11, 15, 3), (2025, 2, 15));
        assert_eq!(add_months(2024, 12, 31, 1), (2025, 1, 31));
        assert_eq!(add_months(2024, 1, 31, -1), (2023, 12, 31));
        assert_eq!(add_months(2024, 3, 31, -1), (2024, 2, 29));
        assert_eq!(add_months(2024, 5, 10, -29), (2021, 12, 10));
        assert_eq!(add_months(2024, 5, 10, 0), (2024, 5, 10));
    }

    #[test]
    fn add_months_is_total_over_thirty_years_each_way() {
        for month in 1..=12 {
            for day in 1..=31 {
                for delta in -360..=360 {
                    let (year, m, d) = add_months(2000, month, day, delta);
                    assert!(
                        NaiveDate::from_ymd_opt(year, m, d).is_some(),
                        "invalid result for 2000-{month}-{day} + {delta}: {year}-{m}-{d}"
                    );
                    assert!(d <= day);
                }
            }
        }
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
    }

    #[test]
    fn month_bounds_cover_the_whole_month() {
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            )
        );
        assert!(month_bounds(2024, 13).is_err());
    }

    #[test]
    fn year_month_validates_and_clamps() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());

        let february = YearMonth::new(2025, 2).unwrap();
        assert_eq!(
            february.clamped_day(31).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(february.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!february.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert_eq!(february.offset(-2).to_string(), "2024-12");
        assert_eq!("2025-02".parse::<YearMonth>().unwrap(), february);
    }
}
