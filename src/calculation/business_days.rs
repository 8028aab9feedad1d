//! Business-day calendar.
//!
//! A business day is any Monday through Saturday; only Sundays are excluded.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Ordered iterator over the business days of one calendar month.
///
/// The iterator is `Clone`, so the sequence can be replayed any number of
/// times with identical results.
///
/// # Example
///
/// ```
/// use performance_engine::calculation::business_days;
/// use chrono::NaiveDate;
///
/// let days = business_days(2025, 8).unwrap();
/// assert_eq!(days.clone().count(), 26);
/// assert_eq!(days.clone().next(), NaiveDate::from_ymd_opt(2025, 8, 1));
/// ```
#[derive(Debug, Clone)]
pub struct BusinessDays {
    cursor: Option<NaiveDate>,
    month: u32,
}

impl Iterator for BusinessDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let current = self.cursor?;
            if current.month() != self.month {
                self.cursor = None;
                return None;
            }
            self.cursor = current.succ_opt();
            if is_business_day(current) {
                return Some(current);
            }
        }
    }
}

/// Returns the business days of `month` in `year`, in date order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] if the month is not 1 through 12 or
/// the year is outside the supported calendar range.
pub fn business_days(year: i32, month: u32) -> EngineResult<BusinessDays> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidPeriod { year, month })?;

    Ok(BusinessDays {
        cursor: Some(first),
        month,
    })
}

/// Returns the number of business days in `month` of `year`.
///
/// # Example
///
/// ```
/// use performance_engine::calculation::business_day_count;
///
/// assert_eq!(business_day_count(2025, 8).unwrap(), 26);
/// assert_eq!(business_day_count(2026, 2).unwrap(), 24);
/// ```
pub fn business_day_count(year: i32, month: u32) -> EngineResult<u32> {
    Ok(business_days(year, month)?.count() as u32)
}

/// Returns true unless `date` falls on a Sunday.
pub fn is_business_day(date: NaiveDate) -> bool {
    date.weekday() != Weekday::Sun
}
