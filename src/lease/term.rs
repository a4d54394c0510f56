use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::Frequency;
use crate::{
    errors::{LeaseError, Result},
    utils::datetime::parse_wall_clock,
};

/// Gap between an exclusive period boundary and the inclusive end instant.
const INCLUSIVE_TICK_MS: i64 = 1;
const MONTHS_PER_YEAR: u32 = 12;

/// Inclusive end of a lease that starts at `start` and runs `count` periods of `frequency`.
///
/// Returns `Ok(None)` for a zero count. Month and year steps are calendar-aware and clamp
/// the day of month to the target month's length, so Jan 31 plus one month lands on the
/// last day of February. Results outside the representable date range are reported as
/// [`LeaseError::DateOverflow`].
pub fn compute_end_date(
    start: NaiveDateTime,
    frequency: Frequency,
    count: u32,
) -> Result<Option<NaiveDateTime>> {
    if count == 0 {
        return Ok(None);
    }
    advance(start, frequency, count)
        .and_then(|exclusive| {
            exclusive.checked_sub_signed(Duration::milliseconds(INCLUSIVE_TICK_MS))
        })
        .map(Some)
        .ok_or_else(|| overflow(start, frequency, count))
}

/// Same as [`compute_end_date`] but driven by raw form input.
///
/// A blank or malformed start, or a count that is not a finite number of at least one,
/// yields `Ok(None)`. Fractional counts are truncated. An unknown frequency is an error.
pub fn end_date_from_input(
    start: &str,
    frequency: &str,
    count: &str,
) -> Result<Option<NaiveDateTime>> {
    let frequency: Frequency = frequency.parse()?;
    let Some(start) = parse_wall_clock(start) else {
        return Ok(None);
    };
    match parse_count(count)? {
        Some(count) => compute_end_date(start, frequency, count),
        None => Ok(None),
    }
}

/// New inclusive end after adding `additional` periods to a lease ending at `current_end`.
///
/// Stored ends may be truncated to the minute (`23:59`) or exact (`23:59:59.999`); both
/// continue from the following whole minute.
pub fn extend_end_date(
    current_end: NaiveDateTime,
    frequency: Frequency,
    additional: u32,
) -> Result<Option<NaiveDateTime>> {
    let next_start = current_end
        .checked_add_signed(Duration::milliseconds(INCLUSIVE_TICK_MS))
        .and_then(ceil_to_minute)
        .ok_or_else(|| overflow(current_end, frequency, additional))?;
    compute_end_date(next_start, frequency, additional)
}

/// Reads a payment count the way a numeric form field does.
///
/// Non-numeric, non-finite and sub-one values give `Ok(None)`. Values too large for any
/// representable lease give [`LeaseError::DateOverflow`].
pub fn parse_count(raw: &str) -> Result<Option<u32>> {
    let Some(value) = count_value(raw) else {
        return Ok(None);
    };
    let whole = value.trunc();
    if whole > f64::from(u32::MAX) {
        return Err(LeaseError::DateOverflow(format!(
            "payment count {raw} is too large"
        )));
    }
    Ok(Some(whole as u32))
}

/// The numeric value of a count field, when it is a finite number of at least one.
pub(crate) fn count_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 1.0)
}

/// A validated lease term. The end date is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseTerm {
    start: NaiveDateTime,
    frequency: Frequency,
    count: u32,
}

impl LeaseTerm {
    pub fn new(start: NaiveDateTime, frequency: Frequency, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(LeaseError::InvalidInput(
                "payment count must be at least 1".into(),
            ));
        }
        Ok(Self {
            start,
            frequency,
            count,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn end(&self) -> Result<NaiveDateTime> {
        compute_end_date(self.start, self.frequency, self.count)?
            .ok_or_else(|| overflow(self.start, self.frequency, self.count))
    }
}

fn advance(start: NaiveDateTime, frequency: Frequency, count: u32) -> Option<NaiveDateTime> {
    let steps = i64::from(count);
    // Fixed-length steps can exceed the duration range before the date range.
    let fixed = |step: Option<Duration>| step.and_then(|delta| start.checked_add_signed(delta));
    match frequency {
        Frequency::Minute => fixed(Duration::try_minutes(steps)),
        Frequency::Hour => fixed(Duration::try_hours(steps)),
        Frequency::Day => fixed(Duration::try_days(steps)),
        Frequency::Week => fixed(Duration::try_weeks(steps)),
        Frequency::Month => shift_months(start, count),
        Frequency::Year => count
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|months| shift_months(start, months)),
    }
}

fn shift_months(date: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let month_index =
        i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day).map(|shifted| shifted.and_time(date.time()))
}

fn ceil_to_minute(value: NaiveDateTime) -> Option<NaiveDateTime> {
    let floor = value.with_second(0)?.with_nanosecond(0)?;
    if floor == value {
        Some(value)
    } else {
        floor.checked_add_signed(Duration::try_minutes(1)?)
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
}

fn overflow(start: NaiveDateTime, frequency: Frequency, count: u32) -> LeaseError {
    LeaseError::DateOverflow(format!(
        "{start} plus {count} {frequency} period(s) is outside the supported date range"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(at(2023, 1, 31, 9, 0), 1), Some(at(2023, 2, 28, 9, 0)));
        assert_eq!(shift_months(at(2024, 1, 31, 9, 0), 1), Some(at(2024, 2, 29, 9, 0)));
        assert_eq!(shift_months(at(2024, 3, 31, 0, 0), 1), Some(at(2024, 4, 30, 0, 0)));
        assert_eq!(shift_months(at(2024, 11, 15, 0, 0), 3), Some(at(2025, 2, 15, 0, 0)));
    }

    #[test]
    fn shift_months_keeps_original_day_across_short_months() {
        // Each call starts from the original day, so a 31st never drifts to the 28th.
        assert_eq!(shift_months(at(2024, 1, 31, 0, 0), 2), Some(at(2024, 3, 31, 0, 0)));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn ceil_to_minute_keeps_whole_minutes() {
        assert_eq!(ceil_to_minute(at(2024, 2, 29, 0, 0)), Some(at(2024, 2, 29, 0, 0)));
        let truncated_end = at(2024, 2, 28, 23, 59) + Duration::milliseconds(1);
        assert_eq!(ceil_to_minute(truncated_end), Some(at(2024, 2, 29, 0, 0)));
    }

    #[test]
    fn extension_from_minute_precision_end_matches_exact_end() {
        let exact = at(2024, 2, 29, 0, 0) - Duration::milliseconds(1);
        let truncated = at(2024, 2, 28, 23, 59);
        let expected = at(2024, 3, 29, 0, 0) - Duration::milliseconds(1);
        assert_eq!(extend_end_date(exact, Frequency::Month, 1).unwrap(), Some(expected));
        assert_eq!(extend_end_date(truncated, Frequency::Month, 1).unwrap(), Some(expected));
    }

    #[test]
    fn zero_count_is_not_computable() {
        assert_eq!(compute_end_date(at(2024, 1, 1, 0, 0), Frequency::Day, 0).unwrap(), None);
    }

    #[test]
    fn minute_end_is_one_tick_before_boundary() {
        let end = compute_end_date(at(2024, 1, 1, 10, 0), Frequency::Minute, 30)
            .unwrap()
            .unwrap();
        assert_eq!(end, at(2024, 1, 1, 10, 30) - Duration::milliseconds(1));
    }

    #[test]
    fn huge_year_count_overflows_explicitly() {
        let err = compute_end_date(at(2024, 1, 1, 0, 0), Frequency::Year, u32::MAX).unwrap_err();
        assert!(matches!(err, LeaseError::DateOverflow(_)));
        let err = compute_end_date(at(2024, 1, 1, 0, 0), Frequency::Day, u32::MAX).unwrap_err();
        assert!(matches!(err, LeaseError::DateOverflow(_)));
    }

    #[test]
    fn parse_count_mirrors_numeric_inputs() {
        assert_eq!(parse_count("12").unwrap(), Some(12));
        assert_eq!(parse_count(" 3 ").unwrap(), Some(3));
        assert_eq!(parse_count("2.7").unwrap(), Some(2));
        assert_eq!(parse_count("0").unwrap(), None);
        assert_eq!(parse_count("0.5").unwrap(), None);
        assert_eq!(parse_count("-4").unwrap(), None);
        assert_eq!(parse_count("").unwrap(), None);
        assert_eq!(parse_count("abc").unwrap(), None);
        assert_eq!(parse_count("inf").unwrap(), None);
        assert!(parse_count("1e12").is_err());
    }

    #[test]
    fn lease_term_rejects_zero_count() {
        assert!(LeaseTerm::new(at(2024, 1, 1, 0, 0), Frequency::Month, 0).is_err());
        let term = LeaseTerm::new(at(2024, 1, 1, 0, 0), Frequency::Month, 12).unwrap();
        assert_eq!(
            term.end().unwrap(),
            at(2025, 1, 1, 0, 0) - Duration::milliseconds(1)
        );
    }
}
