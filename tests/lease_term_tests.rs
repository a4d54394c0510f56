use chrono::{Duration, NaiveDate, NaiveDateTime};
use lease_core::{
    errors::LeaseError,
    lease::{compute_end_date, end_date_from_input, extend_end_date, Frequency, LeaseTerm},
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn starts() -> Vec<NaiveDateTime> {
    vec![
        at(2024, 1, 1, 0, 0),
        at(2024, 1, 31, 8, 30),
        at(2023, 2, 28, 23, 59),
        at(2024, 2, 29, 12, 0),
        at(2025, 12, 31, 18, 45),
        at(1999, 8, 30, 6, 5),
    ]
}

#[test]
fn day_end_is_start_plus_days_minus_one_millisecond() {
    for start in starts() {
        for count in [1, 2, 7, 30, 365, 1000] {
            let end = compute_end_date(start, Frequency::Day, count).unwrap().unwrap();
            assert_eq!(
                end,
                start + Duration::days(i64::from(count)) - Duration::milliseconds(1)
            );
        }
    }
}

#[test]
fn month_end_clamps_into_leap_february() {
    // Jan 31 plus one month clamps to Feb 29; the inclusive end is the tick before it.
    let end = end_date_from_input("2024-01-31T00:00", "month", "1")
        .unwrap()
        .unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 2, 28)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap();
    assert_eq!(end, expected);
    assert_eq!(end + Duration::milliseconds(1), at(2024, 2, 29, 0, 0));
}

#[test]
fn month_end_clamps_in_common_year() {
    let end = compute_end_date(at(2023, 1, 31, 0, 0), Frequency::Month, 1)
        .unwrap()
        .unwrap();
    assert_eq!(end + Duration::milliseconds(1), at(2023, 2, 28, 0, 0));
}

#[test]
fn month_rolls_over_year_boundary() {
    let end = compute_end_date(at(2024, 11, 30, 9, 0), Frequency::Month, 3)
        .unwrap()
        .unwrap();
    assert_eq!(end + Duration::milliseconds(1), at(2025, 2, 28, 9, 0));
}

#[test]
fn year_equals_twelve_months() {
    for start in starts() {
        for years in [1, 2, 5, 30] {
            assert_eq!(
                compute_end_date(start, Frequency::Year, years).unwrap(),
                compute_end_date(start, Frequency::Month, years * 12).unwrap()
            );
        }
    }
}

#[test]
fn leap_day_plus_one_year_clamps_to_february_28() {
    let end = compute_end_date(at(2024, 2, 29, 0, 0), Frequency::Year, 1)
        .unwrap()
        .unwrap();
    assert_eq!(end + Duration::milliseconds(1), at(2025, 2, 28, 0, 0));
}

#[test]
fn invalid_input_is_not_computable() {
    assert_eq!(end_date_from_input("", "month", "5").unwrap(), None);
    assert_eq!(end_date_from_input("2024-01-01", "day", "0").unwrap(), None);
    assert_eq!(end_date_from_input("2024-01-01", "day", "-3").unwrap(), None);
    assert_eq!(end_date_from_input("2024-01-01", "day", "").unwrap(), None);
    assert_eq!(end_date_from_input("not a date", "week", "2").unwrap(), None);
}

#[test]
fn unsupported_frequency_is_reported() {
    let err = end_date_from_input("2024-01-01", "fortnight", "2").unwrap_err();
    assert!(matches!(err, LeaseError::UnsupportedFrequency(_)));
}

#[test]
fn repeated_calls_are_identical() {
    for frequency in Frequency::ALL {
        let first = end_date_from_input("2024-05-17 13:20", frequency.as_str(), "4").unwrap();
        let second = end_date_from_input("2024-05-17 13:20", frequency.as_str(), "4").unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}

#[test]
fn fixed_units_are_exact_offsets() {
    for start in starts() {
        assert_eq!(
            compute_end_date(start, Frequency::Hour, 24).unwrap(),
            compute_end_date(start, Frequency::Day, 1).unwrap()
        );
        assert_eq!(
            compute_end_date(start, Frequency::Minute, 60).unwrap(),
            compute_end_date(start, Frequency::Hour, 1).unwrap()
        );
        assert_eq!(
            compute_end_date(start, Frequency::Week, 2).unwrap(),
            compute_end_date(start, Frequency::Day, 14).unwrap()
        );
    }
}

#[test]
fn fractional_count_is_truncated() {
    assert_eq!(
        end_date_from_input("2024-01-01", "day", "2.9").unwrap(),
        end_date_from_input("2024-01-01", "day", "2").unwrap()
    );
}

#[test]
fn overflow_is_an_explicit_error() {
    let far = at(262_000, 1, 1, 0, 0);
    let err = compute_end_date(far, Frequency::Year, 1000).unwrap_err();
    assert!(matches!(err, LeaseError::DateOverflow(_)));

    let err = end_date_from_input("2024-01-01", "month", "99999999999").unwrap_err();
    assert!(matches!(err, LeaseError::DateOverflow(_)));
}

#[test]
fn extension_continues_from_the_next_period() {
    let current_end = compute_end_date(at(2024, 1, 31, 0, 0), Frequency::Month, 1)
        .unwrap()
        .unwrap();
    let extended = extend_end_date(current_end, Frequency::Month, 2)
        .unwrap()
        .unwrap();
    assert_eq!(extended + Duration::milliseconds(1), at(2024, 4, 29, 0, 0));
    assert_eq!(extend_end_date(current_end, Frequency::Month, 0).unwrap(), None);
}

#[test]
fn lease_term_exposes_derived_end_only() {
    let term = LeaseTerm::new(at(2024, 3, 10, 9, 0), Frequency::Week, 4).unwrap();
    assert_eq!(term.count(), 4);
    assert_eq!(term.frequency(), Frequency::Week);
    assert_eq!(
        term.end().unwrap(),
        at(2024, 4, 7, 9, 0) - Duration::milliseconds(1)
    );
}
