//! Worked time for a single day.
//!
//! A shift is `end - start - lunch`. Anything that does not produce a positive
//! span (missing times, a shift crossing midnight, a lunch break longer than the
//! shift) counts as zero rather than an error.

use rust_decimal::Decimal;

use crate::entities::clock_time::ClockTime;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Hours worked between two form-entered times, minus the lunch break.
///
/// ```
/// use rust_decimal::Decimal;
/// use timekeeper::payroll::duration::duration;
///
/// assert_eq!(duration("08:00", "17:00", 60), Decimal::from(8));
/// assert_eq!(duration("08:00", "08:30", 60), Decimal::ZERO);
/// assert_eq!(duration("", "17:00", 0), Decimal::ZERO);
/// ```
#[must_use]
pub fn duration(start: &str, end: &str, lunch_minutes: u32) -> Decimal {
    worked_hours(
        ClockTime::parse_lenient(start),
        ClockTime::parse_lenient(end),
        lunch_minutes,
    )
}

#[must_use]
pub fn worked_hours(
    start: Option<ClockTime>,
    end: Option<ClockTime>,
    lunch_minutes: u32,
) -> Decimal {
    minutes_to_hours(u64::from(worked_minutes(start, end, lunch_minutes)))
}

/// Worked minutes, clamped at zero.
#[must_use]
pub fn worked_minutes(
    start: Option<ClockTime>,
    end: Option<ClockTime>,
    lunch_minutes: u32,
) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };

    let raw = i64::from(end.minutes()) - i64::from(start.minutes()) - i64::from(lunch_minutes);
    u32::try_from(raw).unwrap_or(0)
}

/// Converts minutes to fractional hours without rounding.
#[must_use]
pub fn minutes_to_hours(minutes: u64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}
