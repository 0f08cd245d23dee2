use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision.
///
/// Stored as minutes since midnight. `24:00` is accepted as the end of the day
/// so a shift can finish exactly at midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(0);
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Builds a time from hour and minute, or `None` if either is out of range.
    #[must_use]
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute > 0) {
            return None;
        }
        Some(Self(hour as u16 * 60 + minute as u16))
    }

    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes > MINUTES_PER_DAY {
            None
        } else {
            Some(Self(minutes))
        }
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Parses `H:MM`, `HH:MM` or `HH:MM:SS`, returning `None` for anything else,
    /// including the empty string. A single-digit minute is read as is, so
    /// `8:5` is 08:05.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
            return Err(format!("Expected HH:MM, got '{s}'"));
        };
        // seconds are accepted but dropped
        if let Some(seconds) = parts.next() {
            if seconds.parse::<u8>().map_or(true, |sec| sec > 59) {
                return Err(format!("Invalid seconds in '{s}'"));
            }
        }
        if parts.next().is_some() {
            return Err(format!("Too many components in '{s}'"));
        }

        let hour: u8 = hour
            .parse()
            .map_err(|_| format!("Invalid hour in '{s}'"))?;
        if minute.is_empty() || minute.len() > 2 {
            return Err(format!("Invalid minute in '{s}'"));
        }
        let minute: u8 = minute
            .parse()
            .map_err(|_| format!("Invalid minute in '{s}'"))?;

        Self::from_hm(hour, minute).ok_or_else(|| format!("Time out of range: '{s}'"))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<time::Time> for ClockTime {
    fn from(t: time::Time) -> Self {
        Self(u16::from(t.hour()) * 60 + u16::from(t.minute()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_input() {
        assert_eq!(ClockTime::parse_lenient("08:00"), ClockTime::from_hm(8, 0));
        assert_eq!(ClockTime::parse_lenient("8:30"), ClockTime::from_hm(8, 30));
        assert_eq!(ClockTime::parse_lenient(" 17:45 "), ClockTime::from_hm(17, 45));
        assert_eq!(ClockTime::parse_lenient("17:45:30"), ClockTime::from_hm(17, 45));
        assert_eq!(ClockTime::parse_lenient("24:00"), Some(ClockTime::END_OF_DAY));
        assert_eq!(ClockTime::parse_lenient("12:5"), ClockTime::from_hm(12, 5));
        assert_eq!(ClockTime::parse_lenient("8:5"), ClockTime::from_hm(8, 5));
    }

    #[test]
    fn rejects_malformed_input() {
        let inputs = [
            "", "8", "8h00", "25:00", "24:01", "12:60", "12:", "12:005", "ab:cd", "1:00:00:00",
        ];
        for input in inputs {
            assert_eq!(ClockTime::parse_lenient(input), None, "input {input:?}");
        }
    }

    #[test]
    fn displays_zero_padded() {
        let t = ClockTime::from_hm(7, 5).unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(t.minutes(), 425);
        assert_eq!(ClockTime::from(time::macros::time!(13:20)).to_string(), "13:20");
    }
}
