use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Duration, Month};

use crate::entities::DailyRecord;

/// A calendar month, the period payroll is reported over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first_day: Date,
}

impl Period {
    /// The month `month` of `year`, or `None` if the year is out of range.
    #[must_use]
    pub fn new(year: i32, month: Month) -> Option<Self> {
        Date::from_calendar_date(year, month, 1)
            .ok()
            .map(|first_day| Self { first_day })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: Date) -> Self {
        Self {
            first_day: date.replace_day(1).unwrap_or(date),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(self) -> Month {
        self.first_day.month()
    }

    #[must_use]
    pub fn first_day(self) -> Date {
        self.first_day
    }

    #[must_use]
    pub fn last_day(self) -> Date {
        self.first_day
            .saturating_add(Duration::days(i64::from(self.len_days()) - 1))
    }

    #[must_use]
    pub fn len_days(self) -> u8 {
        time::util::days_in_year_month(self.year(), self.month())
    }

    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Every date of the month, in order.
    pub fn days(self) -> impl Iterator<Item = Date> {
        let first_day = self.first_day;
        (0..i64::from(self.len_days()))
            .map(move |offset| first_day.saturating_add(Duration::days(offset)))
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.last_day().next_day().map(Self::of)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.first_day.previous_day().map(Self::of)
    }

    /// Keeps the records dated within this month.
    pub fn filter<'a, I>(self, records: I) -> impl Iterator<Item = &'a DailyRecord>
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        records
            .into_iter()
            .filter(move |record| self.contains(record.date))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Expected YYYY-MM, got '{s}'"))?;
        let year: i32 = year.parse().map_err(|_| format!("Invalid year in '{s}'"))?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| format!("Invalid month in '{s}'"))?;

        Self::new(year, month).ok_or_else(|| format!("Year out of range in '{s}'"))
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn month_bounds() {
        let feb = Period::new(2024, Month::February).unwrap();
        assert_eq!(feb.first_day(), date!(2024 - 02 - 01));
        assert_eq!(feb.last_day(), date!(2024 - 02 - 29));
        assert_eq!(feb.days().count(), 29);
        assert_eq!(feb.days().last(), Some(date!(2024 - 02 - 29)));
    }

    #[test]
    fn navigation_wraps_years() {
        let dec = Period::of(date!(2024 - 12 - 15));
        assert_eq!(dec.next().map(|p| p.to_string()), Some("2025-01".to_string()));
        assert_eq!(
            Period::of(date!(2025 - 01 - 31)).previous(),
            Some(dec)
        );
    }

    #[test]
    fn parses_and_displays_year_month() {
        let period: Period = "2025-03".parse().unwrap();
        assert_eq!(period, Period::of(date!(2025 - 03 - 20)));
        assert_eq!(period.to_string(), "2025-03");
        assert!("2025-13".parse::<Period>().is_err());
        assert!("March".parse::<Period>().is_err());
    }

    #[test]
    fn filter_keeps_only_the_month() {
        let records = vec![
            DailyRecord::new(date!(2025 - 02 - 28)),
            DailyRecord::new(date!(2025 - 03 - 01)),
            DailyRecord::new(date!(2025 - 03 - 31)),
            DailyRecord::new(date!(2024 - 03 - 10)),
        ];
        let march: Vec<_> = Period::of(date!(2025 - 03 - 01))
            .filter(&records)
            .map(|r| r.date)
            .collect();
        assert_eq!(march, vec![date!(2025 - 03 - 01), date!(2025 - 03 - 31)]);
    }
}
