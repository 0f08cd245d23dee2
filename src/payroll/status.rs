use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{entities::DailyRecord, utils::serde_helpers::{decimal_as_number, lenient_decimal}};

const DEFAULT_FULL_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// How a calendar day is shown.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Worked at least a full day
    Complete,
    /// Worked some hours, less than a full day
    Partial,
    /// Marked absent
    Absent,
    /// No record, or a record with no worked hours
    Empty,
}

/// Rules that are not part of a worker's profile.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PayrollRules {
    /// Hours from which a day counts as complete
    #[serde(
        deserialize_with = "lenient_decimal",
        serialize_with = "decimal_as_number"
    )]
    pub full_day_hours: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            full_day_hours: DEFAULT_FULL_DAY_HOURS,
        }
    }
}

impl PayrollRules {
    #[must_use]
    pub fn status(&self, record: Option<&DailyRecord>) -> DayStatus {
        let Some(record) = record else {
            return DayStatus::Empty;
        };
        if record.is_absent {
            return DayStatus::Absent;
        }

        let hours = record.worked_hours();
        if hours >= self.full_day_hours {
            DayStatus::Complete
        } else if hours > Decimal::ZERO {
            DayStatus::Partial
        } else {
            DayStatus::Empty
        }
    }
}

impl DayStatus {
    /// Classifies a day with the default eight-hour rule.
    #[must_use]
    pub fn of(record: Option<&DailyRecord>) -> Self {
        PayrollRules::default().status(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::date;

    #[test]
    fn classifies_days() {
        let day = date!(2025 - 04 - 01);
        assert_eq!(DayStatus::of(None), DayStatus::Empty);
        assert_eq!(
            DayStatus::of(Some(&DailyRecord::new(day).with_times("08:00", "17:00", 60))),
            DayStatus::Complete
        );
        assert_eq!(
            DayStatus::of(Some(&DailyRecord::new(day).with_times("08:00", "16:59", 60))),
            DayStatus::Partial
        );
        assert_eq!(
            DayStatus::of(Some(&DailyRecord::absent(day).with_times("08:00", "17:00", 60))),
            DayStatus::Absent
        );
        assert_eq!(DayStatus::of(Some(&DailyRecord::new(day))), DayStatus::Empty);
    }

    #[test]
    fn threshold_is_configurable() {
        let rules = PayrollRules {
            full_day_hours: dec!(6),
        };
        let record = DailyRecord::new(date!(2025 - 04 - 02)).with_times("09:00", "15:00", 0);
        assert_eq!(rules.status(Some(&record)), DayStatus::Complete);
        assert_eq!(DayStatus::of(Some(&record)), DayStatus::Partial);
    }
}
