use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    entities::clock_time::ClockTime,
    payroll::duration,
    utils::{
        date_format::{clock_time_option, iso_date},
        serde_helpers::{
            decimal_option_as_number, lenient_decimal_option, lenient_minutes, non_empty_text,
        },
    },
};

/// One calendar day's attendance entry for a worker.
///
/// The date is the record's identity: a worker has at most one record per day.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Entry id assigned by the web client
    #[serde(
        rename = "id",
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_id: Option<String>,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default, with = "clock_time_option")]
    pub start_time: Option<ClockTime>,
    #[serde(default, with = "clock_time_option")]
    pub end_time: Option<ClockTime>,
    #[serde(rename = "lunchDuration", default, deserialize_with = "lenient_minutes")]
    pub lunch_break_minutes: u32,
    #[serde(default)]
    pub is_absent: bool,
    /// Cash paid ahead of payroll, subtracted from net pay
    #[serde(
        rename = "advance",
        default,
        deserialize_with = "lenient_decimal_option",
        serialize_with = "decimal_option_as_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub advance_amount: Option<Decimal>,
    /// Extra social-security charge for this day, added to the profile policy
    #[serde(
        rename = "manualSocialSecurity",
        default,
        deserialize_with = "lenient_decimal_option",
        serialize_with = "decimal_option_as_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_deduction: Option<Decimal>,
    #[serde(
        rename = "workSite",
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub site_label: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl DailyRecord {
    /// An empty, present record for `date`.
    #[must_use]
    pub fn new(date: Date) -> Self {
        Self {
            entry_id: None,
            date,
            start_time: None,
            end_time: None,
            lunch_break_minutes: 0,
            is_absent: false,
            advance_amount: None,
            manual_deduction: None,
            site_label: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn absent(date: Date) -> Self {
        Self {
            is_absent: true,
            ..Self::new(date)
        }
    }

    #[must_use]
    pub fn with_shift(
        mut self,
        start: ClockTime,
        end: ClockTime,
        lunch_break_minutes: u32,
    ) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self.lunch_break_minutes = lunch_break_minutes;
        self
    }

    /// Sets the shift from form text. Unreadable times are stored as missing.
    #[must_use]
    pub fn with_times(mut self, start: &str, end: &str, lunch_break_minutes: u32) -> Self {
        self.start_time = ClockTime::parse_lenient(start);
        self.end_time = ClockTime::parse_lenient(end);
        self.lunch_break_minutes = lunch_break_minutes;
        self
    }

    #[must_use]
    pub fn with_advance(mut self, amount: Decimal) -> Self {
        self.advance_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_manual_deduction(mut self, amount: Decimal) -> Self {
        self.manual_deduction = Some(amount);
        self
    }

    #[must_use]
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site_label = Some(site.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Minutes worked on this day; zero when absent.
    #[must_use]
    pub fn worked_minutes(&self) -> u32 {
        if self.is_absent {
            return 0;
        }
        duration::worked_minutes(self.start_time, self.end_time, self.lunch_break_minutes)
    }

    /// Hours worked on this day; zero when absent.
    #[must_use]
    pub fn worked_hours(&self) -> Decimal {
        duration::minutes_to_hours(u64::from(self.worked_minutes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn reads_form_record() {
        let record: DailyRecord = serde_json::from_value(json!({
            "id": "2025-03-04",
            "date": "2025-03-04",
            "startTime": "08:00",
            "endTime": "17:30",
            "lunchDuration": 60,
            "isAbsent": false,
            "advance": 0,
            "workSite": "Obra Norte",
            "notes": ""
        }))
        .expect("record should deserialize");

        assert_eq!(record.date, date!(2025 - 03 - 04));
        assert_eq!(record.start_time, ClockTime::from_hm(8, 0));
        assert_eq!(record.worked_hours(), dec!(8.5));
        assert_eq!(record.advance_amount, Some(Decimal::ZERO));
        assert_eq!(record.site_label.as_deref(), Some("Obra Norte"));
        assert_eq!(record.notes, None);
    }

    #[test]
    fn blank_times_mean_no_hours() {
        let record: DailyRecord = serde_json::from_value(json!({
            "date": "2025-03-05",
            "startTime": "",
            "endTime": "17:00",
            "lunchDuration": ""
        }))
        .unwrap();

        assert_eq!(record.start_time, None);
        assert_eq!(record.lunch_break_minutes, 0);
        assert_eq!(record.worked_hours(), Decimal::ZERO);
    }

    #[test]
    fn absent_days_ignore_stored_times() {
        let record = DailyRecord::absent(date!(2025 - 03 - 06)).with_times("08:00", "18:00", 0);
        assert!(record.is_absent);
        assert_eq!(record.worked_minutes(), 0);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let record = DailyRecord::new(date!(2025 - 03 - 07))
            .with_times("09:00", "13:00", 0)
            .with_advance(dec!(20));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["date"], "2025-03-07");
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["lunchDuration"], 0);
        assert_eq!(value["advance"], 20.0);
        assert!(value.get("manualSocialSecurity").is_none());
    }
}
