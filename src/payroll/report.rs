//! Per-period data handed to export renderers and the calendar view.
//!
//! Only the figures are produced here. Currency formatting, translation and the
//! document or spreadsheet layout belong to whoever renders the report.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    entities::{ClockTime, DailyRecord, WorkerProfile},
    payroll::{
        aggregate::{Totals, aggregate},
        period::Period,
        status::{DayStatus, PayrollRules},
    },
    utils::{
        date_format::{clock_time_option, iso_date},
        serde_helpers::{decimal_as_number, decimal_option_as_number},
    },
};

/// One row of an exported timesheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(with = "clock_time_option")]
    pub start_time: Option<ClockTime>,
    #[serde(with = "clock_time_option")]
    pub end_time: Option<ClockTime>,
    pub lunch_break_minutes: u32,
    #[serde(serialize_with = "decimal_as_number")]
    pub hours: Decimal,
    #[serde(serialize_with = "decimal_option_as_number")]
    pub advance_amount: Option<Decimal>,
    pub site_label: Option<String>,
    pub notes: Option<String>,
    pub status: DayStatus,
}

impl ReportLine {
    fn new(record: &DailyRecord, rules: &PayrollRules) -> Self {
        Self {
            date: record.date,
            start_time: record.start_time,
            end_time: record.end_time,
            lunch_break_minutes: record.lunch_break_minutes,
            hours: record.worked_hours(),
            advance_amount: record.advance_amount,
            site_label: record.site_label.clone(),
            notes: record.notes.clone(),
            status: rules.status(Some(record)),
        }
    }
}

/// Totals and day-by-day lines for one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period: Period,
    pub totals: Totals,
    /// Days with a present record and some worked time
    pub days_worked: usize,
    /// Lines for the records in the period, ordered by date
    pub lines: Vec<ReportLine>,
}

impl PeriodReport {
    /// Builds the report from `records`, ignoring those outside `period`.
    #[must_use]
    pub fn build<'a, I>(
        period: Period,
        records: I,
        profile: &WorkerProfile,
        rules: &PayrollRules,
    ) -> Self
    where
        I: IntoIterator<Item = &'a DailyRecord>,
    {
        let mut in_period: Vec<&DailyRecord> = period.filter(records).collect();
        in_period.sort_by_key(|record| record.date);

        let totals = aggregate(in_period.iter().copied(), profile);
        let days_worked = in_period
            .iter()
            .filter(|record| record.worked_minutes() > 0)
            .count();
        let lines = in_period
            .iter()
            .map(|record| ReportLine::new(record, rules))
            .collect();

        debug!(
            %period,
            records = in_period.len(),
            days_worked,
            "built period report"
        );

        Self {
            period,
            totals,
            days_worked,
            lines,
        }
    }

    /// The status of every day of the month, including days without a record.
    pub fn calendar(&self) -> impl Iterator<Item = (Date, DayStatus)> + '_ {
        self.period.days().map(|date| {
            let status = self
                .lines
                .binary_search_by_key(&date, |line| line.date)
                .map_or(DayStatus::Empty, |index| self.lines[index].status);
            (date, status)
        })
    }

    /// Line for `date`, if a record exists for it.
    #[must_use]
    pub fn line(&self, date: Date) -> Option<&ReportLine> {
        self.lines
            .binary_search_by_key(&date, |line| line.date)
            .ok()
            .map(|index| &self.lines[index])
    }
}
