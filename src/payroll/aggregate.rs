use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    entities::{DailyRecord, WorkerProfile},
    payroll::duration::minutes_to_hours,
    utils::serde_helpers::decimal_as_number,
};

/// Pay totals for a set of daily records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(serialize_with = "decimal_as_number")]
    pub total_hours: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub gross_pay: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub total_social_security: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub total_income_tax: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub total_advances: Decimal,
    #[serde(serialize_with = "decimal_as_number")]
    pub net_pay: Decimal,
}

impl Totals {
    /// Everything subtracted from gross pay, before the zero floor on net pay.
    #[must_use]
    pub fn total_deductions(&self) -> Decimal {
        self.total_social_security
            .saturating_add(self.total_income_tax)
            .saturating_add(self.total_advances)
    }
}

/// Computes hours, gross pay, deductions and net pay for `records`.
///
/// The caller selects the records for the period (see
/// [`Period::filter`](crate::payroll::period::Period::filter)). Absent days count
/// no hours. Fixed deductions only apply when the records earn something, and
/// per-record manual deductions are added to the social-security policy. Net pay
/// is floored at zero.
///
/// Worked time is summed in whole minutes before it is converted to hours, so
/// the result does not depend on the order of `records`. Amounts saturate at
/// the bounds of [`Decimal`] instead of overflowing.
#[must_use]
pub fn aggregate<'a, I>(records: I, profile: &WorkerProfile) -> Totals
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut worked_minutes: u64 = 0;
    let mut manual_deductions = Decimal::ZERO;
    let mut total_advances = Decimal::ZERO;

    for record in records {
        worked_minutes = worked_minutes.saturating_add(u64::from(record.worked_minutes()));
        manual_deductions =
            manual_deductions.saturating_add(record.manual_deduction.unwrap_or_default());
        total_advances = total_advances.saturating_add(record.advance_amount.unwrap_or_default());
    }

    let total_hours = minutes_to_hours(worked_minutes);
    let gross_pay = total_hours.saturating_mul(profile.hourly_rate);

    let total_social_security = profile
        .social_security
        .map_or(Decimal::ZERO, |policy| policy.amount(gross_pay))
        .saturating_add(manual_deductions);
    let total_income_tax = profile
        .income_tax
        .map_or(Decimal::ZERO, |policy| policy.amount(gross_pay));

    let net_pay = gross_pay
        .saturating_sub(total_social_security)
        .saturating_sub(total_income_tax)
        .saturating_sub(total_advances)
        .max(Decimal::ZERO);

    trace!(
        %total_hours,
        %gross_pay,
        %net_pay,
        "aggregated payroll totals"
    );

    Totals {
        total_hours,
        gross_pay,
        total_social_security,
        total_income_tax,
        total_advances,
        net_pay,
    }
}
