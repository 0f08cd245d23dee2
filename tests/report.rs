use rust_decimal_macros::dec;
use time::macros::date;

mod test_utils;

use test_utils::{profile, workday};
use timekeeper::{DailyRecord, DayStatus, PayrollRules, Period, PeriodReport};

#[test]
fn report_serializes_for_export() {
    test_utils::do_setup();

    let records = vec![
        workday(date!(2025 - 09 - 01), "08:00", "17:00", 60).with_site("Porto"),
        workday(date!(2025 - 09 - 02), "08:00", "12:30", 0).with_advance(dec!(40)),
        DailyRecord::absent(date!(2025 - 09 - 03)),
    ];
    let profile = profile(dec!(10), dec!(10), dec!(20));
    let period: Period = "2025-09".parse().expect("valid period");

    let report = PeriodReport::build(period, &records, &profile, &PayrollRules::default());
    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(value["period"], "2025-09");
    assert_eq!(value["daysWorked"], 2);
    assert_eq!(value["totals"]["totalHours"], 12.5);
    assert_eq!(value["totals"]["grossPay"], 125.0);
    assert_eq!(value["totals"]["totalAdvances"], 40.0);

    let lines = value["lines"].as_array().expect("lines array");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["siteLabel"], "Porto");
    assert_eq!(lines[0]["status"], "complete");
    assert_eq!(lines[1]["hours"], 4.5);
    assert_eq!(lines[1]["status"], "partial");
    assert_eq!(lines[2]["status"], "absent");
    assert!(lines[2]["startTime"].is_null());
}

#[test]
fn next_month_report_is_independent() {
    test_utils::do_setup();

    let records = vec![
        workday(date!(2025 - 01 - 31), "08:00", "17:00", 60).with_advance(dec!(100)),
        workday(date!(2025 - 02 - 03), "08:00", "17:00", 60),
    ];
    let profile = profile(dec!(10), dec!(0), dec!(0));
    let january = Period::of(date!(2025 - 01 - 01));
    let february = january.next().expect("february exists");

    let jan = PeriodReport::build(january, &records, &profile, &PayrollRules::default());
    let feb = PeriodReport::build(february, &records, &profile, &PayrollRules::default());

    assert_eq!(jan.totals.net_pay, dec!(0));
    assert_eq!(feb.totals.total_advances, dec!(0));
    assert_eq!(feb.totals.net_pay, dec!(80));
    assert_eq!(
        feb.calendar().find(|(date, _)| *date == date!(2025 - 02 - 03)),
        Some((date!(2025 - 02 - 03), DayStatus::Complete))
    );
}
