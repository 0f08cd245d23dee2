use rust_decimal::Decimal;
use time::Date;
use tracing::info;

use std::sync::Once;

use timekeeper::{DailyRecord, DeductionPolicy, WorkerProfile};

/// Profile with percentage social security and income tax
#[allow(dead_code)]
pub fn profile(
    hourly_rate: Decimal,
    social_security: Decimal,
    income_tax: Decimal,
) -> WorkerProfile {
    WorkerProfile::new("Test Worker", hourly_rate)
        .with_username("test.worker")
        .with_social_security(DeductionPolicy::percentage(social_security))
        .with_income_tax(DeductionPolicy::percentage(income_tax))
}

/// A present day entered the way the calendar form sends it
#[allow(dead_code)]
pub fn workday(date: Date, start: &str, end: &str, lunch_minutes: u32) -> DailyRecord {
    DailyRecord::new(date).with_times(start, end, lunch_minutes)
}

static LOGGING_CONFIGURED: Once = Once::new();

/// Setup before test runs
pub fn do_setup() {
    LOGGING_CONFIGURED.call_once(|| tracing_subscriber::fmt().with_test_writer().init());
    info!("Setting up test environment");
}
