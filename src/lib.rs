//! # timekeeper
//!
//! Daily time tracking and payroll estimation for hourly workers.
//!
//! Workers record one [`DailyRecord`] per calendar day (start and end time,
//! lunch break, absences, cash advances). The [`payroll`] module turns a
//! month of records and a [`WorkerProfile`] into gross pay, social-security and
//! income-tax deductions and net pay. [`TimeStore`] keeps profiles and records
//! in memory and can snapshot and restore a worker.
//!
//! Computation is permissive: empty or malformed times count as zero hours,
//! missing amounts as zero. Only the store and snapshot handling return
//! errors.
//!
//! ```
//! use rust_decimal::Decimal;
//! use time::macros::date;
//! use timekeeper::{DailyRecord, DeductionPolicy, WorkerProfile, aggregate};
//!
//! let profile = WorkerProfile::new("Carla", Decimal::from(10))
//!     .with_social_security(DeductionPolicy::percentage(Decimal::from(10)))
//!     .with_income_tax(DeductionPolicy::percentage(Decimal::from(20)));
//! let records = vec![
//!     DailyRecord::new(date!(2025-03-03))
//!         .with_times("08:00", "17:00", 60)
//!         .with_advance(Decimal::from(5)),
//! ];
//!
//! let totals = aggregate(&records, &profile);
//! assert_eq!(totals.gross_pay, Decimal::from(80));
//! assert_eq!(totals.net_pay, Decimal::from(51));
//! ```
//!
//! ## Sentry Integration
//!
//! With the `sentry` feature enabled, store errors convert into Sentry
//! breadcrumbs. Errors raised by the store carry a span trace; install
//! `tracing_error::ErrorLayer` in your subscriber to populate it:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod entities;
pub mod error;
pub mod payroll;
pub mod store;
pub mod utils;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use entities::*;
pub use error::{Error, Result};
pub use payroll::{
    DayStatus, PayrollRules, Period, PeriodReport, ReportLine, Totals, aggregate, duration,
};
pub use store::{Snapshot, TimeStore};

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
