//! Payroll computation over daily records.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared state.

pub mod aggregate;
pub mod duration;
pub mod period;
pub mod report;
pub mod status;

pub use self::aggregate::{Totals, aggregate};
pub use self::duration::duration;
pub use self::period::Period;
pub use self::report::{PeriodReport, ReportLine};
pub use self::status::{DayStatus, PayrollRules};
