pub use self::clock_time::ClockTime;
pub use self::daily_record::DailyRecord;
pub use self::worker::{DeductionKind, DeductionPolicy, WorkerId, WorkerProfile, WorkerRole};

pub mod clock_time;
pub mod daily_record;
pub mod worker;
