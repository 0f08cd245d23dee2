//! In-memory repository of worker profiles and their daily records.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use time::macros::date;
//! use timekeeper::{DailyRecord, DeductionPolicy, Period, TimeStore, WorkerProfile};
//!
//! # fn main() -> timekeeper::Result<()> {
//! let mut store = TimeStore::new();
//! let worker = store.register(
//!     WorkerProfile::new("Carla", Decimal::from(10))
//!         .with_income_tax(DeductionPolicy::percentage(Decimal::from(20))),
//! );
//!
//! let monday = DailyRecord::new(date!(2025-03-03)).with_times("08:00", "17:00", 60);
//! store.save_record(worker, monday)?;
//!
//! let totals = store.totals(worker, Period::of(date!(2025-03-01)))?;
//! assert_eq!(totals.net_pay, Decimal::from(64));
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};

use time::{Date, OffsetDateTime};

use crate::{
    entities::{DailyRecord, WorkerId, WorkerProfile},
    error::{Error, Result},
    payroll::{
        aggregate::{Totals, aggregate},
        period::Period,
        report::PeriodReport,
        status::PayrollRules,
    },
};

pub use self::snapshot::{SNAPSHOT_KIND, SNAPSHOT_VERSION, Snapshot};

pub mod snapshot;

#[derive(Clone, Debug)]
struct WorkerAccount {
    profile: WorkerProfile,
    records: BTreeMap<Date, DailyRecord>,
}

impl WorkerAccount {
    fn new(profile: WorkerProfile) -> Self {
        Self {
            profile,
            records: BTreeMap::new(),
        }
    }
}

/// Worker accounts keyed by [`WorkerId`], each holding at most one record per date.
#[derive(Clone, Debug, Default)]
pub struct TimeStore {
    accounts: HashMap<WorkerId, WorkerAccount>,
    rules: PayrollRules,
}

impl TimeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that classifies days with `rules` in its reports.
    #[must_use]
    pub fn with_rules(rules: PayrollRules) -> Self {
        Self {
            accounts: HashMap::new(),
            rules,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Creates an account for `profile` and returns its new id.
    #[instrument(skip(self, profile), fields(name = %profile.name))]
    pub fn register(&mut self, profile: WorkerProfile) -> WorkerId {
        let worker_id = WorkerId::new();
        self.accounts.insert(worker_id, WorkerAccount::new(profile));
        info!(%worker_id, "registered worker");
        worker_id
    }

    pub fn profile(&self, worker_id: WorkerId) -> Result<&WorkerProfile> {
        Ok(&self.account(worker_id)?.profile)
    }

    /// Replaces a worker's profile, returning the previous one.
    #[instrument(skip(self, profile))]
    pub fn update_profile(
        &mut self,
        worker_id: WorkerId,
        profile: WorkerProfile,
    ) -> Result<WorkerProfile> {
        let account = self.account_mut(worker_id)?;
        debug!("updating worker profile");
        Ok(std::mem::replace(&mut account.profile, profile))
    }

    /// Deletes a worker together with all of its records.
    #[instrument(skip(self))]
    pub fn remove_worker(&mut self, worker_id: WorkerId) -> Result<WorkerProfile> {
        let account = self
            .accounts
            .remove(&worker_id)
            .ok_or_else(|| Error::worker_not_found(worker_id))?;
        info!(records = account.records.len(), "removed worker");
        Ok(account.profile)
    }

    /// Suspends a worker's account. Its records stay readable but no new day can
    /// be saved until it is activated again.
    #[instrument(skip(self))]
    pub fn suspend(&mut self, worker_id: WorkerId) -> Result<()> {
        self.account_mut(worker_id)?.profile.is_active = false;
        info!("suspended worker");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn activate(&mut self, worker_id: WorkerId) -> Result<()> {
        self.account_mut(worker_id)?.profile.is_active = true;
        info!("activated worker");
        Ok(())
    }

    /// Marks the worker's first login, starting the yearly subscription and
    /// retiring any provisional password. Returns the subscription start, which
    /// an earlier first access keeps.
    #[instrument(skip(self))]
    pub fn record_first_access(
        &mut self,
        worker_id: WorkerId,
        at: OffsetDateTime,
    ) -> Result<OffsetDateTime> {
        let profile = &mut self.account_mut(worker_id)?.profile;
        profile.is_provisional_password = false;
        let started = *profile.first_access_date.get_or_insert(at);
        debug!(%started, "recorded first access");
        Ok(started)
    }

    /// Ids of every registered worker, in no particular order.
    pub fn workers(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.accounts.keys().copied()
    }

    #[must_use]
    pub fn contains_worker(&self, worker_id: WorkerId) -> bool {
        self.accounts.contains_key(&worker_id)
    }

    /// Saves `record` for its date, returning the record it replaced. Suspended
    /// workers are refused.
    #[instrument(skip(self, record), fields(date = %record.date))]
    pub fn save_record(
        &mut self,
        worker_id: WorkerId,
        record: DailyRecord,
    ) -> Result<Option<DailyRecord>> {
        let account = self.account_mut(worker_id)?;
        if !account.profile.is_active {
            warn!("refused record for suspended worker");
            return Err(Error::worker_suspended(worker_id));
        }
        let replaced = account.records.insert(record.date, record);
        debug!(replaced = replaced.is_some(), "saved daily record");
        Ok(replaced)
    }

    pub fn record(&self, worker_id: WorkerId, date: Date) -> Result<Option<&DailyRecord>> {
        Ok(self.account(worker_id)?.records.get(&date))
    }

    #[instrument(skip(self))]
    pub fn remove_record(
        &mut self,
        worker_id: WorkerId,
        date: Date,
    ) -> Result<Option<DailyRecord>> {
        let removed = self.account_mut(worker_id)?.records.remove(&date);
        debug!(removed = removed.is_some(), "removed daily record");
        Ok(removed)
    }

    /// All records of a worker, ordered by date.
    pub fn records(&self, worker_id: WorkerId) -> Result<impl Iterator<Item = &DailyRecord> + '_> {
        Ok(self.account(worker_id)?.records.values())
    }

    /// Records of a worker within `period`, ordered by date.
    pub fn records_in(
        &self,
        worker_id: WorkerId,
        period: Period,
    ) -> Result<impl Iterator<Item = &DailyRecord> + '_> {
        let range = period.first_day()..=period.last_day();
        Ok(self.account(worker_id)?.records.range(range).map(|(_, record)| record))
    }

    /// Payroll totals for a worker's records in `period`, using the current profile.
    #[instrument(skip(self))]
    pub fn totals(&self, worker_id: WorkerId, period: Period) -> Result<Totals> {
        let account = self.account(worker_id)?;
        let records = account
            .records
            .range(period.first_day()..=period.last_day())
            .map(|(_, record)| record);
        Ok(aggregate(records, &account.profile))
    }

    #[instrument(skip(self))]
    pub fn report(&self, worker_id: WorkerId, period: Period) -> Result<PeriodReport> {
        let account = self.account(worker_id)?;
        Ok(PeriodReport::build(
            period,
            account.records.values(),
            &account.profile,
            &self.rules,
        ))
    }

    /// Captures a worker's profile and records.
    pub fn snapshot(&self, worker_id: WorkerId) -> Result<Snapshot> {
        let account = self.account(worker_id)?;
        Ok(Snapshot::new(
            Some(worker_id),
            account.profile.clone(),
            account.records.values().cloned().collect(),
        ))
    }

    /// Loads a snapshot, replacing the worker's profile and every record.
    ///
    /// The snapshot's worker id is reused when present; otherwise a new account is
    /// created. When the snapshot holds several records for one date, the last one
    /// wins.
    #[instrument(skip(self, snapshot), fields(records = snapshot.records.len()))]
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<WorkerId> {
        snapshot.check_supported()?;

        let worker_id = snapshot.worker_id.unwrap_or_default();
        let mut account = WorkerAccount::new(snapshot.user_profile);
        account.records = snapshot
            .records
            .into_iter()
            .map(|record| (record.date, record))
            .collect();

        if self.accounts.insert(worker_id, account).is_some() {
            info!(%worker_id, "restored snapshot over existing worker");
        } else {
            info!(%worker_id, "restored snapshot as new worker");
        }
        Ok(worker_id)
    }

    fn account(&self, worker_id: WorkerId) -> Result<&WorkerAccount> {
        self.accounts
            .get(&worker_id)
            .ok_or_else(|| Error::worker_not_found(worker_id))
    }

    fn account_mut(&mut self, worker_id: WorkerId) -> Result<&mut WorkerAccount> {
        self.accounts
            .get_mut(&worker_id)
            .ok_or_else(|| Error::worker_not_found(worker_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::date;

    #[test]
    fn saving_the_same_date_replaces() {
        let mut store = TimeStore::new();
        let worker = store.register(WorkerProfile::new("Tiago", dec!(8)));
        let day = date!(2025 - 07 - 01);

        let first = store
            .save_record(worker, DailyRecord::new(day).with_times("08:00", "12:00", 0))
            .unwrap();
        assert!(first.is_none());

        let second = store
            .save_record(worker, DailyRecord::new(day).with_times("08:00", "17:00", 60))
            .unwrap();
        assert_eq!(second.map(|r| r.worked_hours()), Some(dec!(4)));
        assert_eq!(store.records(worker).unwrap().count(), 1);
        assert_eq!(
            store.record(worker, day).unwrap().map(DailyRecord::worked_hours),
            Some(dec!(8))
        );
    }

    #[test]
    fn range_queries_respect_month_edges() {
        let mut store = TimeStore::new();
        let worker = store.register(WorkerProfile::new("Tiago", dec!(8)));
        let days = [
            date!(2025 - 06 - 30),
            date!(2025 - 07 - 01),
            date!(2025 - 07 - 31),
            date!(2025 - 08 - 01),
        ];
        for day in days {
            store.save_record(worker, DailyRecord::new(day)).unwrap();
        }

        let july: Vec<_> = store
            .records_in(worker, Period::of(date!(2025 - 07 - 10)))
            .unwrap()
            .map(|r| r.date)
            .collect();
        assert_eq!(july, vec![date!(2025 - 07 - 01), date!(2025 - 07 - 31)]);
    }

    #[test]
    fn suspended_workers_cannot_record() {
        let mut store = TimeStore::new();
        let worker = store.register(WorkerProfile::new("Tiago", dec!(8)));
        let day = date!(2025 - 07 - 01);
        store.save_record(worker, DailyRecord::new(day)).unwrap();

        store.suspend(worker).unwrap();
        assert!(!store.profile(worker).unwrap().is_active);
        let err = store
            .save_record(worker, DailyRecord::new(date!(2025 - 07 - 02)))
            .unwrap_err();
        assert!(matches!(err, Error::WorkerSuspended { .. }));
        assert_eq!(err.worker_id(), Some(worker));
        assert_eq!(store.records(worker).unwrap().count(), 1);

        store.activate(worker).unwrap();
        assert!(store
            .save_record(worker, DailyRecord::new(date!(2025 - 07 - 02)))
            .is_ok());
    }

    #[test]
    fn first_access_is_kept() {
        let mut store = TimeStore::new();
        let mut profile = WorkerProfile::new("Tiago", dec!(8));
        profile.is_provisional_password = true;
        let worker = store.register(profile);

        let first = time::macros::datetime!(2025-02-01 10:00 UTC);
        let later = time::macros::datetime!(2025-03-01 10:00 UTC);
        assert_eq!(store.record_first_access(worker, first).unwrap(), first);
        assert_eq!(store.record_first_access(worker, later).unwrap(), first);

        let profile = store.profile(worker).unwrap();
        assert!(!profile.is_provisional_password);
        assert_eq!(profile.subscription_days_remaining(later), Some(337));
    }
}
