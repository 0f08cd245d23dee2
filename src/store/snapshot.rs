use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing_error::SpanTrace;

use crate::{
    entities::{DailyRecord, WorkerId, WorkerProfile},
    error::{Error, Result},
    utils::date_format::rfc3339,
};

/// Document type written by single-worker backups.
pub const SNAPSHOT_KIND: &str = "digital-nexus-backup-single";

/// Version written by this crate. Any `1.x` version is read back.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// A worker's profile and records at a point in time.
///
/// Serializes to the same JSON document the web client downloads as a backup.
/// Profile keys without a typed field are carried through unchanged.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    #[serde(with = "rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<WorkerId>,
    pub user_profile: WorkerProfile,
    #[serde(default)]
    pub records: Vec<DailyRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new(
        worker_id: Option<WorkerId>,
        profile: WorkerProfile,
        records: Vec<DailyRecord>,
    ) -> Self {
        Self {
            kind: SNAPSHOT_KIND.to_string(),
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: OffsetDateTime::now_utc(),
            worker_id,
            user_profile: profile,
            records,
        }
    }

    /// Pretty-printed JSON, as written to backup files.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Serialization)
    }

    /// Parses and checks a backup document.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_supported()?;
        Ok(snapshot)
    }

    /// Fails unless this is a single-worker backup with a `1.x` version.
    pub fn check_supported(&self) -> Result<()> {
        let major = self.version.split('.').next().unwrap_or_default();
        if self.kind == SNAPSHOT_KIND && major == "1" {
            return Ok(());
        }

        warn!(kind = %self.kind, version = %self.version, "rejecting snapshot");
        Err(Error::UnsupportedSnapshot {
            kind: self.kind.clone(),
            version: self.version.clone(),
            span_trace: SpanTrace::capture(),
        })
    }
}
