use miette::Diagnostic;
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::entities::worker::WorkerId;

/// Errors raised by the record store and snapshot handling.
///
/// Payroll computation itself never fails: malformed times and missing
/// amounts are coerced to zero before they reach the arithmetic.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("worker not found: {worker_id}")]
    #[diagnostic(
        code(timekeeper::worker_not_found),
        help("Register the worker or restore it from a snapshot before recording hours")
    )]
    WorkerNotFound {
        worker_id: WorkerId,
        span_trace: SpanTrace,
    },

    #[error("worker account is suspended: {worker_id}")]
    #[diagnostic(
        code(timekeeper::worker_suspended),
        help("Activate the account before recording hours for it")
    )]
    WorkerSuspended {
        worker_id: WorkerId,
        span_trace: SpanTrace,
    },

    /// A snapshot document whose `type` or `version` this crate does not read.
    #[error("unsupported snapshot: type {kind:?}, version {version:?}")]
    #[diagnostic(
        code(timekeeper::unsupported_snapshot),
        help("Only single-worker backups with a 1.x version can be restored")
    )]
    UnsupportedSnapshot {
        kind: String,
        version: String,
        span_trace: SpanTrace,
    },

    #[error("error decoding snapshot: {0}")]
    #[diagnostic(
        code(timekeeper::deserialization_error),
        help("The snapshot is not valid JSON or is missing its profile or record dates")
    )]
    Deserialization(#[source] serde_json::Error),

    #[error("error encoding snapshot: {0}")]
    #[diagnostic(code(timekeeper::serialization_error))]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn worker_not_found(worker_id: WorkerId) -> Self {
        Self::WorkerNotFound {
            worker_id,
            span_trace: SpanTrace::capture(),
        }
    }

    pub(crate) fn worker_suspended(worker_id: WorkerId) -> Self {
        Self::WorkerSuspended {
            worker_id,
            span_trace: SpanTrace::capture(),
        }
    }

    /// The span trace captured where the error was raised, if any.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::WorkerNotFound { span_trace, .. }
            | Self::WorkerSuspended { span_trace, .. }
            | Self::UnsupportedSnapshot { span_trace, .. } => Some(span_trace),
            Self::Deserialization(_) | Self::Serialization(_) => None,
        }
    }

    /// The worker an error refers to, if any.
    #[must_use]
    pub fn worker_id(&self) -> Option<WorkerId> {
        match self {
            Self::WorkerNotFound { worker_id, .. } | Self::WorkerSuspended { worker_id, .. } => {
                Some(*worker_id)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialization(e)
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
