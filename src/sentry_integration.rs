//! Sentry integration for timekeeper errors.
//!
//! Only available when the `sentry` feature is enabled.
//!
//! ```toml
//! [dependencies]
//! timekeeper = { version = "0.1", features = ["sentry"] }
//! ```

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, protocol::Value};

use crate::error::Error;

/// Convert a timekeeper Error into a Sentry breadcrumb.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let (category, message, data) = match error {
            Error::WorkerNotFound { worker_id, .. } => {
                let mut data = BTreeMap::new();
                data.insert("worker_id".to_string(), Value::from(worker_id.to_string()));
                ("timekeeper.store", format!("Worker {worker_id} not found"), data)
            }

            Error::WorkerSuspended { worker_id, .. } => {
                let mut data = BTreeMap::new();
                data.insert("worker_id".to_string(), Value::from(worker_id.to_string()));
                ("timekeeper.store", format!("Worker {worker_id} is suspended"), data)
            }

            Error::UnsupportedSnapshot { kind, version, .. } => {
                let mut data = BTreeMap::new();
                data.insert("kind".to_string(), Value::from(kind.clone()));
                data.insert("version".to_string(), Value::from(version.clone()));
                (
                    "timekeeper.snapshot",
                    format!("Unsupported snapshot {kind} v{version}"),
                    data,
                )
            }

            Error::Deserialization(source) => {
                let mut data = BTreeMap::new();
                data.insert("line".to_string(), Value::from(source.line()));
                data.insert("column".to_string(), Value::from(source.column()));
                (
                    "timekeeper.snapshot",
                    "Failed to decode snapshot".to_string(),
                    data,
                )
            }

            Error::Serialization(_) => (
                "timekeeper.snapshot",
                "Failed to encode snapshot".to_string(),
                BTreeMap::new(),
            ),
        };

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(message),
            data,
            level: sentry_core::Level::Error,
            ..Default::default()
        }
    }
}

/// Extract extra Sentry context from an error.
///
/// # Example
///
/// ```ignore
/// use sentry::configure_scope;
/// use timekeeper::sentry_integration::error_to_sentry_context;
///
/// if let Err(e) = store.totals(worker_id, period) {
///     configure_scope(|scope| {
///         for (key, value) in error_to_sentry_context(&e) {
///             scope.set_extra(&key, value);
///         }
///     });
/// }
/// ```
pub fn error_to_sentry_context(error: &Error) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();

    if let Some(span_trace) = error.span_trace() {
        context.insert(
            "timekeeper.span_trace".to_string(),
            Value::from(format!("{span_trace}")),
        );
    }

    if let Some(worker_id) = error.worker_id() {
        context.insert(
            "timekeeper.worker_id".to_string(),
            Value::from(worker_id.to_string()),
        );
    }

    context
}
