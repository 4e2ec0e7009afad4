//! Payment source collaborator.
//!
//! [`PaymentSource`] is the storage seam: it hands out the full, unordered
//! set of known payments as a fresh snapshot on every call. The query
//! service never filters at this level.

use std::fmt;
use std::path::PathBuf;

use super::Payment;
use crate::error::ReportError;

/// Supplies every known payment on demand.
///
/// Implementations must return a complete snapshot (no pagination, no
/// ordering guarantee) or fail entirely.
pub trait PaymentSource: fmt::Debug + Send + Sync {
    /// Returns all payments currently known.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::SourceUnavailable`] if the backing store
    /// cannot be read.
    fn find_all(&self) -> Result<Vec<Payment>, ReportError>;
}

/// Source over a fixed in-memory list of payments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentSource {
    payments: Vec<Payment>,
}

impl InMemoryPaymentSource {
    /// Creates a source that always returns `payments`.
    #[must_use]
    pub fn new(payments: Vec<Payment>) -> Self {
        Self { payments }
    }
}

impl PaymentSource for InMemoryPaymentSource {
    fn find_all(&self) -> Result<Vec<Payment>, ReportError> {
        Ok(self.payments.clone())
    }
}

/// Source that re-reads a JSON array of payments from disk on every call.
#[derive(Debug, Clone)]
pub struct JsonFilePaymentSource {
    path: PathBuf,
}

impl JsonFilePaymentSource {
    /// Creates a source backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PaymentSource for JsonFilePaymentSource {
    fn find_all(&self) -> Result<Vec<Payment>, ReportError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            ReportError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        let payments: Vec<Payment> = serde_json::from_str(&raw).map_err(|e| {
            ReportError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), count = payments.len(), "payments loaded");
        Ok(payments)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "payment-reports-{}-{name}.json",
            std::process::id()
        ));
        if let Err(e) = std::fs::write(&path, contents) {
            panic!("cannot write {}: {e}", path.display());
        }
        path
    }

    #[test]
    fn in_memory_returns_fresh_copies() {
        let source = InMemoryPaymentSource::default();
        let Ok(payments) = source.find_all() else {
            panic!("in-memory source never fails");
        };
        assert!(payments.is_empty());
    }

    #[test]
    fn json_file_reads_every_call() {
        let path = temp_file(
            "reads",
            r#"[{ "paid_at": "2023-01-15T10:00:00Z", "user": { "email": "a@example.com" }, "items": [] }]"#,
        );
        let source = JsonFilePaymentSource::new(&path);
        let Ok(first) = source.find_all() else {
            panic!("file should parse");
        };
        assert_eq!(first.len(), 1);

        if let Err(e) = std::fs::write(&path, "[]") {
            panic!("cannot rewrite: {e}");
        }
        let Ok(second) = source.find_all() else {
            panic!("file should parse");
        };
        assert!(second.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let source = JsonFilePaymentSource::new("/nonexistent/payments.json");
        assert!(matches!(
            source.find_all(),
            Err(ReportError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn malformed_file_is_source_unavailable() {
        let path = temp_file("malformed", "{ not json");
        let source = JsonFilePaymentSource::new(&path);
        assert!(matches!(
            source.find_all(),
            Err(ReportError::SourceUnavailable(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
