use serde::Serialize;
use tracing::debug;

use crate::config::DatabaseSettings;

/// Upper bound on collection names echoed back by the diagnostics report.
pub const MAX_LISTED_COLLECTIONS: usize = 10;

const MAX_ERROR_CHARS: usize = 50;

/// Read-only handle on the viewer's database, used only to report
/// connectivity. The service runs without one unless a client is attached.
pub trait DatabaseProbe: Send + Sync {
    fn name(&self) -> Option<String>;
    fn list_collection_names(&self) -> Result<Vec<String>, ProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("database unreachable: {0}")]
    Unreachable(String),
    #[error("query failed: {0}")]
    Query(String),
}

/// Body of the `/test` endpoint. Every field is a human-readable status so
/// the report itself can never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticsReport {
    pub fn collect(settings: &DatabaseSettings, probe: Option<&dyn DatabaseProbe>) -> Self {
        let mut report = Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: presence(settings.url_is_set()),
            database_name: presence(settings.name_is_set()),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        };

        let Some(probe) = probe else {
            if settings.url_is_set() {
                report.database = "⚠️  Available but not initialized".to_string();
            }
            return report;
        };

        report.connection_status = "Connected".to_string();
        report.database = "✅ Available".to_string();

        match probe.list_collection_names() {
            Ok(mut collections) => {
                collections.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(err) => {
                debug!(database = ?probe.name(), error = %err, "collection listing failed");
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&err.to_string(), MAX_ERROR_CHARS)
                );
            }
        }

        report
    }
}

fn presence(is_set: bool) -> String {
    let label = if is_set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ListingProbe(Vec<String>);

    impl DatabaseProbe for ListingProbe {
        fn name(&self) -> Option<String> {
            Some("hr".to_string())
        }

        fn list_collection_names(&self) -> Result<Vec<String>, ProbeError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProbe;

    impl DatabaseProbe for FailingProbe {
        fn name(&self) -> Option<String> {
            None
        }

        fn list_collection_names(&self) -> Result<Vec<String>, ProbeError> {
            Err(ProbeError::Unreachable(
                "connection refused by 10.0.0.12:27017 after three attempts".to_string(),
            ))
        }
    }

    fn configured() -> DatabaseSettings {
        DatabaseSettings {
            url: Some("mongodb://db:27017".to_string()),
            name: Some("hr".to_string()),
        }
    }

    #[test]
    fn reports_missing_client_and_env() {
        let report = DiagnosticsReport::collect(&DatabaseSettings::default(), None);

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn configured_without_client_is_not_initialized() {
        let report = DiagnosticsReport::collect(&configured(), None);

        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
    }

    #[test]
    fn lists_at_most_ten_collections() {
        let names = (0..14).map(|i| format!("collection_{i}")).collect();
        let probe = ListingProbe(names);

        let report = DiagnosticsReport::collect(&configured(), Some(&probe));

        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), MAX_LISTED_COLLECTIONS);
        assert_eq!(report.collections[9], "collection_9");
    }

    #[test]
    fn folds_probe_errors_into_truncated_status() {
        let report = DiagnosticsReport::collect(&configured(), Some(&FailingProbe));

        let detail = report
            .database
            .strip_prefix("⚠️  Connected but Error: ")
            .expect("error prefix");
        assert_eq!(detail.chars().count(), MAX_ERROR_CHARS);
        assert!(detail.starts_with("database unreachable: connection refused"));
        assert!(report.collections.is_empty());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("✅✅✅", 2), "✅✅");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
