//! Diagnostics Query Handler
//!
//! 尽力而为的自检：存储自检失败会写进结果，而不是让请求失败。

use std::sync::Arc;

use crate::application::ports::{ConnectionState, DocumentStorePort, StoreStatus};
use crate::application::queries::GetDiagnostics;

/// 错误信息截断长度
const ERROR_PREVIEW_CHARS: usize = 80;

/// 自检结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl From<StoreStatus> for Diagnostics {
    fn from(status: StoreStatus) -> Self {
        match status.connection {
            ConnectionState::Connected => {
                let database = match &status.introspection_error {
                    None => "✅ Connected & Working".to_string(),
                    Some(e) => format!("⚠️  Connected but Error: {}", preview(e)),
                };
                let database_url = if status.url_configured {
                    "✅ Set"
                } else {
                    "❌ Not Set"
                };
                Self {
                    backend: "✅ Running".to_string(),
                    database,
                    database_url: Some(database_url.to_string()),
                    database_name: Some(
                        status
                            .database_name
                            .unwrap_or_else(|| "Unknown".to_string()),
                    ),
                    connection_status: "Connected".to_string(),
                    collections: status
                        .collections
                        .into_iter()
                        .take(StoreStatus::MAX_COLLECTIONS)
                        .collect(),
                }
            }
            ConnectionState::Disconnected { reason } => Self {
                backend: "✅ Running".to_string(),
                database: format!("❌ Not Available: {}", preview(&reason)),
                database_url: None,
                database_name: None,
                connection_status: "Not Connected".to_string(),
                collections: Vec::new(),
            },
        }
    }
}

fn preview(message: &str) -> String {
    message.chars().take(ERROR_PREVIEW_CHARS).collect()
}

/// GetDiagnostics Handler
pub struct GetDiagnosticsHandler {
    store: Arc<dyn DocumentStorePort>,
}

impl GetDiagnosticsHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: GetDiagnostics) -> Diagnostics {
        let status = self.store.status().await;
        if let Some(e) = &status.introspection_error {
            tracing::warn!(backend = status.backend, error = %e, "Store introspection failed");
        }
        Diagnostics::from(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> StoreStatus {
        StoreStatus {
            backend: "mongo",
            connection: ConnectionState::Connected,
            url_configured: true,
            database_name: Some("storyline".to_string()),
            collections: (0..12).map(|i| format!("c{i}")).collect(),
            introspection_error: None,
        }
    }

    #[test]
    fn test_connected_and_working() {
        let d = Diagnostics::from(connected());

        assert_eq!(d.database, "✅ Connected & Working");
        assert_eq!(d.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(d.database_name.as_deref(), Some("storyline"));
        assert_eq!(d.connection_status, "Connected");
        assert_eq!(d.collections.len(), 10);
    }

    #[test]
    fn test_introspection_error_truncated() {
        let mut status = connected();
        status.collections.clear();
        status.introspection_error = Some("x".repeat(200));

        let d = Diagnostics::from(status);

        assert!(d.database.starts_with("⚠️  Connected but Error: "));
        assert!(d.database.ends_with(&"x".repeat(80)));
        assert!(!d.database.ends_with(&"x".repeat(81)));
    }

    #[test]
    fn test_disconnected() {
        let d = Diagnostics::from(StoreStatus {
            backend: "disconnected",
            connection: ConnectionState::Disconnected {
                reason: "DATABASE_URL not set".to_string(),
            },
            url_configured: false,
            database_name: None,
            collections: Vec::new(),
            introspection_error: None,
        });

        assert_eq!(d.backend, "✅ Running");
        assert_eq!(d.connection_status, "Not Connected");
        assert_eq!(d.database_url, None);
        assert!(d.collections.is_empty());
    }
}
