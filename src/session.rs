//! Per-visit session state
//!
//! The record id and account id live in an explicit `WidgetSession` value
//! built once per page visit, so every downstream consumer can rely on a
//! loaded, account-linked session instead of checking mutable globals
//! populated by a callback.

use crate::config::WidgetConfig;
use crate::host::{HostShell, RecordStore, ResizeRequest};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load the application record")]
    Load(#[source] anyhow::Error),

    /// The application record has no account lookup. Submission cannot
    /// proceed until the record is corrected upstream.
    #[error("application record {record_id} has no linked account")]
    MissingAccountLink { record_id: String },
}

/// Identifiers for one page visit: the application record under edit and
/// the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSession {
    application_id: String,
    account_id: String,
}

impl WidgetSession {
    /// Build a session from known identifiers. The account id is trimmed,
    /// matching what `load` extracts from the record.
    pub fn new(application_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            account_id: account_id.into().trim().to_string(),
        }
    }

    /// Load the session for a page visit: size the viewport, fetch the
    /// application record, and extract the account linkage. A resize
    /// failure is cosmetic and tolerated; a missing account linkage is
    /// fatal for the visit and surfaced distinctly.
    pub async fn load(
        records: &dyn RecordStore,
        shell: &dyn HostShell,
        config: &WidgetConfig,
        record_id: &str,
    ) -> Result<Self, SessionError> {
        let resize = ResizeRequest::height(config.viewport_height.clone());
        if let Err(err) = shell.resize(resize).await {
            warn!(error = %err, "viewport resize failed");
        }

        let record = records
            .get_record(&config.record_module, record_id)
            .await
            .map_err(SessionError::Load)?;

        let account_id = record
            .account
            .as_ref()
            .map(|link| link.id.trim().to_string())
            .filter(|id| !id.is_empty());

        let account_id = match account_id {
            Some(id) => id,
            None => {
                warn!(record_id = %record.id, "application record has no account lookup");
                return Err(SessionError::MissingAccountLink {
                    record_id: record.id,
                });
            }
        };

        info!(application_id = %record.id, "session loaded");
        Ok(Self {
            application_id: record.id,
            account_id,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CallLog, MockRecordStore, MockShell, RecordData, RecordRef};

    fn linked_record() -> RecordData {
        RecordData {
            id: "4876".into(),
            account: Some(RecordRef {
                id: "  9921  ".into(),
                name: Some("Acme Trading LLC".into()),
            }),
        }
    }

    #[tokio::test]
    async fn load_resizes_then_reads_the_record() {
        let log = CallLog::new();
        let store = MockRecordStore::with_record(log.clone(), linked_record());
        let shell = MockShell::new(log.clone());
        let config = WidgetConfig::default();

        let session = WidgetSession::load(&store, &shell, &config, "4876")
            .await
            .unwrap();

        assert_eq!(session.application_id(), "4876");
        assert_eq!(session.account_id(), "9921");
        assert_eq!(
            log.entries(),
            vec!["resize 90%", "get_record Applications1/4876"]
        );
    }

    #[tokio::test]
    async fn load_surfaces_a_missing_account_link_distinctly() {
        let log = CallLog::new();
        let record = RecordData {
            id: "4876".into(),
            account: None,
        };
        let store = MockRecordStore::with_record(log.clone(), record);
        let shell = MockShell::new(log);
        let config = WidgetConfig::default();

        let err = WidgetSession::load(&store, &shell, &config, "4876")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::MissingAccountLink { record_id } if record_id == "4876"
        ));
    }

    #[tokio::test]
    async fn load_treats_a_blank_account_id_as_missing() {
        let log = CallLog::new();
        let record = RecordData {
            id: "4876".into(),
            account: Some(RecordRef {
                id: "   ".into(),
                name: None,
            }),
        };
        let store = MockRecordStore::with_record(log.clone(), record);
        let shell = MockShell::new(log);
        let config = WidgetConfig::default();

        let err = WidgetSession::load(&store, &shell, &config, "4876")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::MissingAccountLink { .. }));
    }

    #[tokio::test]
    async fn load_tolerates_a_resize_failure() {
        let log = CallLog::new();
        let store = MockRecordStore::with_record(log.clone(), linked_record());
        let shell = MockShell::new(log);
        shell.fail_resize();
        let config = WidgetConfig::default();

        assert!(WidgetSession::load(&store, &shell, &config, "4876")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn load_wraps_a_fetch_failure() {
        let log = CallLog::new();
        let store = MockRecordStore::with_record(log.clone(), linked_record());
        store.fail_get();
        let shell = MockShell::new(log);
        let config = WidgetConfig::default();

        let err = WidgetSession::load(&store, &shell, &config, "4876")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Load(_)));
    }
}
