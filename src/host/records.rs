//! Record access abstraction
//!
//! Read and write access to the host's application records. The widget only
//! ever touches one record per page visit, so the surface stays small: one
//! fetch, one structured update, one attachment upload.

use crate::form::RecordPatch;
use crate::upload::PendingFile;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The slice of an application record the widget core reads. The host record
/// carries many more fields; everything else is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    pub id: String,
    #[serde(rename = "Account_Name")]
    pub account: Option<RecordRef>,
}

/// A lookup reference to another record (id plus display name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
    pub name: Option<String>,
}

/// Trait for application record access
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a record by module and id
    async fn get_record(&self, module: &str, record_id: &str) -> Result<RecordData>;

    /// Apply a structured update to the record named by `patch.id`
    async fn update_record(&self, module: &str, patch: &RecordPatch) -> Result<()>;

    /// Upload a file as an attachment on the record
    async fn attach_file(&self, module: &str, record_id: &str, file: &PendingFile) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_data_reads_the_account_lookup_and_ignores_the_rest() {
        let raw = json!({
            "id": "4876",
            "Account_Name": { "id": "9921", "name": "Acme Trading LLC" },
            "Owner": { "id": "17", "name": "someone" },
            "Status": "In Progress",
        });
        let record: RecordData = serde_json::from_value(raw).unwrap();
        assert_eq!(record.id, "4876");
        let account = record.account.unwrap();
        assert_eq!(account.id, "9921");
        assert_eq!(account.name.as_deref(), Some("Acme Trading LLC"));
    }

    #[test]
    fn record_data_tolerates_a_missing_account_lookup() {
        let record: RecordData = serde_json::from_value(json!({ "id": "4876" })).unwrap();
        assert!(record.account.is_none());
    }
}
