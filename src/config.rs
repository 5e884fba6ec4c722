//! Widget configuration
//!
//! All host-facing names and limits live here so sandbox hosts and tests can
//! rebind them. The embedder constructs the config directly (or deserializes
//! it from its own settings blob); there is no file loader.

use serde::{Deserialize, Serialize};

/// Upload ceiling applied by the file cache, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// CRM module holding the application records this widget edits.
pub const DEFAULT_RECORD_MODULE: &str = "Applications1";

/// Remote function that mirrors the registration data onto the account.
pub const DEFAULT_COMPLETION_FUNCTION: &str = "ta_ctr_complete_the_process_update_account";

/// Runtime configuration for one widget embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// CRM module the application record lives in.
    pub record_module: String,
    /// Name of the host function invoked after the record update.
    pub completion_function: String,
    /// Largest certificate upload the cache will hold, in bytes.
    pub max_upload_bytes: u64,
    /// Viewport height requested from the host shell at page load.
    pub viewport_height: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            record_module: DEFAULT_RECORD_MODULE.to_string(),
            completion_function: DEFAULT_COMPLETION_FUNCTION.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            viewport_height: "90%".to_string(),
        }
    }
}
