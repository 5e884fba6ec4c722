//! Remote function abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for invoking host-side functions by name
#[async_trait]
pub trait FunctionRunner: Send + Sync {
    /// Invoke a function with a JSON argument bundle and return the raw
    /// response body
    async fn invoke(&self, name: &str, args: &Value) -> Result<Value>;
}
