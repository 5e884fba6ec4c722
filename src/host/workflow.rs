//! Workflow control abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Trait for moving the host's approval workflow forward. An implementation
/// is bound to one record's workflow at construction; `advance` moves it
/// past the stage this widget serves.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    async fn advance(&self) -> Result<()>;
}
