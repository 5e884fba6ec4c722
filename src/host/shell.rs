//! Widget shell abstraction
//!
//! The shell is the host chrome around the embedded widget: the frame it
//! renders in and the page underneath it.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Viewport geometry request, dimensions as CSS-style strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl ResizeRequest {
    /// Height-only request, the shape the widget normally sends.
    pub fn height(height: impl Into<String>) -> Self {
        Self {
            height: height.into(),
            width: None,
        }
    }
}

/// Trait for controlling the widget's shell
#[async_trait]
pub trait HostShell: Send + Sync {
    /// Resize the widget viewport
    async fn resize(&self, request: ResizeRequest) -> Result<()>;

    /// Close the widget and reload the underlying record view
    async fn close_and_reload(&self) -> Result<()>;
}

/// Shell that acknowledges every request without driving a real host UI.
/// For embeddings where the chrome is managed elsewhere, and for tests.
pub struct NoopShell;

#[async_trait]
impl HostShell for NoopShell {
    async fn resize(&self, request: ResizeRequest) -> Result<()> {
        debug!(height = %request.height, "resize requested");
        Ok(())
    }

    async fn close_and_reload(&self) -> Result<()> {
        debug!("close-and-reload requested");
        Ok(())
    }
}
