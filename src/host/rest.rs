//! REST implementation of the host capabilities
//!
//! Talks to the CRM's v2-style REST surface with a shared `reqwest` client.
//! Failures propagate immediately; there is no retry or backoff layer, the
//! widget's submission policy is strictly fail-fast.

use crate::form::RecordPatch;
use crate::host::{FunctionRunner, RecordData, RecordStore, WorkflowEngine};
use crate::upload::PendingFile;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Record payload envelope used by the CRM for both reads and writes.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

#[derive(Debug, Serialize)]
struct BlueprintTransition<'a> {
    transition_id: &'a str,
    data: Value,
}

/// REST-backed `RecordStore` and `FunctionRunner`.
pub struct RestHost {
    client: Client,
    base_url: String,
    token: String,
}

impl RestHost {
    /// Create a client for the given API origin and OAuth token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// A `WorkflowEngine` bound to one record's blueprint transition,
    /// sharing this host's client and credentials.
    pub fn blueprint(
        &self,
        module: impl Into<String>,
        record_id: impl Into<String>,
        transition_id: impl Into<String>,
    ) -> RestBlueprint {
        RestBlueprint {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            module: module.into(),
            record_id: record_id.into(),
            transition_id: transition_id.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/crm/v2/{}", self.base_url, path)
    }

    fn auth_value(&self) -> String {
        format!("Zoho-oauthtoken {}", self.token)
    }
}

async fn ensure_success(action: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("{} failed with {}: {}", action, status, body))
}

#[async_trait]
impl RecordStore for RestHost {
    async fn get_record(&self, module: &str, record_id: &str) -> Result<RecordData> {
        let response = self
            .client
            .get(self.url(&format!("{}/{}", module, record_id)))
            .header("Authorization", self.auth_value())
            .send()
            .await
            .context("record fetch request failed")?;

        let envelope: Envelope<RecordData> = ensure_success("record fetch", response)
            .await?
            .json()
            .await
            .context("failed to parse record response")?;

        envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("record {}/{} not found", module, record_id))
    }

    async fn update_record(&self, module: &str, patch: &RecordPatch) -> Result<()> {
        let body = Envelope {
            data: vec![patch.clone()],
        };
        let response = self
            .client
            .put(self.url(&format!("{}/{}", module, patch.id)))
            .header("Authorization", self.auth_value())
            .json(&body)
            .send()
            .await
            .context("record update request failed")?;

        ensure_success("record update", response).await?;
        Ok(())
    }

    async fn attach_file(&self, module: &str, record_id: &str, file: &PendingFile) -> Result<()> {
        let part = Part::bytes(file.content.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("{}/{}/Attachments", module, record_id)))
            .header("Authorization", self.auth_value())
            .multipart(form)
            .send()
            .await
            .context("attachment request failed")?;

        ensure_success("attachment upload", response).await?;
        Ok(())
    }
}

#[async_trait]
impl FunctionRunner for RestHost {
    async fn invoke(&self, name: &str, args: &Value) -> Result<Value> {
        let response = self
            .client
            .post(self.url(&format!("functions/{}/actions/execute", name)))
            .header("Authorization", self.auth_value())
            .json(args)
            .send()
            .await
            .with_context(|| format!("function {} request failed", name))?;

        let body = ensure_success("function execution", response)
            .await?
            .text()
            .await
            .unwrap_or_default();

        // Some functions answer with an empty or non-JSON body; callers
        // ignore the payload anyway.
        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}

/// REST-backed `WorkflowEngine` for one record's blueprint.
pub struct RestBlueprint {
    client: Client,
    base_url: String,
    token: String,
    module: String,
    record_id: String,
    transition_id: String,
}

#[async_trait]
impl WorkflowEngine for RestBlueprint {
    async fn advance(&self) -> Result<()> {
        let transitions = vec![BlueprintTransition {
            transition_id: &self.transition_id,
            data: Value::Object(Default::default()),
        }];
        let body = serde_json::json!({ "blueprint": transitions });

        let response = self
            .client
            .put(format!(
                "{}/crm/v2/{}/{}/actions/blueprint",
                self.base_url, self.module, self.record_id
            ))
            .header("Authorization", format!("Zoho-oauthtoken {}", self.token))
            .json(&body)
            .send()
            .await
            .context("blueprint request failed")?;

        ensure_success("blueprint advance", response).await?;
        debug!(record_id = %self.record_id, "blueprint advanced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_do_not_double_the_path_separator() {
        let host = RestHost::new("https://crm.example/", "token").unwrap();
        assert_eq!(
            host.url("Applications1/4876"),
            "https://crm.example/crm/v2/Applications1/4876"
        );
    }

    #[test]
    fn blueprint_body_names_the_transition() {
        let transition = BlueprintTransition {
            transition_id: "555",
            data: Value::Object(Default::default()),
        };
        let value = serde_json::to_value(&transition).unwrap();
        assert_eq!(value["transition_id"], "555");
        assert!(value["data"].as_object().unwrap().is_empty());
    }
}
