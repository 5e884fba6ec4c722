//! Submission pipeline
//!
//! Sequences the remote operations that commit a completed registration:
//! record update, completion function, certificate attachment, workflow
//! advance, and the closing reload. Strictly sequential and fail-fast:
//! each step runs only after the previous one succeeded, the first failure
//! stops the run, and nothing is rolled back or retried. Re-running after
//! a partial failure may duplicate side effects; the `Stage` carried by
//! every error records how far a run got.

use crate::config::WidgetConfig;
use crate::form::{validate, CompletionArgs, FormInput, RecordPatch, ValidationErrors};
use crate::host::{FunctionRunner, HostShell, RecordStore, WorkflowEngine};
use crate::session::WidgetSession;
use crate::upload::PendingFile;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Notice shown for any host-side failure. Deliberately generic; the
/// per-step detail goes to the log, not the user.
pub const MSG_SUBMIT_FAILED: &str = "Check connection and try again.";

/// Steps of the submission sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    UpdateRecord,
    InvokeCompletion,
    AttachFile,
    AdvanceWorkflow,
    Finalize,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::UpdateRecord => "update-record",
            Stage::InvokeCompletion => "invoke-completion",
            Stage::AttachFile => "attach-file",
            Stage::AdvanceWorkflow => "advance-workflow",
            Stage::Finalize => "finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("record update failed")]
    RecordUpdate(#[source] anyhow::Error),

    #[error("completion function failed")]
    Function(#[source] anyhow::Error),

    #[error("attachment upload failed")]
    Attach(#[source] anyhow::Error),

    #[error("workflow advance failed")]
    Advance(#[source] anyhow::Error),

    #[error("no session loaded; the host never delivered page load")]
    NoSession,

    #[error("a submission is already in flight")]
    InFlight,
}

impl SubmitError {
    /// The stage at which the pipeline stopped, when a run took place.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SubmitError::Validation(_) => Some(Stage::Validate),
            SubmitError::RecordUpdate(_) => Some(Stage::UpdateRecord),
            SubmitError::Function(_) => Some(Stage::InvokeCompletion),
            SubmitError::Attach(_) => Some(Stage::AttachFile),
            SubmitError::Advance(_) => Some(Stage::AdvanceWorkflow),
            SubmitError::NoSession | SubmitError::InFlight => None,
        }
    }

    /// Notice for the embedding UI. Validation failures carry field-scoped
    /// messages instead, and an in-flight rejection needs no banner.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            SubmitError::Validation(_) | SubmitError::InFlight => None,
            _ => Some(MSG_SUBMIT_FAILED),
        }
    }
}

/// Runs the submission sequence against the injected host collaborators.
pub struct SubmissionPipeline {
    records: Arc<dyn RecordStore>,
    functions: Arc<dyn FunctionRunner>,
    workflow: Arc<dyn WorkflowEngine>,
    shell: Arc<dyn HostShell>,
    config: WidgetConfig,
}

impl SubmissionPipeline {
    /// Create a new pipeline with dependencies
    pub fn new(
        records: Arc<dyn RecordStore>,
        functions: Arc<dyn FunctionRunner>,
        workflow: Arc<dyn WorkflowEngine>,
        shell: Arc<dyn HostShell>,
        config: WidgetConfig,
    ) -> Self {
        Self {
            records,
            functions,
            workflow,
            shell,
            config,
        }
    }

    /// Run one submission to completion or first failure. No remote call is
    /// issued unless validation passes in full.
    pub async fn submit(
        &self,
        session: &WidgetSession,
        input: &FormInput,
        upload: Option<&PendingFile>,
    ) -> Result<(), SubmitError> {
        let errors = validate(input, session.account_id(), upload.is_some());
        if !errors.is_empty() {
            info!(missing = errors.len(), "submission rejected by validation");
            return Err(SubmitError::Validation(errors));
        }
        info!(stage = %Stage::Validate, "stage complete");

        let patch = RecordPatch::new(session.application_id(), input);
        self.records
            .update_record(&self.config.record_module, &patch)
            .await
            .map_err(|err| {
                error!(stage = %Stage::UpdateRecord, error = %err, "submission aborted");
                SubmitError::RecordUpdate(err)
            })?;
        info!(stage = %Stage::UpdateRecord, "stage complete");

        let args = CompletionArgs::new(session.account_id(), input).to_value();
        let response = self
            .functions
            .invoke(&self.config.completion_function, &args)
            .await
            .map_err(|err| {
                error!(stage = %Stage::InvokeCompletion, error = %err, "submission aborted");
                SubmitError::Function(err)
            })?;
        debug!(%response, "completion function response");
        info!(stage = %Stage::InvokeCompletion, "stage complete");

        // Validation guarantees the upload is present past this point.
        if let Some(file) = upload {
            self.records
                .attach_file(&self.config.record_module, session.application_id(), file)
                .await
                .map_err(|err| {
                    error!(stage = %Stage::AttachFile, error = %err, "submission aborted");
                    SubmitError::Attach(err)
                })?;
            info!(stage = %Stage::AttachFile, file = %file.name, "stage complete");
        }

        self.workflow.advance().await.map_err(|err| {
            error!(stage = %Stage::AdvanceWorkflow, error = %err, "submission aborted");
            SubmitError::Advance(err)
        })?;
        info!(stage = %Stage::AdvanceWorkflow, "stage complete");

        // All durable effects have committed; a failed reload only leaves
        // the stale view on screen.
        if let Err(err) = self.shell.close_and_reload().await {
            warn!(error = %err, "close-and-reload failed after a committed submission");
        }
        info!(stage = %Stage::Finalize, "submission complete");
        Ok(())
    }
}
